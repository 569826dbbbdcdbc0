//! Agent and plugin components, their released versions and update pushes.

use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Agent,
    Plugin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Rpm,
    Deb,
    Binary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: u64,
    pub name: String,
    pub category: ComponentCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub current_version: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub version_count: Option<i64>,
    #[serde(default)]
    pub package_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPackage {
    pub id: u64,
    pub version_id: u64,
    #[serde(default)]
    pub os: String,
    /// `amd64` or `arm64`.
    pub arch: String,
    pub pkg_type: PackageType,
    #[serde(default)]
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentVersion {
    pub id: u64,
    pub component_id: u64,
    pub version: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(default)]
    pub created_by: String,
    pub created_at: String,
    #[serde(default)]
    pub packages: Vec<ComponentPackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsResponse {
    pub component: Component,
    #[serde(default)]
    pub versions: Vec<ComponentVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComponentRequest {
    pub name: String,
    pub category: ComponentCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseVersionRequest {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_latest: Option<bool>,
    /// Overwrite an existing release of the same version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginSyncState {
    Ready,
    MissingPackage,
    Outdated,
    DefaultConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSyncStatus {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub config_version: String,
    #[serde(default)]
    pub config_sha256: String,
    #[serde(default)]
    pub config_enabled: bool,
    #[serde(default)]
    pub download_urls: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_package: bool,
    #[serde(default)]
    pub package_version: Option<String>,
    #[serde(default)]
    pub package_arch: Option<String>,
    pub status: PluginSyncState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginVersion {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastPluginConfigsResponse {
    pub plugin_count: i64,
    pub online_agent_count: i64,
    #[serde(default)]
    pub plugins: Vec<PluginVersion>,
}

/// Hosts to update; no host ids means every host.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PushAgentUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushStatus {
    Pending,
    Pushing,
    Success,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPushHost {
    pub id: u64,
    pub record_id: u64,
    pub host_id: String,
    #[serde(default)]
    pub hostname: String,
    /// `pending`, `success` or `failed`.
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentPushRecord {
    pub id: u64,
    pub component_name: String,
    pub version: String,
    /// `all` or `selected`.
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub target_hosts: Vec<String>,
    pub status: PushStatus,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub success_count: i64,
    #[serde(default)]
    pub failed_count: i64,
    #[serde(default)]
    pub failed_hosts: Vec<String>,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_by: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub push_hosts: Vec<ComponentPushHost>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPushRecordsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PushStatus>,
}

#[derive(Clone)]
pub struct ComponentsApi {
    client: ApiClient,
}

impl ComponentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Component>, ApiError> {
        self.client.get("/components").await
    }

    pub async fn get(&self, id: u64) -> Result<Component, ApiError> {
        self.client.get(&format!("/components/{}", id)).await
    }

    pub async fn create(&self, request: &CreateComponentRequest) -> Result<Component, ApiError> {
        self.client.post("/components", request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete(&format!("/components/{}", id)).await
    }

    pub async fn versions(&self, component_id: u64) -> Result<VersionsResponse, ApiError> {
        self.client
            .get(&format!("/components/{}/versions", component_id))
            .await
    }

    pub async fn release_version(
        &self,
        component_id: u64,
        request: &ReleaseVersionRequest,
    ) -> Result<ComponentVersion, ApiError> {
        self.client
            .post(&format!("/components/{}/versions", component_id), request)
            .await
    }

    pub async fn version(
        &self,
        component_id: u64,
        version_id: u64,
    ) -> Result<ComponentVersion, ApiError> {
        self.client
            .get(&format!("/components/{}/versions/{}", component_id, version_id))
            .await
    }

    pub async fn set_latest_version(
        &self,
        component_id: u64,
        version_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .put_empty::<IgnoredAny>(&format!(
                "/components/{}/versions/{}/set-latest",
                component_id, version_id
            ))
            .await
            .map(|_| ())
    }

    pub async fn delete_version(&self, component_id: u64, version_id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/components/{}/versions/{}", component_id, version_id))
            .await
    }

    pub async fn delete_package(&self, package_id: u64) -> Result<(), ApiError> {
        self.client.delete(&format!("/packages/{}", package_id)).await
    }

    pub async fn plugin_sync_status(&self) -> Result<Vec<PluginSyncStatus>, ApiError> {
        self.client.get("/components/plugin-status").await
    }

    /// The response shape varies by backend version, so it stays untyped.
    pub async fn push_agent_update(
        &self,
        request: &PushAgentUpdateRequest,
    ) -> Result<serde_json::Value, ApiError> {
        self.client
            .post("/components/agent/push-update", request)
            .await
    }

    /// Broadcast plugin configs to every online agent now.
    pub async fn broadcast_plugin_configs(
        &self,
    ) -> Result<BroadcastPluginConfigsResponse, ApiError> {
        self.client.post_empty("/components/plugins/broadcast").await
    }

    pub async fn push_records(
        &self,
        params: &ListPushRecordsParams,
    ) -> Result<PaginatedResponse<ComponentPushRecord>, ApiError> {
        self.client
            .get_with_query("/components/push-records", params)
            .await
    }

    pub async fn push_record(&self, id: u64) -> Result<ComponentPushRecord, ApiError> {
        self.client
            .get(&format!("/components/push-records/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_status_reads_type_and_state() {
        let status: PluginSyncStatus = serde_json::from_value(serde_json::json!({
            "name": "baseline",
            "type": "plugin",
            "has_package": false,
            "status": "missing_package"
        }))
        .unwrap();
        assert_eq!(status.kind, "plugin");
        assert_eq!(status.status, PluginSyncState::MissingPackage);
    }
}
