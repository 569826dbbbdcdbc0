use super::SeverityCounts;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Vm,
    Docker,
    K8s,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub host_id: String,
    pub hostname: String,
    #[serde(default)]
    pub os_family: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub kernel_version: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub ipv4: Vec<String>,
    pub status: HostStatus,
    #[serde(default)]
    pub last_heartbeat: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub baseline_score: Option<f64>,
    #[serde(default)]
    pub baseline_pass_rate: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_container: Option<bool>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub business_line: Option<String>,
}

/// Host record plus the hardware/network facts only the detail view shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostDetail {
    #[serde(flatten)]
    pub host: Host,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub cpu_info: Option<String>,
    #[serde(default)]
    pub memory_size: Option<String>,
    #[serde(default)]
    pub default_gateway: Option<String>,
    #[serde(default)]
    pub dns_servers: Vec<String>,
    #[serde(default)]
    pub public_ipv4: Vec<String>,
    #[serde(default)]
    pub system_boot_time: Option<String>,
    #[serde(default)]
    pub agent_start_time: Option<String>,
    /// JSON-encoded disk list, as sent by the backend.
    #[serde(default)]
    pub disk_info: Option<String>,
    /// JSON-encoded interface list, as sent by the backend.
    #[serde(default)]
    pub network_interfaces: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListHostsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_type: Option<RuntimeType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStatusDistribution {
    pub running: i64,
    pub abnormal: i64,
    pub offline: i64,
    pub not_installed: i64,
    pub uninstalled: i64,
}

/// Number of hosts carrying at least one failed baseline of each severity.
pub type HostRiskDistribution = SeverityCounts;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRiskStatistics {
    pub alerts: RiskBucket,
    pub vulnerabilities: RiskBucket,
    pub baseline: RiskBucket,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskBucket {
    #[serde(default)]
    pub total: i64,
    #[serde(flatten)]
    pub by_severity: SeverityCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginStatus {
    Running,
    Stopped,
    Error,
    NotInstalled,
    Updating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostPlugin {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub version: String,
    pub status: PluginStatus,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub latest_version: String,
    #[serde(default)]
    pub need_update: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestMetrics {
    pub cpu_usage: Option<f64>,
    pub mem_usage: Option<f64>,
    pub disk_usage: Option<f64>,
    pub net_bytes_sent: Option<f64>,
    pub net_bytes_recv: Option<f64>,
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesMetrics {
    pub cpu_usage: Vec<TimeSeriesPoint>,
    pub mem_usage: Vec<TimeSeriesPoint>,
    pub disk_usage: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostMetrics {
    pub host_id: String,
    #[serde(default)]
    pub latest: Option<LatestMetrics>,
    #[serde(default)]
    pub time_series: Option<TimeSeriesMetrics>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Serialize)]
struct TagsBody<'a> {
    tags: &'a [String],
}

#[derive(Serialize)]
struct BusinessLineBody<'a> {
    business_line: &'a str,
}

#[derive(Serialize)]
struct RestartAgentBody<'a> {
    host_ids: &'a [String],
}

#[derive(Clone)]
pub struct HostsApi {
    client: ApiClient,
}

impl HostsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListHostsParams) -> Result<PaginatedResponse<Host>, ApiError> {
        self.client.get_with_query("/hosts", params).await
    }

    pub async fn get(&self, host_id: &str) -> Result<HostDetail, ApiError> {
        self.client.get(&format!("/hosts/{}", host_id)).await
    }

    pub async fn status_distribution(&self) -> Result<HostStatusDistribution, ApiError> {
        self.client.get("/hosts/status-distribution").await
    }

    pub async fn risk_distribution(&self) -> Result<HostRiskDistribution, ApiError> {
        self.client.get("/hosts/risk-distribution").await
    }

    pub async fn metrics(
        &self,
        host_id: &str,
        window: &MetricsWindow,
    ) -> Result<HostMetrics, ApiError> {
        self.client
            .get_with_query(&format!("/hosts/{}/metrics", host_id), window)
            .await
    }

    pub async fn update_tags(&self, host_id: &str, tags: &[String]) -> Result<(), ApiError> {
        self.client
            .put_unit(&format!("/hosts/{}/tags", host_id), &TagsBody { tags })
            .await
    }

    pub async fn update_business_line(
        &self,
        host_id: &str,
        business_line: &str,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(
                &format!("/hosts/{}/business-line", host_id),
                &BusinessLineBody { business_line },
            )
            .await
    }

    pub async fn risk_statistics(&self, host_id: &str) -> Result<HostRiskStatistics, ApiError> {
        self.client
            .get(&format!("/hosts/{}/risk-statistics", host_id))
            .await
    }

    pub async fn plugins(&self, host_id: &str) -> Result<Vec<HostPlugin>, ApiError> {
        self.client.get(&format!("/hosts/{}/plugins", host_id)).await
    }

    pub async fn delete(&self, host_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/hosts/{}", host_id)).await
    }

    /// Restart agents on the given hosts; an empty slice means all hosts.
    pub async fn restart_agents(&self, host_ids: &[String]) -> Result<(), ApiError> {
        self.client
            .post_unit("/hosts/restart-agent", Some(&RestartAgentBody { host_ids }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_detail_flattens_host_fields() {
        let detail: HostDetail = serde_json::from_value(serde_json::json!({
            "host_id": "h1",
            "hostname": "web-01",
            "status": "online",
            "ipv4": ["10.0.0.1"],
            "cpu_info": "8 cores"
        }))
        .unwrap();

        assert_eq!(detail.host.host_id, "h1");
        assert_eq!(detail.host.status, HostStatus::Online);
        assert_eq!(detail.cpu_info.as_deref(), Some("8 cores"));
        assert!(detail.dns_servers.is_empty());
    }
}
