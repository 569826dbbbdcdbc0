use super::policies::Policy;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Present only when requested with `with_policies`.
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub policy_count: Option<i64>,
    #[serde(default)]
    pub rule_count: Option<i64>,
    #[serde(default)]
    pub pass_rate: Option<f64>,
    #[serde(default)]
    pub host_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyGroupStatistics {
    pub group_id: String,
    #[serde(default)]
    pub policy_count: i64,
    #[serde(default)]
    pub rule_count: i64,
    #[serde(default)]
    pub host_count: i64,
    #[serde(default)]
    pub pass_rate: f64,
    #[serde(default)]
    pub pass_count: i64,
    #[serde(default)]
    pub fail_count: i64,
    #[serde(default)]
    pub risk_count: i64,
    #[serde(default)]
    pub last_check_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyGroupQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_policies: Option<bool>,
}

/// `id` is generated by the server when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePolicyGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePolicyGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone)]
pub struct PolicyGroupsApi {
    client: ApiClient,
}

impl PolicyGroupsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &PolicyGroupQuery,
    ) -> Result<PaginatedResponse<PolicyGroup>, ApiError> {
        self.client.get_with_query("/policy-groups", query).await
    }

    pub async fn get(&self, id: &str, query: &PolicyGroupQuery) -> Result<PolicyGroup, ApiError> {
        self.client
            .get_with_query(&format!("/policy-groups/{}", id), query)
            .await
    }

    pub async fn statistics(&self, id: &str) -> Result<PolicyGroupStatistics, ApiError> {
        self.client
            .get(&format!("/policy-groups/{}/statistics", id))
            .await
    }

    pub async fn create(&self, request: &CreatePolicyGroupRequest) -> Result<PolicyGroup, ApiError> {
        self.client.post("/policy-groups", request).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdatePolicyGroupRequest,
    ) -> Result<PolicyGroup, ApiError> {
        self.client
            .put(&format!("/policy-groups/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/policy-groups/{}", id)).await
    }
}
