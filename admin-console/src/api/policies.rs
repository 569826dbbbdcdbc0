use super::Severity;
use crate::error::ApiError;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Host,
    Container,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsRequirement {
    pub os_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
}

/// Check and fix configs are rule-type specific, so they stay untyped JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    #[serde(default)]
    pub policy_id: String,
    #[serde(default)]
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub target_type: Option<TargetKind>,
    #[serde(default)]
    pub check_config: serde_json::Value,
    #[serde(default)]
    pub fix_config: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub os_family: Vec<String>,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub os_requirements: Vec<OsRequirement>,
    #[serde(default)]
    pub target_type: Option<TargetKind>,
    pub enabled: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub rule_count: Option<i64>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassFail {
    #[serde(default)]
    pub pass: i64,
    #[serde(default)]
    pub fail: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityPassFail {
    pub critical: PassFail,
    pub high: PassFail,
    pub medium: PassFail,
    pub low: PassFail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyStatistics {
    pub policy_id: String,
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
    #[serde(default)]
    pub by_severity: Option<SeverityPassFail>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPoliciesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleInput {
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub check_config: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_config: Option<serde_json::Value>,
}

/// Body for both create and update; `id` is only sent on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_family: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_requirements: Option<Vec<OsRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleInput>>,
}

#[derive(Debug, Deserialize)]
struct PolicyList {
    #[serde(default)]
    items: Vec<Policy>,
}

#[derive(Serialize)]
struct BatchEnableBody<'a> {
    policy_ids: &'a [String],
    enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BatchUpdated {
    #[serde(default)]
    pub updated: i64,
}

#[derive(Clone)]
pub struct PoliciesApi {
    client: ApiClient,
}

impl PoliciesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListPoliciesParams) -> Result<Vec<Policy>, ApiError> {
        let list: PolicyList = self.client.get_with_query("/policies", params).await?;
        Ok(list.items)
    }

    pub async fn get(&self, policy_id: &str) -> Result<Policy, ApiError> {
        self.client.get(&format!("/policies/{}", policy_id)).await
    }

    pub async fn create(&self, input: &PolicyInput) -> Result<Policy, ApiError> {
        self.client.post("/policies", input).await
    }

    pub async fn update(&self, policy_id: &str, input: &PolicyInput) -> Result<Policy, ApiError> {
        self.client
            .put(&format!("/policies/{}", policy_id), input)
            .await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/policies/{}", policy_id)).await
    }

    pub async fn statistics(&self, policy_id: &str) -> Result<PolicyStatistics, ApiError> {
        self.client
            .get(&format!("/policies/{}/statistics", policy_id))
            .await
    }

    pub async fn batch_enable(
        &self,
        policy_ids: &[String],
        enabled: bool,
    ) -> Result<BatchUpdated, ApiError> {
        self.client
            .post(
                "/policies/batch/enable",
                &BatchEnableBody {
                    policy_ids,
                    enabled,
                },
            )
            .await
    }
}
