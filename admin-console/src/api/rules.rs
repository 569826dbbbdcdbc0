use super::policies::Rule;
use super::Severity;
use crate::error::ApiError;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRuleRequest {
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub check_config: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_config: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRuleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_config: Option<Value>,
}

#[derive(Deserialize)]
struct RuleList {
    #[serde(default)]
    items: Vec<Rule>,
}

#[derive(Clone)]
pub struct RulesApi {
    client: ApiClient,
}

impl RulesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Every rule of one policy; the endpoint is not paginated.
    pub async fn list(&self, policy_id: &str) -> Result<Vec<Rule>, ApiError> {
        let list: RuleList = self
            .client
            .get(&format!("/policies/{}/rules", policy_id))
            .await?;
        Ok(list.items)
    }

    pub async fn get(&self, rule_id: &str) -> Result<Rule, ApiError> {
        self.client.get(&format!("/rules/{}", rule_id)).await
    }

    pub async fn create(&self, policy_id: &str, request: &CreateRuleRequest) -> Result<Rule, ApiError> {
        self.client
            .post(&format!("/policies/{}/rules", policy_id), request)
            .await
    }

    pub async fn update(&self, rule_id: &str, request: &UpdateRuleRequest) -> Result<Rule, ApiError> {
        self.client.put(&format!("/rules/{}", rule_id), request).await
    }

    pub async fn delete(&self, rule_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/rules/{}", rule_id)).await
    }
}
