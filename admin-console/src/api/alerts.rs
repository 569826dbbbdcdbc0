use super::{Severity, SeverityCounts};
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertHost {
    pub host_id: String,
    pub hostname: String,
    #[serde(default)]
    pub ip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub rule_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub result_id: String,
    pub host_id: String,
    pub rule_id: String,
    pub policy_id: String,
    pub severity: Severity,
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub fix_suggestion: Option<String>,
    pub status: AlertStatus,
    pub first_seen_at: String,
    pub last_seen_at: String,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub resolved_by: Option<String>,
    #[serde(default)]
    pub resolve_reason: Option<String>,
    #[serde(default)]
    pub host: Option<AlertHost>,
    #[serde(default)]
    pub rule: Option<AlertRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStatistics {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub active: i64,
    #[serde(default)]
    pub resolved: i64,
    #[serde(default)]
    pub ignored: i64,
    #[serde(flatten)]
    pub by_severity: SeverityCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAlertsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
}

#[derive(Serialize)]
struct ResolveBody<'a> {
    reason: Option<&'a str>,
}

#[derive(Clone)]
pub struct AlertsApi {
    client: ApiClient,
}

impl AlertsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListAlertsParams) -> Result<PaginatedResponse<Alert>, ApiError> {
        self.client.get_with_query("/alerts", params).await
    }

    pub async fn get(&self, id: i64) -> Result<Alert, ApiError> {
        self.client.get(&format!("/alerts/{}", id)).await
    }

    pub async fn statistics(&self) -> Result<AlertStatistics, ApiError> {
        self.client.get("/alerts/statistics").await
    }

    pub async fn resolve(&self, id: i64, reason: Option<&str>) -> Result<(), ApiError> {
        self.client
            .post_unit(&format!("/alerts/{}/resolve", id), Some(&ResolveBody { reason }))
            .await
    }

    pub async fn ignore(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .post_unit::<serde_json::Value>(&format!("/alerts/{}/ignore", id), None)
            .await
    }
}
