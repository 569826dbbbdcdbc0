//! Baseline remediation: fixable findings and the fix tasks that apply them.

use super::Severity;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

/// A failed check that carries a fix command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixableItem {
    pub result_id: String,
    pub host_id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub business_line: String,
    pub rule_id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub severity: Severity,
    #[serde(default)]
    pub fix_suggestion: String,
    #[serde(default)]
    pub fix_command: String,
    #[serde(default)]
    pub actual: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub has_fix: bool,
}

/// Filters for [`FixApi::fixable_items`].
///
/// List filters go out as repeated `host_ids[]` / `severities[]` keys.
#[derive(Debug, Clone, Default)]
pub struct FixableItemsParams {
    pub host_ids: Vec<String>,
    pub business_line: Option<String>,
    pub severities: Vec<Severity>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FixableItemsParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = self
            .host_ids
            .iter()
            .map(|id| ("host_ids[]", id.clone()))
            .collect();
        query.extend(
            self.severities
                .iter()
                .map(|s| ("severities[]", severity_label(*s).to_string())),
        );
        if let Some(line) = &self.business_line {
            query.push(("business_line", line.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size", page_size.to_string()));
        }
        query
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "critical",
        Severity::High => "high",
        Severity::Medium => "medium",
        Severity::Low => "low",
    }
}

/// Selects what to fix, either by explicit `result_ids` or by the current
/// filters (`use_filters` with `host_ids`, `severities` and `business_line`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateFixTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<Severity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_filters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_line: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedFixTask {
    pub task_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixTaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixTask {
    pub task_id: String,
    #[serde(default)]
    pub host_ids: Vec<String>,
    #[serde(default)]
    pub rule_ids: Vec<String>,
    #[serde(default)]
    pub severities: Vec<String>,
    pub status: FixTaskStatus,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub success_count: i64,
    #[serde(default)]
    pub failed_count: i64,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub created_by: String,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixResultStatus {
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    pub result_id: String,
    pub task_id: String,
    pub host_id: String,
    #[serde(default)]
    pub hostname: String,
    pub rule_id: String,
    #[serde(default)]
    pub title: String,
    pub status: FixResultStatus,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fixed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixTaskHostStatus {
    pub task_id: String,
    pub host_id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    pub status: String,
    #[serde(default)]
    pub dispatched_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FixPageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct FixApi {
    client: ApiClient,
}

impl FixApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fixable_items(
        &self,
        params: &FixableItemsParams,
    ) -> Result<PaginatedResponse<FixableItem>, ApiError> {
        self.client
            .get_with_query("/fix/fixable-items", &params.to_query())
            .await
    }

    pub async fn create_task(&self, request: &CreateFixTaskRequest) -> Result<CreatedFixTask, ApiError> {
        self.client.post("/fix-tasks", request).await
    }

    pub async fn task(&self, task_id: &str) -> Result<FixTask, ApiError> {
        self.client.get(&format!("/fix-tasks/{}", task_id)).await
    }

    pub async fn tasks(&self, params: &FixPageParams) -> Result<PaginatedResponse<FixTask>, ApiError> {
        self.client.get_with_query("/fix-tasks", params).await
    }

    pub async fn results(
        &self,
        task_id: &str,
        params: &FixPageParams,
    ) -> Result<PaginatedResponse<FixResult>, ApiError> {
        self.client
            .get_with_query(&format!("/fix-tasks/{}/results", task_id), params)
            .await
    }

    pub async fn cancel_task(&self, task_id: &str) -> Result<(), ApiError> {
        self.client
            .post_unit::<serde_json::Value>(&format!("/fix-tasks/{}/cancel", task_id), None)
            .await
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/fix-tasks/{}", task_id)).await
    }

    pub async fn host_status(
        &self,
        task_id: &str,
        params: &FixPageParams,
    ) -> Result<PaginatedResponse<FixTaskHostStatus>, ApiError> {
        self.client
            .get_with_query(&format!("/fix-tasks/{}/host-status", task_id), params)
            .await
    }
}
