use super::hosts::RuntimeType;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Manual,
    Scheduled,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    All,
    HostIds,
    OsFamily,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_family: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTask {
    pub task_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub target_type: TargetType,
    #[serde(default)]
    pub target_config: TargetConfig,
    #[serde(default)]
    pub target_hosts: Vec<String>,
    #[serde(default)]
    pub matched_host_count: Option<i64>,
    #[serde(default)]
    pub total_host_count: Option<i64>,
    #[serde(default)]
    pub policy_id: String,
    #[serde(default)]
    pub rule_ids: Vec<String>,
    pub status: TaskStatus,
    pub created_at: String,
    #[serde(default)]
    pub executed_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListTasksParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskTargets {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_family: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_type: Option<RuntimeType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub targets: TaskTargets,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policy_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct TasksApi {
    client: ApiClient,
}

impl TasksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &ListTasksParams) -> Result<PaginatedResponse<ScanTask>, ApiError> {
        self.client.get_with_query("/tasks", params).await
    }

    pub async fn get(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        self.client.get(&format!("/tasks/{}", task_id)).await
    }

    pub async fn create(&self, request: &CreateTaskRequest) -> Result<ScanTask, ApiError> {
        self.client.post("/tasks", request).await
    }

    pub async fn run(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        self.client.post_empty(&format!("/tasks/{}/run", task_id)).await
    }

    pub async fn cancel(&self, task_id: &str) -> Result<ScanTask, ApiError> {
        self.client
            .post_empty(&format!("/tasks/{}/cancel", task_id))
            .await
    }

    pub async fn delete(&self, task_id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("/tasks/{}", task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_wire_field_names() {
        let request = CreateTaskRequest {
            name: "nightly".to_string(),
            task_type: TaskType::Manual,
            targets: TaskTargets {
                target_type: TargetType::HostIds,
                host_ids: Some(vec!["h1".to_string()]),
                os_family: None,
                runtime_type: Some(RuntimeType::Vm),
            },
            policy_ids: vec!["p1".to_string()],
            rule_ids: Vec::new(),
            schedule: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "name": "nightly",
                "type": "manual",
                "targets": {"type": "host_ids", "host_ids": ["h1"], "runtime_type": "vm"},
                "policy_ids": ["p1"]
            })
        );
    }
}
