use super::Severity;
use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyCategory {
    BaselineAlert,
    AgentOffline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Lark,
    Webhook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyScope {
    Global,
    HostTags,
    BusinessLine,
    Specified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub webhook_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeValue {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub business_lines: Vec<String>,
    #[serde(default)]
    pub host_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub notify_category: NotifyCategory,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub channel: ChannelType,
    /// Only meaningful for baseline alerts.
    #[serde(default)]
    pub severities: Vec<Severity>,
    pub scope: NotifyScope,
    /// JSON-encoded [`ScopeValue`], as stored by the backend.
    #[serde(default)]
    pub scope_value: Option<String>,
    #[serde(default)]
    pub frontend_url: Option<String>,
    pub config: ChannelConfig,
    pub created_at: String,
    pub updated_at: String,
}

impl Notification {
    pub fn parsed_scope(&self) -> Option<ScopeValue> {
        self.scope_value
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListNotificationsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateNotificationRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub notify_category: NotifyCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub channel: ChannelType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub severities: Vec<Severity>,
    pub scope: NotifyScope,
    pub scope_value: ScopeValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,
    pub config: ChannelConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNotificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_category: Option<NotifyCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<Severity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<NotifyScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_value: Option<ScopeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ChannelConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestNotificationRequest {
    #[serde(rename = "type")]
    pub channel: ChannelType,
    pub config: ChannelConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,
    /// When set, the backend renders the full alert template of that notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,
}

#[derive(Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        params: &ListNotificationsParams,
    ) -> Result<PaginatedResponse<Notification>, ApiError> {
        self.client.get_with_query("/notifications", params).await
    }

    pub async fn get(&self, id: i64) -> Result<Notification, ApiError> {
        self.client.get(&format!("/notifications/{}", id)).await
    }

    pub async fn create(&self, request: &CreateNotificationRequest) -> Result<Notification, ApiError> {
        self.client.post("/notifications", request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateNotificationRequest,
    ) -> Result<Notification, ApiError> {
        self.client
            .put(&format!("/notifications/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/notifications/{}", id)).await
    }

    pub async fn test(&self, request: &TestNotificationRequest) -> Result<(), ApiError> {
        self.client
            .post_unit("/notifications/test", Some(request))
            .await
    }
}
