use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessLine {
    pub id: u64,
    pub name: String,
    /// Unique short identifier hosts are tagged with.
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub host_count: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListBusinessLinesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBusinessLineRequest {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// The code is immutable once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBusinessLineRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Clone)]
pub struct BusinessLinesApi {
    client: ApiClient,
}

impl BusinessLinesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        params: &ListBusinessLinesParams,
    ) -> Result<PaginatedResponse<BusinessLine>, ApiError> {
        self.client.get_with_query("/business-lines", params).await
    }

    pub async fn get(&self, id: u64) -> Result<BusinessLine, ApiError> {
        self.client.get(&format!("/business-lines/{}", id)).await
    }

    pub async fn create(
        &self,
        request: &CreateBusinessLineRequest,
    ) -> Result<BusinessLine, ApiError> {
        self.client.post("/business-lines", request).await
    }

    pub async fn update(
        &self,
        id: u64,
        request: &UpdateBusinessLineRequest,
    ) -> Result<BusinessLine, ApiError> {
        self.client
            .put(&format!("/business-lines/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete(&format!("/business-lines/{}", id)).await
    }
}
