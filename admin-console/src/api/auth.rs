use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionUser};
use crate::services::client::ApiClient;

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.post("/auth/login", request).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client
            .post_unit::<serde_json::Value>("/auth/logout", None)
            .await
    }

    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.client.get("/auth/me").await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.client
            .post_unit("/auth/change-password", Some(request))
            .await
    }
}
