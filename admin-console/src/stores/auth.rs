//! Session operations: login, logout, revalidation.

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionUser};
use crate::stores::session::SessionState;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct AuthStore {
    api: AuthApi,
    session: Arc<SessionState>,
}

impl AuthStore {
    pub fn new(api: AuthApi, session: Arc<SessionState>) -> Self {
        Self { api, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Exchange credentials for a session.
    ///
    /// Nothing is stored unless the server accepts the credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        credentials.validate()?;

        let response = self.api.login(credentials).await?;
        self.session.establish(&response.token, response.user.clone());

        tracing::info!(
            username = %response.user.username,
            role = %response.user.role,
            "Login succeeded"
        );
        Ok(response)
    }

    /// End the session. Local state is cleared even if the server call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.session.clear();
        tracing::info!("Logged out");
    }

    /// Revalidate a persisted token against the server.
    ///
    /// Never fails: an invalid token simply leaves the console logged out.
    pub async fn init_auth(&self) {
        let Some(token) = self.session.token() else {
            return;
        };

        match self.api.current_user().await {
            Ok(user) => {
                if self.session.refresh_user(&token, user) {
                    tracing::debug!("Session revalidated");
                } else {
                    tracing::debug!("Session changed during revalidation, keeping newer state");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session revalidation failed");
                self.session.expire(&token);
            }
        }
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        request.validate()?;
        self.api.change_password(request).await
    }
}
