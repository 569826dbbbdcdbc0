//! Envelope-aware HTTP transport shared by every resource API.
//!
//! Attaches the session token, unwraps `{code, message, data}` and maps every
//! failure to exactly one notice plus an [`ApiError`]. Authentication
//! failures tear the session down and redirect to the login route once per
//! token, however many requests observe them concurrently.

use crate::config::ApiSettings;
use crate::error::ApiError;
use crate::models::envelope::{Envelope, CODE_OK, CODE_UNAUTHORIZED};
use crate::router::routes::LOGIN_PATH;
use crate::services::metrics::record_api_call;
use crate::services::navigator::Navigator;
use crate::services::notifier::{
    Notifier, DEFAULT_FAILURE_MESSAGE, FORBIDDEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
    NETWORK_ERROR_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE,
};
use crate::stores::session::SessionState;
use console_core::observability::inject_trace_headers;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionState>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        settings: &ApiSettings,
        session: Arc<SessionState>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ApiError::ClientBuild)?;

        let base_url = format!(
            "{}/{}",
            settings.base_url.trim_end_matches('/'),
            settings.prefix.trim_matches('/')
        );
        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::debug!(base_url = %base_url, "API client configured");

        Ok(Self {
            client,
            base_url,
            session,
            notifier,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, |rb| rb).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(Method::GET, path, |rb| rb.query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, |rb| rb.json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, |rb| rb).await
    }

    /// POST whose `data` the caller does not need.
    pub async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.request::<IgnoredAny>(Method::POST, path, |rb| match body {
            Some(body) => rb.json(body),
            None => rb,
        })
        .await
        .map(|_| ())
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, |rb| rb.json(body)).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::PUT, path, |rb| rb).await
    }

    pub async fn put_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.request::<IgnoredAny>(Method::PUT, path, |rb| rb.json(body))
            .await
            .map(|_| ())
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, |rb| rb.json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request::<IgnoredAny>(Method::DELETE, path, |rb| rb)
            .await
            .map(|_| ())
    }

    /// Dispatch one request and normalize the response.
    ///
    /// `attach` adds the query and/or body to the prepared builder.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        attach: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request_id = Uuid::new_v4().to_string();
        let sent_token = self.session.token();
        let started = Instant::now();

        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, Some(&request_id));

        let mut builder = attach(self.client.request(method.clone(), &url).headers(headers));
        if let Some(token) = sent_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            authenticated = sent_token.is_some(),
            "Sending API request"
        );

        let outcome = match builder.send().await {
            Ok(response) => {
                let status = response.status();
                match response.bytes().await {
                    Ok(body) if status.is_success() => {
                        self.unwrap_envelope(&body, sent_token.as_deref())
                    }
                    Ok(body) => Err(self.http_failure(status, &body, sent_token.as_deref())),
                    Err(e) => Err(self.network_failure(&url, e)),
                }
            }
            Err(e) => Err(self.network_failure(&url, e)),
        };

        let label = match &outcome {
            Ok(_) => "ok",
            Err(e) => outcome_label(e),
        };
        record_api_call(method.as_str(), label, started.elapsed());

        outcome
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        body: &[u8],
        sent_token: Option<&str>,
    ) -> Result<T, ApiError> {
        let envelope: Envelope = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(error = %e, "Response is not a valid envelope");
                self.notifier.error(DEFAULT_FAILURE_MESSAGE);
                return Err(ApiError::Decode(e.to_string()));
            }
        };

        match envelope.code {
            CODE_OK => serde_json::from_value(envelope.data).map_err(|e| {
                tracing::error!(error = %e, "Response data does not match expected type");
                self.notifier.error(DEFAULT_FAILURE_MESSAGE);
                ApiError::Decode(e.to_string())
            }),
            CODE_UNAUTHORIZED => {
                tracing::warn!(code = envelope.code, message = ?envelope.message(), "API rejected credentials");
                Err(self.unauthorized(sent_token, envelope.message().map(str::to_string)))
            }
            code => {
                let message = envelope
                    .message()
                    .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                    .to_string();
                tracing::error!(code, message = %message, "API business error");
                self.notifier.error(&message);
                Err(ApiError::Business { code, message })
            }
        }
    }

    fn http_failure(&self, status: StatusCode, body: &[u8], sent_token: Option<&str>) -> ApiError {
        let server_message = serde_json::from_slice::<Envelope>(body)
            .ok()
            .and_then(|envelope| envelope.message().map(str::to_string));
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(status = %status, message = ?server_message, "HTTP 401");
            return self.unauthorized(sent_token, server_message);
        }

        let message = server_message
            .unwrap_or_else(|| format!("{} ({})", DEFAULT_FAILURE_MESSAGE, status.as_u16()));

        tracing::error!(status = %status, message = %message, "HTTP error");

        match status.as_u16() {
            code @ 500.. => {
                self.notifier.error(SERVER_ERROR_MESSAGE);
                ApiError::Server {
                    status: code,
                    message,
                }
            }
            404 => {
                self.notifier.error(NOT_FOUND_MESSAGE);
                ApiError::NotFound { message }
            }
            403 => {
                self.notifier.error(FORBIDDEN_MESSAGE);
                ApiError::Forbidden { message }
            }
            code => {
                self.notifier.error(&message);
                ApiError::Http {
                    status: code,
                    message,
                }
            }
        }
    }

    fn network_failure(&self, url: &str, error: reqwest::Error) -> ApiError {
        tracing::error!(url = %url, error = %error, timeout = error.is_timeout(), "Network error");
        self.notifier.error(NETWORK_ERROR_MESSAGE);
        ApiError::Network(error)
    }

    /// Handle a 401 from either the envelope or the HTTP status.
    ///
    /// With a token this is an expired session. Without one the credentials
    /// themselves were refused, so the server's message is shown and the
    /// session is left alone.
    fn unauthorized(&self, sent_token: Option<&str>, server_message: Option<String>) -> ApiError {
        match sent_token {
            Some(token) => {
                self.expire_session(token);
                ApiError::SessionExpired {
                    message: server_message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
                }
            }
            None => {
                let message =
                    server_message.unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string());
                self.notifier.error(&message);
                ApiError::Unauthorized { message }
            }
        }
    }

    /// Tear down the session that issued a rejected request.
    ///
    /// Only the caller that actually clears the session notifies and
    /// redirects.
    fn expire_session(&self, token: &str) {
        if self.session.expire(token) {
            tracing::warn!("Session expired, redirecting to login");
            self.notifier.warning(SESSION_EXPIRED_MESSAGE);
            self.navigator.navigate(LOGIN_PATH);
        } else {
            tracing::debug!("Session already expired or replaced");
        }
    }
}

fn outcome_label(error: &ApiError) -> &'static str {
    match error {
        ApiError::Business { .. } => "business_error",
        ApiError::SessionExpired { .. } => "session_expired",
        ApiError::Unauthorized { .. } => "unauthorized",
        ApiError::Network(_) => "network_error",
        ApiError::Server { .. } => "server_error",
        ApiError::NotFound { .. } => "not_found",
        ApiError::Forbidden { .. } => "forbidden",
        ApiError::Http { .. } => "http_error",
        ApiError::Decode(_) => "decode_error",
        ApiError::Validation(_) => "validation_error",
        ApiError::ClientBuild(_) => "client_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::navigator::History;
    use crate::services::notifier::NoticeQueue;
    use crate::services::storage::MemoryStorage;

    fn client_for(base_url: &str, prefix: &str) -> ApiClient {
        let settings = ApiSettings {
            base_url: base_url.to_string(),
            prefix: prefix.to_string(),
            timeout_secs: 5,
        };
        let session = Arc::new(SessionState::hydrate(Arc::new(MemoryStorage::new())));
        ApiClient::new(
            &settings,
            session,
            Arc::new(NoticeQueue::new()),
            Arc::new(History::new()),
        )
        .unwrap()
    }

    #[test]
    fn joins_base_url_prefix_and_path() {
        let client = client_for("http://localhost:8080/", "/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(client.url("/hosts"), "http://localhost:8080/api/v1/hosts");
        assert_eq!(client.url("hosts/h1"), "http://localhost:8080/api/v1/hosts/h1");
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let client = client_for("http://localhost:8080", "");
        assert_eq!(client.url("/auth/me"), "http://localhost:8080/auth/me");
    }
}
