use thiserror::Error;

/// Failure of a call made through [`ApiClient`](crate::services::client::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Envelope `code` was neither 0 nor 401.
    #[error("{message}")]
    Business { code: i64, message: String },

    /// Envelope `code == 401` or HTTP 401.
    #[error("{message}")]
    SessionExpired { message: String },

    /// 401 on a request sent without a token, e.g. wrong sign-in credentials.
    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Flat classification of [`ApiError`] for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Business,
    AuthExpired,
    Unauthorized,
    Network,
    Server,
    NotFound,
    Forbidden,
    Http,
    Decode,
    Validation,
    Client,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Business { .. } => ErrorKind::Business,
            ApiError::SessionExpired { .. } => ErrorKind::AuthExpired,
            ApiError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Forbidden { .. } => ErrorKind::Forbidden,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::ClientBuild(_) => ErrorKind::Client,
        }
    }

    /// The server-provided (or defaulted) message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ApiError::Business { message, .. }
            | ApiError::SessionExpired { message }
            | ApiError::Unauthorized { message }
            | ApiError::Server { message, .. }
            | ApiError::NotFound { message }
            | ApiError::Forbidden { message }
            | ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Network failures are the only kind worth retrying at the caller's discretion.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_error_displays_server_message() {
        let err = ApiError::Business {
            code: 403,
            message: "no permission".to_string(),
        };
        assert_eq!(err.to_string(), "no permission");
        assert_eq!(err.message(), "no permission");
        assert_eq!(err.kind(), ErrorKind::Business);
        assert!(!err.is_transient());
    }

    #[test]
    fn status_errors_map_to_kinds() {
        let server = ApiError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(server.kind(), ErrorKind::Server);
        assert_eq!(server.message(), "bad gateway");

        let expired = ApiError::SessionExpired {
            message: "token expired".to_string(),
        };
        assert_eq!(expired.kind(), ErrorKind::AuthExpired);

        let rejected = ApiError::Unauthorized {
            message: "wrong username or password".to_string(),
        };
        assert_eq!(rejected.kind(), ErrorKind::Unauthorized);
        assert_eq!(rejected.to_string(), "wrong username or password");
    }
}
