use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Identity cached alongside the session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn initials(&self) -> String {
        let initials: String = self.username.chars().take(2).collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials.to_uppercase()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Serialize, Clone, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "old password is required"))]
    pub old_password: String,
    #[validate(length(min = 1, message = "new password is required"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_debug_hides_password() {
        let request = LoginRequest::new("alice", "hunter2");
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn empty_credentials_fail_validation() {
        assert!(LoginRequest::new("", "x").validate().is_err());
        assert!(LoginRequest::new("alice", "").validate().is_err());
        assert!(LoginRequest::new("alice", "x").validate().is_ok());
    }

    #[test]
    fn initials_from_username() {
        let user = SessionUser {
            username: "alice".to_string(),
            role: "admin".to_string(),
        };
        assert_eq!(user.initials(), "AL");
        assert!(user.is_admin());
    }
}
