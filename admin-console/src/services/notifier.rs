//! User-visible notices (toasts) raised by the transport and the view layer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please check your connection";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please sign in again";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
pub const SERVER_ERROR_MESSAGE: &str = "Server error, please try again later";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource does not exist";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn success(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Success, message));
    }

    fn info(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Info, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Warning, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Error, message));
    }
}

/// Writes notices to the log. Used by the headless binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!(level = %notice.level, "{}", notice.message),
            NoticeLevel::Warning => tracing::warn!(level = %notice.level, "{}", notice.message),
            _ => tracing::info!(level = %notice.level, "{}", notice.message),
        }
    }
}

/// Buffers notices until a view drains them.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Mutex<VecDeque<Notice>>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        notices.drain(..).collect()
    }

    pub fn snapshot(&self) -> Vec<Notice> {
        let notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        notices.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        tracing::debug!(level = %notice.level, message = %notice.message, "Notice queued");
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notice);
    }
}

pub fn operation_succeeded(operation: &str) -> String {
    format!("{} succeeded", operation)
}

pub fn operation_failed(operation: &str, error: Option<&str>) -> String {
    let reason = error
        .filter(|e| !e.is_empty())
        .unwrap_or("operation failed, please try again later");
    format!("{} failed: {}", operation, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let queue = NoticeQueue::new();
        queue.error("first");
        queue.success("second");

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Notice::new(NoticeLevel::Error, "first"));
        assert_eq!(drained[1].level, NoticeLevel::Success);
        assert!(queue.is_empty());
    }

    #[test]
    fn operation_messages() {
        assert_eq!(operation_succeeded("Delete host"), "Delete host succeeded");
        assert_eq!(
            operation_failed("Delete host", Some("host is online")),
            "Delete host failed: host is online"
        );
        assert_eq!(
            operation_failed("Delete host", None),
            "Delete host failed: operation failed, please try again later"
        );
    }
}
