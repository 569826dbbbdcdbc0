use std::sync::{PoisonError, RwLock};

/// Capability to move the console to another location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// In-memory location history.
///
/// Navigating to the current location is a no-op, so repeated redirects to
/// the same target are idempotent.
#[derive(Debug, Default)]
pub struct History {
    entries: RwLock<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.last().map(String::as_str) == Some(path) {
            tracing::debug!(path = %path, "Already at location");
            return;
        }
        tracing::info!(path = %path, "Navigating");
        entries.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_navigation_is_idempotent() {
        let history = History::new();
        history.navigate("/login");
        history.navigate("/login");
        history.navigate("/dashboard");

        assert_eq!(history.entries(), vec!["/login", "/dashboard"]);
        assert_eq!(history.current().as_deref(), Some("/dashboard"));
    }
}
