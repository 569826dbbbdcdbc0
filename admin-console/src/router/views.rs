use crate::router::routes::MatchedRoute;
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

/// A page that finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: &'static str,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ViewLoadError {
    /// The view's code could not be fetched; navigation falls back to the error page.
    #[error("Failed to fetch view module: {0}")]
    ModuleFetch(String),

    #[error("Failed to render view {name}: {reason}")]
    Render { name: String, reason: String },
}

/// Lazily loads the page behind a matched route.
#[async_trait]
pub trait ViewLoader: Send + Sync {
    async fn load(&self, route: &MatchedRoute<'_>) -> Result<View, ViewLoadError>;
}

/// Loader for views that are always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticViews;

#[async_trait]
impl ViewLoader for StaticViews {
    async fn load(&self, route: &MatchedRoute<'_>) -> Result<View, ViewLoadError> {
        tracing::debug!(view = route.route.name, path = %route.path, "Loading view");
        Ok(View {
            name: route.route.name,
            path: route.path.clone(),
            params: route.params.clone(),
        })
    }
}
