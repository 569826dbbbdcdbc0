//! Client-side navigation: resolve, guard, then load the view.

pub mod guard;
pub mod routes;
pub mod views;

pub use guard::{GuardDecision, RouteGuard};
pub use routes::{Access, MatchedRoute, Resolution, RouteDef, RouteTable};
pub use views::{StaticViews, View, ViewLoadError, ViewLoader};

use crate::services::navigator::Navigator;
use routes::SERVER_ERROR_PATH;
use std::sync::Arc;
use thiserror::Error;

/// Upper bound on redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Too many redirects while navigating to {0}")]
    RedirectLoop(String),

    #[error(transparent)]
    View(#[from] ViewLoadError),
}

#[derive(Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    guard: RouteGuard,
    views: Arc<dyn ViewLoader>,
    navigator: Arc<dyn Navigator>,
}

impl Router {
    pub fn new(
        table: RouteTable,
        guard: RouteGuard,
        views: Arc<dyn ViewLoader>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            table: Arc::new(table),
            guard,
            views,
            navigator,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, following route and guard redirects.
    ///
    /// The location actually reached is pushed to the navigator.
    pub async fn navigate(&self, path: &str) -> Result<View, NavigationError> {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let matched = match self.table.resolve(&target) {
                Resolution::Matched(matched) => matched,
                Resolution::Redirect(to) => {
                    tracing::debug!(from = %target, to = %to, "Route redirect");
                    target = to;
                    continue;
                }
            };

            if let GuardDecision::Redirect(to) = self.guard.before_each(matched.route).await {
                tracing::debug!(from = %target, to = %to, "Guard redirect");
                target = to.to_string();
                continue;
            }

            match self.views.load(&matched).await {
                Ok(view) => {
                    self.navigator.navigate(&target);
                    return Ok(view);
                }
                Err(ViewLoadError::ModuleFetch(reason)) if matched.path != SERVER_ERROR_PATH => {
                    tracing::error!(path = %matched.path, reason = %reason, "View module failed to load");
                    target = SERVER_ERROR_PATH.to_string();
                }
                Err(e) => {
                    tracing::error!(path = %matched.path, error = %e, "View failed to load");
                    return Err(e.into());
                }
            }
        }

        tracing::error!(path = %path, "Navigation exceeded redirect limit");
        Err(NavigationError::RedirectLoop(path.to_string()))
    }
}
