use crate::router::routes::{Access, RouteDef, HOME_PATH, LOGIN_PATH};
use crate::services::document::DocumentHead;
use crate::stores::{AuthStore, SiteConfigStore};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// Runs before every navigation: branding, page title and access control.
#[derive(Clone)]
pub struct RouteGuard {
    auth: AuthStore,
    site: Arc<SiteConfigStore>,
    head: Arc<DocumentHead>,
}

impl RouteGuard {
    pub fn new(auth: AuthStore, site: Arc<SiteConfigStore>, head: Arc<DocumentHead>) -> Self {
        Self { auth, site, head }
    }

    pub async fn before_each(&self, route: &RouteDef) -> GuardDecision {
        if self.site.needs_init() {
            self.site.init().await;
        }

        let site_name = self.site.site_name();
        match route.title {
            Some(title) => self.head.set_title(format!("{} - {}", title, site_name)),
            None => self.head.set_title(site_name),
        }

        match route.access {
            Access::Public if self.auth.is_authenticated() => {
                tracing::debug!(route = route.name, "Already signed in, leaving public route");
                GuardDecision::Redirect(HOME_PATH)
            }
            Access::Public | Access::Any => GuardDecision::Proceed,
            Access::Protected => {
                if !self.auth.is_authenticated() {
                    tracing::debug!(route = route.name, "Not signed in, redirecting to login");
                    return GuardDecision::Redirect(LOGIN_PATH);
                }

                self.auth.init_auth().await;
                if self.auth.is_authenticated() {
                    GuardDecision::Proceed
                } else {
                    tracing::info!(route = route.name, "Session did not survive revalidation");
                    GuardDecision::Redirect(LOGIN_PATH)
                }
            }
        }
    }
}
