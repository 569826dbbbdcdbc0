pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod stores;
pub mod utils;

use api::{
    AlertsApi, AssetsApi, AuthApi, BusinessLinesApi, ComponentsApi, DashboardApi, FixApi,
    HostsApi, NotificationsApi, PoliciesApi, PolicyGroupsApi, RulesApi, SystemConfigApi,
    TasksApi, UsersApi,
};
use config::ApiSettings;
use error::ApiError;
use router::{RouteGuard, RouteTable, Router, StaticViews, ViewLoader};
use services::{
    ApiClient, DocumentHead, DurableStorage, History, MemoryStorage, Navigator, Notifier,
    TracingNotifier,
};
use std::sync::Arc;
use stores::{AuthStore, SessionState, SiteConfigStore};

/// Shared console context wiring the transport, stores and router together.
#[derive(Clone)]
pub struct Console {
    client: ApiClient,
    session: Arc<SessionState>,
    auth: AuthStore,
    site_config: Arc<SiteConfigStore>,
    document: Arc<DocumentHead>,
    router: Router,
}

impl Console {
    pub fn builder(settings: ApiSettings) -> ConsoleBuilder {
        ConsoleBuilder::new(settings)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn site_config(&self) -> &Arc<SiteConfigStore> {
        &self.site_config
    }

    pub fn document(&self) -> &Arc<DocumentHead> {
        &self.document
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn alerts(&self) -> AlertsApi {
        AlertsApi::new(self.client.clone())
    }

    pub fn assets(&self) -> AssetsApi {
        AssetsApi::new(self.client.clone())
    }

    pub fn business_lines(&self) -> BusinessLinesApi {
        BusinessLinesApi::new(self.client.clone())
    }

    pub fn components(&self) -> ComponentsApi {
        ComponentsApi::new(self.client.clone())
    }

    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.client.clone())
    }

    pub fn fix(&self) -> FixApi {
        FixApi::new(self.client.clone())
    }

    pub fn hosts(&self) -> HostsApi {
        HostsApi::new(self.client.clone())
    }

    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.client.clone())
    }

    pub fn policies(&self) -> PoliciesApi {
        PoliciesApi::new(self.client.clone())
    }

    pub fn policy_groups(&self) -> PolicyGroupsApi {
        PolicyGroupsApi::new(self.client.clone())
    }

    pub fn rules(&self) -> RulesApi {
        RulesApi::new(self.client.clone())
    }

    pub fn system_config(&self) -> SystemConfigApi {
        SystemConfigApi::new(self.client.clone())
    }

    pub fn tasks(&self) -> TasksApi {
        TasksApi::new(self.client.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.client.clone())
    }
}

/// Builder for [`Console`]; every capability defaults to an in-process one.
pub struct ConsoleBuilder {
    settings: ApiSettings,
    storage: Option<Arc<dyn DurableStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    views: Option<Arc<dyn ViewLoader>>,
    routes: Option<RouteTable>,
}

impl ConsoleBuilder {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            settings,
            storage: None,
            notifier: None,
            navigator: None,
            views: None,
            routes: None,
        }
    }

    pub fn storage(mut self, storage: Arc<dyn DurableStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn views(mut self, views: Arc<dyn ViewLoader>) -> Self {
        self.views = Some(views);
        self
    }

    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn build(self) -> Result<Console, ApiError> {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(History::new()));
        let views = self.views.unwrap_or_else(|| Arc::new(StaticViews));

        let session = Arc::new(SessionState::hydrate(storage));
        let client = ApiClient::new(&self.settings, session.clone(), notifier, navigator.clone())?;

        let document = Arc::new(DocumentHead::new());
        let auth = AuthStore::new(AuthApi::new(client.clone()), session.clone());
        let site_config = Arc::new(SiteConfigStore::new(
            SystemConfigApi::new(client.clone()),
            document.clone(),
        ));

        let guard = RouteGuard::new(auth.clone(), site_config.clone(), document.clone());
        let router = Router::new(
            self.routes.unwrap_or_default(),
            guard,
            views,
            navigator,
        );

        Ok(Console {
            client,
            session,
            auth,
            site_config,
            document,
            router,
        })
    }
}
