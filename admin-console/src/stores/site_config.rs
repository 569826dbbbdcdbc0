//! Cached site branding, kept in sync with the server and the document head.

use crate::api::SystemConfigApi;
use crate::models::site::{SiteConfig, DEFAULT_SITE_NAME};
use crate::services::document::DocumentHead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tokio::sync::broadcast;

const SIGNAL_CAPACITY: usize = 16;

/// Handle used by other components to announce that site settings changed.
#[derive(Clone)]
pub struct ConfigSignal {
    sender: broadcast::Sender<()>,
}

impl ConfigSignal {
    pub fn notify_updated(&self) {
        // No receiver just means the store has not been initialized yet.
        let _ = self.sender.send(());
    }
}

pub struct SiteConfigStore {
    api: SystemConfigApi,
    config: RwLock<SiteConfig>,
    head: Arc<DocumentHead>,
    updates: broadcast::Sender<()>,
    listening: AtomicBool,
}

impl SiteConfigStore {
    pub fn new(api: SystemConfigApi, head: Arc<DocumentHead>) -> Self {
        let (updates, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            api,
            config: RwLock::new(SiteConfig::default()),
            head,
            updates,
            listening: AtomicBool::new(false),
        }
    }

    pub fn signal(&self) -> ConfigSignal {
        ConfigSignal {
            sender: self.updates.clone(),
        }
    }

    /// Load the config and start reloading on every update signal.
    ///
    /// The listener is registered once per store, however often `init` runs.
    pub async fn init(self: &Arc<Self>) {
        if !self.listening.swap(true, Ordering::SeqCst) {
            let receiver = self.updates.subscribe();
            tokio::spawn(listen_for_updates(Arc::downgrade(self), receiver));
        }
        self.load_config().await;
    }

    pub async fn load_config(&self) {
        let loaded = match self.api.site_config().await {
            Ok(config) => {
                tracing::debug!(site_name = %config.site_name, "Site config loaded");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load site config, using defaults");
                SiteConfig::default()
            }
        };
        self.update_config(loaded);
    }

    /// Replace the cached config and refresh the document head.
    pub fn update_config(&self, config: SiteConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        self.refresh_head();
    }

    pub fn needs_init(&self) -> bool {
        let config = self.read();
        config.site_name.is_empty() || config.site_name == DEFAULT_SITE_NAME
    }

    pub fn site_name(&self) -> String {
        let config = self.read();
        if config.site_name.is_empty() {
            DEFAULT_SITE_NAME.to_string()
        } else {
            config.site_name.clone()
        }
    }

    pub fn site_logo(&self) -> String {
        self.read().site_logo.clone()
    }

    pub fn site_domain(&self) -> String {
        self.read().site_domain.clone()
    }

    pub fn config(&self) -> SiteConfig {
        self.read().clone()
    }

    fn refresh_head(&self) {
        self.head.set_title(self.site_name());
        let logo = self.site_logo();
        if !logo.is_empty() {
            self.head.set_icon(logo);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SiteConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn listen_for_updates(store: Weak<SiteConfigStore>, mut receiver: broadcast::Receiver<()>) {
    loop {
        match receiver.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                let Some(store) = store.upgrade() else {
                    break;
                };
                tracing::debug!("Site config update signalled, reloading");
                store.load_config().await;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::debug!("Site config listener stopped");
}
