pub mod auth;
pub mod session;
pub mod site_config;

pub use auth::AuthStore;
pub use session::SessionState;
pub use site_config::{ConfigSignal, SiteConfigStore};
