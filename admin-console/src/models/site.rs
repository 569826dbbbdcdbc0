use serde::{Deserialize, Serialize};

/// Built-in site name used until (or instead of) a server-provided one.
pub const DEFAULT_SITE_NAME: &str = "Matrix Cloud Security Platform";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub site_logo: String,
    #[serde(default)]
    pub site_domain: String,
    /// Backend address advertised to agents; empty when unset.
    #[serde(default)]
    pub backend_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_logo: String::new(),
            site_domain: String::new(),
            backend_url: String::new(),
        }
    }
}
