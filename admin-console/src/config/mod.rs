use console_core::config::load_settings;
use console_core::CoreError;
use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub console: ConsoleSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    /// Backend origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Versioned prefix every API path is relative to.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: default_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct StorageSettings {
    /// Session file location. Sessions are kept in memory when unset.
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Clone)]
pub struct ConsoleSettings {
    #[serde(default = "default_start_path")]
    pub start_path: String,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            start_path: default_start_path(),
            username: None,
            password: None,
        }
    }
}

fn default_start_path() -> String {
    "/dashboard".to_string()
}

pub fn get_configuration() -> Result<Settings, CoreError> {
    let base_path = std::env::current_dir()?;

    // Check if we're already in admin-console directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("admin-console") {
        base_path.join("config")
    } else {
        base_path.join("admin-console").join("config")
    };

    load_settings(&configuration_directory)
}
