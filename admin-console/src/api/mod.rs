//! Typed wrappers over the backend's REST resources.
//!
//! Every call goes through [`ApiClient`](crate::services::client::ApiClient),
//! so envelope unwrapping, notices and session expiry apply uniformly.

pub mod alerts;
pub mod assets;
pub mod auth;
pub mod business_lines;
pub mod components;
pub mod dashboard;
pub mod fix;
pub mod hosts;
pub mod notifications;
pub mod policies;
pub mod policy_groups;
pub mod rules;
pub mod system_config;
pub mod tasks;
pub mod users;

pub use alerts::AlertsApi;
pub use assets::AssetsApi;
pub use auth::AuthApi;
pub use business_lines::BusinessLinesApi;
pub use components::ComponentsApi;
pub use dashboard::DashboardApi;
pub use fix::FixApi;
pub use hosts::HostsApi;
pub use notifications::NotificationsApi;
pub use policies::PoliciesApi;
pub use policy_groups::PolicyGroupsApi;
pub use rules::RulesApi;
pub use system_config::SystemConfigApi;
pub use tasks::TasksApi;
pub use users::UsersApi;

use serde::{Deserialize, Serialize};

/// Finding severity shared by alerts, rules and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Severity-bucketed counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: i64,
    #[serde(default)]
    pub high: i64,
    #[serde(default)]
    pub medium: i64,
    #[serde(default)]
    pub low: i64,
}
