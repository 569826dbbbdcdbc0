use crate::error::ApiError;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub database: ComponentHealth,
    pub agentcenter: ComponentHealth,
    pub manager: ComponentHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRisk {
    pub name: String,
    pub critical: i64,
    pub medium: i64,
    pub low: i64,
}

/// Dashboard headline numbers. The backend emits camelCase here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub hosts: i64,
    pub clusters: i64,
    pub containers: i64,
    pub online_agents: i64,
    pub offline_agents: i64,
    pub online_agents_change: Option<f64>,
    pub offline_agents_change: Option<f64>,
    pub pending_alerts: i64,
    pub pending_vulnerabilities: i64,
    pub vuln_db_update_time: String,
    pub hot_patch_count: Option<i64>,
    pub baseline_fail_count: i64,
    pub baseline_hardening_percent: f64,
    pub baseline_risks: Option<Vec<BaselineRisk>>,
    pub avg_cpu_usage: Option<f64>,
    pub avg_memory_usage: Option<f64>,
    pub service_status: Option<ServiceStatus>,
}

#[derive(Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/dashboard/stats").await
    }
}
