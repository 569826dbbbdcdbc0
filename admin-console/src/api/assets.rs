//! Per-host asset inventories collected by the agents.

use crate::error::ApiError;
use crate::models::PaginatedResponse;
use crate::services::client::ApiClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub host_id: String,
    pub pid: String,
    #[serde(default)]
    pub ppid: String,
    #[serde(default)]
    pub cmdline: String,
    #[serde(default)]
    pub exe: String,
    #[serde(default)]
    pub exe_hash: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub gid: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub groupname: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub host_id: String,
    /// `tcp` or `udp`.
    pub protocol: String,
    pub port: u16,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pid: Option<String>,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetUser {
    pub id: String,
    pub host_id: String,
    pub username: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub gid: String,
    #[serde(default)]
    pub groupname: Option<String>,
    #[serde(default)]
    pub home_dir: String,
    #[serde(default)]
    pub shell: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub has_password: bool,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Software {
    pub id: String,
    pub host_id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    /// rpm, deb, pip, npm, jar and so on.
    pub package_type: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub install_time: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub host_id: String,
    pub container_id: String,
    #[serde(default)]
    pub container_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub host_id: String,
    pub app_type: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub config_path: Option<String>,
    #[serde(default)]
    pub data_path: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetInterface {
    pub id: String,
    pub host_id: String,
    pub interface_name: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ipv4_addresses: Vec<String>,
    #[serde(default)]
    pub ipv6_addresses: Vec<String>,
    #[serde(default)]
    pub mtu: Option<u32>,
    #[serde(default)]
    pub state: Option<String>,
    pub collected_at: String,
}

/// Sizes are in bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub host_id: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub mount_point: Option<String>,
    #[serde(default)]
    pub file_system: Option<String>,
    #[serde(default)]
    pub total_size: Option<u64>,
    #[serde(default)]
    pub used_size: Option<u64>,
    #[serde(default)]
    pub available_size: Option<u64>,
    #[serde(default)]
    pub usage_percent: Option<f64>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kmod {
    pub id: String,
    pub host_id: String,
    pub module_name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub used_by: Option<u32>,
    #[serde(default)]
    pub state: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub host_id: String,
    pub service_name: String,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    pub collected_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cron {
    pub id: String,
    pub host_id: String,
    pub user: String,
    pub schedule: String,
    pub command: String,
    #[serde(default)]
    pub cron_type: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    pub collected_at: String,
}

/// Filters for the inventory listings.
///
/// `host_id` and paging apply everywhere; each remaining filter is honored
/// only by the listing it belongs to (`protocol` by ports, `package_type` by
/// software, `runtime` by containers, `status` by containers and services,
/// `app_type` by apps, `service_type` by services, `user` and `cron_type` by
/// cron jobs).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAssetsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_type: Option<String>,
}

impl ListAssetsParams {
    pub fn for_host(host_id: impl Into<String>) -> Self {
        Self {
            host_id: Some(host_id.into()),
            ..Self::default()
        }
    }
}

/// Inventory totals for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStatistics {
    pub processes: i64,
    pub ports: i64,
    pub users: i64,
    pub containers: i64,
    pub packages: i64,
    pub services: i64,
    pub cron: i64,
}

#[derive(Clone)]
pub struct AssetsApi {
    client: ApiClient,
}

impl AssetsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<T>, ApiError> {
        self.client.get_with_query(path, params).await
    }

    pub async fn processes(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<Process>, ApiError> {
        self.list("/assets/processes", params).await
    }

    pub async fn ports(&self, params: &ListAssetsParams) -> Result<PaginatedResponse<Port>, ApiError> {
        self.list("/assets/ports", params).await
    }

    pub async fn users(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<AssetUser>, ApiError> {
        self.list("/assets/users", params).await
    }

    pub async fn software(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<Software>, ApiError> {
        self.list("/assets/software", params).await
    }

    pub async fn containers(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<Container>, ApiError> {
        self.list("/assets/containers", params).await
    }

    pub async fn apps(&self, params: &ListAssetsParams) -> Result<PaginatedResponse<App>, ApiError> {
        self.list("/assets/apps", params).await
    }

    pub async fn network_interfaces(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<NetInterface>, ApiError> {
        self.list("/assets/network-interfaces", params).await
    }

    pub async fn volumes(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<Volume>, ApiError> {
        self.list("/assets/volumes", params).await
    }

    pub async fn kmods(&self, params: &ListAssetsParams) -> Result<PaginatedResponse<Kmod>, ApiError> {
        self.list("/assets/kmods", params).await
    }

    pub async fn services(
        &self,
        params: &ListAssetsParams,
    ) -> Result<PaginatedResponse<Service>, ApiError> {
        self.list("/assets/services", params).await
    }

    pub async fn crons(&self, params: &ListAssetsParams) -> Result<PaginatedResponse<Cron>, ApiError> {
        self.list("/assets/crons", params).await
    }

    /// Totals of every inventory on `host_id`, fetched concurrently.
    ///
    /// A listing that fails counts as 0 rather than failing the whole call.
    pub async fn statistics(&self, host_id: &str) -> AssetStatistics {
        let params = ListAssetsParams {
            page: Some(1),
            page_size: Some(1),
            ..ListAssetsParams::for_host(host_id)
        };

        let (processes, ports, users, containers, packages, services, cron) = tokio::join!(
            self.processes(&params),
            self.ports(&params),
            self.users(&params),
            self.containers(&params),
            self.software(&params),
            self.services(&params),
            self.crons(&params),
        );

        AssetStatistics {
            processes: total_or_zero(processes),
            ports: total_or_zero(ports),
            users: total_or_zero(users),
            containers: total_or_zero(containers),
            packages: total_or_zero(packages),
            services: total_or_zero(services),
            cron: total_or_zero(cron),
        }
    }
}

fn total_or_zero<T>(result: Result<PaginatedResponse<T>, ApiError>) -> i64 {
    match result {
        Ok(page) => page.total,
        Err(e) => {
            tracing::debug!(error = %e, "Asset total unavailable");
            0
        }
    }
}
