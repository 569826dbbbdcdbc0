use crate::error::ApiError;
use crate::models::SiteConfig;
use crate::services::client::ApiClient;
use serde::{Deserialize, Serialize};

pub const SITE_CONFIG_PATH: &str = "/system-config/site";
const KUBERNETES_IMAGE_PATH: &str = "/system-config/kubernetes-image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesImageConfig {
    pub repository: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub default_version: String,
}

#[derive(Clone)]
pub struct SystemConfigApi {
    client: ApiClient,
}

impl SystemConfigApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn site_config(&self) -> Result<SiteConfig, ApiError> {
        self.client.get(SITE_CONFIG_PATH).await
    }

    pub async fn update_site_config(&self, config: &SiteConfig) -> Result<SiteConfig, ApiError> {
        self.client.put(SITE_CONFIG_PATH, config).await
    }

    pub async fn kubernetes_image_config(&self) -> Result<KubernetesImageConfig, ApiError> {
        self.client.get(KUBERNETES_IMAGE_PATH).await
    }

    pub async fn update_kubernetes_image_config(
        &self,
        config: &KubernetesImageConfig,
    ) -> Result<KubernetesImageConfig, ApiError> {
        self.client.put(KUBERNETES_IMAGE_PATH, config).await
    }
}
