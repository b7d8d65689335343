//! Configuration for the dashboard client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the invoice service API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// API version woven into every endpoint namespace
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Key the Zoho connector token is stored under
    #[serde(default = "default_service_provider_key")]
    pub service_provider_key: String,
    /// Optional JSON credential store path; no token header is sent without it
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            service_provider_key: default_service_provider_key(),
            credentials_path: None,
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_service_provider_key() -> String {
    "zoho_service_provider".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DashboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
