mod defaults;

pub use defaults::Defaults;

use crate::error::{Error, Result};
use crate::media::Service;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings read from a YAML file.
///
/// ```yaml
/// radarr:
///   baseUrl: http://localhost:7878
///   apikey: 5f5e32xf3ff8463d9f1d2u88ef0fd3e8
///   rootFolderId: 1
/// sonarr:
///   baseUrl: http://localhost:8989
///   apikey: 0a1b2c3d4e5f
///   username: admin
///   password: secret
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Configuration {
    pub radarr: Option<ServerConfig>,
    pub sonarr: Option<ServerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "apikey")]
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "rootFolderId")]
    pub root_folder_id: Option<u32>,
}

impl Configuration {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    pub fn server(&self, service: Service) -> Option<&ServerConfig> {
        match service {
            Service::Radarr => self.radarr.as_ref(),
            Service::Sonarr => self.sonarr.as_ref(),
        }
    }
}

/// Connection values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Resolved connection to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub host: String,
    pub api_key: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub root_folder_id: u32,
}

impl Connection {
    /// Merge command line values over the config file section of `service`.
    pub fn resolve(
        service: Service,
        args: &ConnectionArgs,
        config: Option<&ServerConfig>,
    ) -> Result<Self> {
        let host = args
            .host
            .clone()
            .or_else(|| config.and_then(|c| c.base_url.clone()))
            .ok_or_else(|| {
                Error::Config(format!(
                    "no host for {}: pass --host or set {}.baseUrl in the config file",
                    service, service
                ))
            })?;
        let api_key = args
            .api_key
            .clone()
            .or_else(|| config.and_then(|c| c.api_key.clone()))
            .ok_or_else(|| {
                Error::Config(format!(
                    "no API key for {}: pass --api-key or set {}.apikey in the config file",
                    service, service
                ))
            })?;

        Ok(Self {
            host,
            api_key,
            username: args
                .user
                .clone()
                .or_else(|| config.and_then(|c| c.username.clone())),
            password: args
                .password
                .clone()
                .or_else(|| config.and_then(|c| c.password.clone())),
            root_folder_id: config.and_then(|c| c.root_folder_id).unwrap_or(0),
        })
    }
}
