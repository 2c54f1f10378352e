//! Settings file.
//!
//! ```toml
//! deployments_dir = "deployments"
//! artifacts_dir = "artifacts"
//!
//! [networks.fuji]
//! rpc_url = "https://api.avax-test.network/ext/bc/C/rpc"
//! ```

use crate::{ConfigError, EndpointIdTable, EndpointTable};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, path::PathBuf};

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Deployment cache root (`<dir>/<network>/<Contract>.json`)
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: PathBuf,

    /// Compiled contract artifacts root
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Replacement for the built-in endpoint address table
    #[serde(default)]
    pub endpoints_file: Option<PathBuf>,

    /// Replacement for the built-in endpoint id table
    #[serde(default)]
    pub endpoint_ids_file: Option<PathBuf>,

    /// Per-network RPC settings
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkSettings>,
}

/// RPC settings for a single network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// RPC endpoint url
    pub rpc_url: String,
}

fn default_deployments_dir() -> PathBuf {
    PathBuf::from("deployments")
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&contents)?;

        // Relative paths are resolved against the settings file.
        if let Some(base) = path.parent() {
            settings.rebase(base);
        }

        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        join(&mut self.deployments_dir);
        join(&mut self.artifacts_dir);
        if let Some(p) = self.endpoints_file.as_mut() {
            join(p);
        }
        if let Some(p) = self.endpoint_ids_file.as_mut() {
            join(p);
        }
    }

    /// RPC settings for `network`.
    pub fn network(&self, network: &str) -> Result<&NetworkSettings, ConfigError> {
        self.networks
            .get(network)
            .ok_or_else(|| ConfigError::UnconfiguredNetwork(network.to_string()))
    }

    /// Endpoint address table, from `endpoints_file` if set.
    pub fn endpoints(&self) -> Result<EndpointTable, ConfigError> {
        match &self.endpoints_file {
            Some(path) => EndpointTable::from_file(path),
            None => Ok(EndpointTable::builtin()),
        }
    }

    /// Endpoint id table, from `endpoint_ids_file` if set.
    pub fn endpoint_ids(&self) -> Result<EndpointIdTable, ConfigError> {
        match &self.endpoint_ids_file {
            Some(path) => EndpointIdTable::from_file(path),
            None => Ok(EndpointIdTable::builtin()),
        }
    }
}
