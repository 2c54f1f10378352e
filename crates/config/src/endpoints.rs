//! Per-network lookup tables.
//!
//! Both tables are plain JSON objects keyed by network name, maintained
//! outside this repository. Copies are embedded at build time and can be
//! replaced from disk via [`crate::Settings`].

use crate::ConfigError;
use alloy_primitives::Address;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

const LAYERZERO_ENDPOINTS: &str = include_str!("../data/layerzero_endpoints.json");
const ENDPOINT_IDS: &str = include_str!("../data/endpoint_ids.json");

/// Read-only mapping from network name to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkTable<V> {
    entries: BTreeMap<String, V>,
}

/// Network name → LayerZero endpoint contract address.
pub type EndpointTable = NetworkTable<Address>;

/// Network name → LayerZero chain id.
pub type EndpointIdTable = NetworkTable<u16>;

impl<V> NetworkTable<V>
where
    V: Copy + DeserializeOwned,
{
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Look up the value for `network`.
    pub fn lookup(&self, network: &str) -> Result<V, ConfigError> {
        self.entries
            .get(network)
            .copied()
            .ok_or_else(|| ConfigError::UnknownNetwork(network.to_string()))
    }

    pub fn contains(&self, network: &str) -> bool {
        self.entries.contains_key(network)
    }

    /// Network names in lexical order.
    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl EndpointTable {
    /// Endpoint addresses shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_json(LAYERZERO_ENDPOINTS).expect("embedded endpoint table is valid JSON")
    }
}

impl EndpointIdTable {
    /// Chain ids shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_json(ENDPOINT_IDS).expect("embedded endpoint id table is valid JSON")
    }
}
