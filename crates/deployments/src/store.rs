//! Deployment cache in hardhat-deploy layout.
//!
//! Each deployed contract has a file `<root>/<network>/<ContractName>.json`
//! holding at least its `address`. Files written by other tooling carry many
//! more fields; unknown fields are ignored.

use alloy_primitives::{Address, Bytes, TxHash};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No deployment folder exists for the network
    #[error("Missing deployment files for network {0}")]
    MissingNetwork(String),

    /// The network folder has no file for the contract
    #[error("No {name} deployment on network {network}")]
    MissingDeployment { network: String, name: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid deployment file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A single cached deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Deployed contract address
    pub address: Address,
    /// Creation transaction hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    /// Block the creation transaction was included in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Constructor arguments, as rendered by the deploy script
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
    /// Creation bytecode without constructor arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<Bytes>,
    /// Contract ABI copied from the artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
}

impl DeploymentRecord {
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            transaction_hash: None,
            block_number: None,
            args: Vec::new(),
            bytecode: None,
            abi: None,
        }
    }

    /// Whether this record was produced from the same bytecode and arguments.
    pub fn matches(&self, bytecode: &Bytes, args: &[serde_json::Value]) -> bool {
        self.bytecode.as_ref() == Some(bytecode) && self.args == args
    }
}

/// Deployment cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct DeploymentStore {
    root: PathBuf,
}

impl DeploymentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the deployments of `network`.
    ///
    /// The in-process `hardhat` network shares the `localhost` folder.
    pub fn network_dir(&self, network: &str) -> PathBuf {
        let folder = if network == "hardhat" {
            "localhost"
        } else {
            network
        };
        self.root.join(folder)
    }

    /// All deployed addresses on `network`, keyed by contract name.
    pub fn addresses(&self, network: &str) -> Result<BTreeMap<String, Address>, StoreError> {
        let dir = self.network_dir(network);
        if !dir.is_dir() {
            return Err(StoreError::MissingNetwork(network.to_string()));
        }

        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut addresses = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();

            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let record = read_record(&path)?;
            addresses.insert(name.to_string(), record.address);
        }

        debug!(network, count = addresses.len(), "Loaded deployment addresses");

        Ok(addresses)
    }

    /// Cached deployment of `name` on `network`, if any.
    pub fn get(&self, network: &str, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        let path = self.record_path(network, name);
        if !path.is_file() {
            return Ok(None);
        }
        read_record(&path).map(Some)
    }

    /// Address of `name` on `network`.
    pub fn address(&self, network: &str, name: &str) -> Result<Address, StoreError> {
        self.get(network, name)?
            .map(|record| record.address)
            .ok_or_else(|| StoreError::MissingDeployment {
                network: network.to_string(),
                name: name.to_string(),
            })
    }

    /// Write the deployment of `name` on `network`, replacing any previous one.
    pub fn save(
        &self,
        network: &str,
        name: &str,
        record: &DeploymentRecord,
    ) -> Result<PathBuf, StoreError> {
        let dir = self.network_dir(network);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = self.record_path(network, name);
        let contents = serde_json::to_string_pretty(record).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, contents).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(network, name, path = %path.display(), "Saved deployment");

        Ok(path)
    }

    fn record_path(&self, network: &str, name: &str) -> PathBuf {
        self.network_dir(network).join(format!("{name}.json"))
    }
}

fn read_record(path: &Path) -> Result<DeploymentRecord, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, bytes};

    const OMNI_COUNTER: Address = address!("1111111111111111111111111111111111111111");
    const WEFI: Address = address!("2222222222222222222222222222222222222222");

    fn write(root: &Path, network: &str, file: &str, contents: &str) {
        let dir = root.join(network);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn test_addresses_reads_every_json_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "fuji",
            "OmniCounter.json",
            r#"{"address": "0x1111111111111111111111111111111111111111", "receipt": {"status": 1}}"#,
        );
        write(
            dir.path(),
            "fuji",
            "WeFi.json",
            r#"{"address": "0x2222222222222222222222222222222222222222", "args": ["0x0", "0"]}"#,
        );
        write(dir.path(), "fuji", ".chainId", "43113");
        fs::create_dir_all(dir.path().join("fuji/solcInputs")).unwrap();

        let store = DeploymentStore::new(dir.path());
        let addresses = store.addresses("fuji").unwrap();

        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses["OmniCounter"], OMNI_COUNTER);
        assert_eq!(addresses["WeFi"], WEFI);
    }

    #[test]
    fn test_missing_network() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeploymentStore::new(dir.path());

        let err = store.addresses("mumbai").unwrap_err();
        assert!(matches!(err, StoreError::MissingNetwork(network) if network == "mumbai"));
    }

    #[test]
    fn test_hardhat_reads_localhost() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "localhost",
            "OmniCounter.json",
            r#"{"address": "0x1111111111111111111111111111111111111111"}"#,
        );

        let store = DeploymentStore::new(dir.path());

        assert_eq!(store.address("hardhat", "OmniCounter").unwrap(), OMNI_COUNTER);
        assert_eq!(store.address("localhost", "OmniCounter").unwrap(), OMNI_COUNTER);
    }

    #[test]
    fn test_missing_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeploymentStore::new(dir.path());

        assert!(store.get("fuji", "WeFi").unwrap().is_none());
        assert!(matches!(
            store.address("fuji", "WeFi"),
            Err(StoreError::MissingDeployment { .. })
        ));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "fuji", "WeFi.json", r#"{"addr": "0x00"}"#);

        let store = DeploymentStore::new(dir.path());

        assert!(matches!(
            store.addresses("fuji"),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn test_save_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeploymentStore::new(dir.path().join("deployments"));

        let record = DeploymentRecord {
            block_number: Some(42),
            args: vec![serde_json::json!("0"), serde_json::json!(6)],
            bytecode: Some(bytes!("6080604052")),
            ..DeploymentRecord::new(WEFI)
        };
        let path = store.save("bsc-testnet", "WeFi", &record).unwrap();

        assert_eq!(path, dir.path().join("deployments/bsc-testnet/WeFi.json"));
        assert_eq!(store.get("bsc-testnet", "WeFi").unwrap(), Some(record));
        assert_eq!(store.addresses("bsc-testnet").unwrap()["WeFi"], WEFI);
    }

    #[test]
    fn test_record_matches() {
        let bytecode = bytes!("6080604052");
        let args = vec![serde_json::json!("0")];
        let record = DeploymentRecord {
            args: args.clone(),
            bytecode: Some(bytecode.clone()),
            ..DeploymentRecord::new(WEFI)
        };

        assert!(record.matches(&bytecode, &args));
        assert!(!record.matches(&bytes!("6080"), &args));
        assert!(!record.matches(&bytecode, &[]));
        assert!(!DeploymentRecord::new(WEFI).matches(&bytecode, &[]));
    }
}
