//! Configuration for omnichain deployments.
//!
//! This crate provides:
//! - Static per-network lookup tables (LayerZero endpoint addresses and chain ids)
//! - The TOML settings file describing RPC endpoints and on-disk locations

pub mod endpoints;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

pub use endpoints::{EndpointIdTable, EndpointTable, NetworkTable};
pub use settings::{NetworkSettings, Settings};

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The network has no entry in a lookup table
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// The network has no `[networks.<name>]` section in the settings file
    #[error("Network {0} is not configured")]
    UnconfiguredNetwork(String),

    /// Error reading a configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON lookup table
    #[error("Invalid lookup table: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed settings file
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}
