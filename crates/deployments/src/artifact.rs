//! Compiled contract artifacts.
//!
//! Artifacts are located by contract name anywhere below the artifacts root,
//! so both the hardhat layout (`artifacts/contracts/WeFi.sol/WeFi.json`) and
//! the foundry layout (`out/WeFi.sol/WeFi.json`) are found.

use alloy_primitives::Bytes;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("No artifact for contract {0}")]
    NotFound(String),

    #[error("Multiple artifacts for contract {name}: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },

    /// Interfaces and abstract contracts compile to empty bytecode
    #[error("Contract {0} has no creation bytecode")]
    NotDeployable(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid artifact {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A compiled contract.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Contract ABI
    #[serde(default)]
    pub abi: serde_json::Value,
    /// Creation bytecode
    #[serde(deserialize_with = "deserialize_bytecode")]
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// hardhat: `"bytecode": "0x..."`
    Hex(Bytes),
    /// foundry: `"bytecode": {"object": "0x...", ...}`
    Object { object: Bytes },
}

fn deserialize_bytecode<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawBytecode::deserialize(deserializer)? {
        RawBytecode::Hex(bytes) | RawBytecode::Object { object: bytes } => bytes,
    })
}

impl Artifact {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Artifacts rooted at a directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact of contract `name`.
    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.locate(name)?;
        debug!(name, path = %path.display(), "Loading artifact");

        let contents = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let artifact =
            Artifact::from_json(&contents).map_err(|source| ArtifactError::Json { path, source })?;

        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable(name.to_string()));
        }

        Ok(artifact)
    }

    /// Path of the artifact file of contract `name`.
    pub fn locate(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let file_name = format!("{name}.json");
        let mut found = Vec::new();
        collect(&self.root, &file_name, &mut found)?;

        match found.len() {
            0 => Err(ArtifactError::NotFound(name.to_string())),
            1 => Ok(found.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                paths: found,
            }),
        }
    }
}

fn collect(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<(), ArtifactError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == "build-info") {
                continue;
            }
            collect(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|n| n == file_name) {
            found.push(path);
        }
    }

    Ok(())
}
