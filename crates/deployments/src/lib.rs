//! On-disk deployment state.
//!
//! - [`store`]: the per-network cache of deployed contract addresses, laid out
//!   as `<root>/<network>/<ContractName>.json`
//! - [`artifact`]: compiled contract artifacts providing creation bytecode

pub mod artifact;
pub mod store;

pub use artifact::{Artifact, ArtifactError, ArtifactStore};
pub use store::{DeploymentRecord, DeploymentStore, StoreError};
