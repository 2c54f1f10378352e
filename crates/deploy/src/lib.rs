//! Contract deployment.
//!
//! [`Deploy`] is the generic "deploy contract with constructor arguments"
//! interface; [`deployer::Deployer`] implements it against an RPC provider and
//! the on-disk deployment cache. [`scripts`] holds the deployment recipes.

pub mod deployer;
pub mod scripts;

use alloy_primitives::{Address, Bytes, TxHash};
use alloy_sol_types::SolConstructor;
use std::future::Future;

pub use deployer::Deployer;
pub use scripts::{DeployEnv, DeployScript, NamedAccounts};

/// ABI-encoded constructor arguments together with their JSON rendering.
///
/// The rendering is what gets cached next to the deployed address, and what
/// later runs compare against to decide whether a deployment can be reused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorArgs {
    pub encoded: Bytes,
    pub values: Vec<serde_json::Value>,
}

impl ConstructorArgs {
    /// No constructor arguments.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<C: SolConstructor>(call: &C, values: Vec<serde_json::Value>) -> Self {
        Self {
            encoded: call.abi_encode().into(),
            values,
        }
    }
}

/// Deployment request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOptions {
    /// Account sending the creation transaction
    pub from: Address,
    pub args: ConstructorArgs,
    /// Report progress at info level instead of debug
    pub log: bool,
    /// Blocks to wait after inclusion before treating the deployment as final
    pub wait_confirmations: u64,
}

/// Outcome of a deployment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployResult {
    /// Deployed contract address
    pub address: Address,
    /// Creation transaction hash, if known
    pub tx_hash: Option<TxHash>,
    /// Block number where the creation transaction was included
    pub block_number: Option<u64>,
    /// Gas used by the creation transaction
    pub gas_used: Option<u64>,
    /// False when an identical cached deployment was reused
    pub newly_deployed: bool,
}

/// Trait for deploying named contracts.
pub trait Deploy: Send + Sync {
    /// Deploy contract `name` with the given options.
    fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> impl Future<Output = eyre::Result<DeployResult>> + Send;
}
