//! Deploys the `WeFi` omnichain token.
//!
//! The whole supply starts at zero and mints to the deployer; amounts travel
//! across chains with six shared decimals.

use super::DeployEnv;
use crate::{ConstructorArgs, Deploy, DeployOptions, DeployResult};
use alloy_primitives::U256;
use binding::oft::WeFi;
use serde_json::json;
use tracing::info;

pub const CONTRACT: &str = "WeFi";
pub const GLOBAL_SUPPLY: U256 = U256::ZERO;
pub const SHARED_DECIMALS: u8 = 6;
pub const WAIT_CONFIRMATIONS: u64 = 1;

/// Resolve the deployment options for `env.network`.
///
/// Fails when the network has no LayerZero endpoint.
pub fn options(env: &DeployEnv) -> eyre::Result<DeployOptions> {
    let endpoint = env.endpoints.lookup(&env.network)?;
    let receiver = env.accounts.deployer;

    info!(network = %env.network, %endpoint, "Endpoint address");

    let call = WeFi::constructorCall {
        lzEndpoint: endpoint,
        globalSupply: GLOBAL_SUPPLY,
        receiver,
        sharedDecimals: SHARED_DECIMALS,
    };
    let values = vec![
        json!(endpoint.to_string()),
        json!(GLOBAL_SUPPLY.to_string()),
        json!(receiver.to_string()),
        json!(SHARED_DECIMALS),
    ];

    Ok(DeployOptions {
        from: env.accounts.deployer,
        args: ConstructorArgs::new(&call, values),
        log: true,
        wait_confirmations: WAIT_CONFIRMATIONS,
    })
}

pub async fn deploy<D: Deploy>(deployer: &D, env: &DeployEnv) -> eyre::Result<DeployResult> {
    info!(address = %env.accounts.deployer, "Deployer address");

    let options = options(env)?;
    deployer.deploy(CONTRACT, options).await
}
