//! Deploys `WidgetOFTBridge`, which takes no constructor arguments.

use super::DeployEnv;
use crate::{ConstructorArgs, Deploy, DeployOptions, DeployResult};

pub const CONTRACT: &str = "WidgetOFTBridge";
pub const WAIT_CONFIRMATIONS: u64 = 1;

pub fn options(env: &DeployEnv) -> DeployOptions {
    DeployOptions {
        from: env.accounts.deployer,
        args: ConstructorArgs::none(),
        log: true,
        wait_confirmations: WAIT_CONFIRMATIONS,
    }
}

pub async fn deploy<D: Deploy>(deployer: &D, env: &DeployEnv) -> eyre::Result<DeployResult> {
    deployer.deploy(CONTRACT, options(env)).await
}
