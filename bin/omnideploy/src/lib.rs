pub mod cli;

use alloy_primitives::{Address, U256};
use config::{EndpointIdTable, EndpointTable, Settings};
use deploy::{DeployEnv, DeployResult, DeployScript, Deployer, NamedAccounts};
use deployments::{ArtifactStore, DeploymentStore};
use std::{collections::BTreeMap, path::Path, time::Duration};
use task::{
    omni_counter::{self, CounterPoller, RelayTarget},
    Receipt,
};
use tracing::info;

/// Settings and lookup tables for the network a command runs against.
#[derive(Debug, Clone)]
pub struct Context {
    pub network: String,
    pub settings: Settings,
    pub endpoints: EndpointTable,
    pub endpoint_ids: EndpointIdTable,
}

impl Context {
    pub fn new(settings: Settings, network: impl Into<String>) -> eyre::Result<Self> {
        let endpoints = settings.endpoints()?;
        let endpoint_ids = settings.endpoint_ids()?;

        Ok(Self {
            network: network.into(),
            settings,
            endpoints,
            endpoint_ids,
        })
    }

    pub fn from_file(path: impl AsRef<Path>, network: impl Into<String>) -> eyre::Result<Self> {
        Self::new(Settings::from_file(path)?, network)
    }

    pub fn rpc_url(&self) -> eyre::Result<&str> {
        Ok(&self.settings.network(&self.network)?.rpc_url)
    }

    pub fn store(&self) -> DeploymentStore {
        DeploymentStore::new(&self.settings.deployments_dir)
    }

    pub fn artifacts(&self) -> ArtifactStore {
        ArtifactStore::new(&self.settings.artifacts_dir)
    }
}

/// Run the deploy scripts selected by `tags` (all when empty).
pub async fn deploy(
    ctx: &Context,
    private_key: &str,
    tags: &[String],
) -> eyre::Result<Vec<(DeployScript, DeployResult)>> {
    let scripts = DeployScript::select(tags)?;

    let provider = client::create_wallet_provider(ctx.rpc_url()?, private_key)?;
    let deployer = Deployer::new(provider, &ctx.network, ctx.artifacts(), ctx.store());
    let env = DeployEnv {
        network: ctx.network.clone(),
        accounts: NamedAccounts {
            deployer: client::signer_address(private_key)?,
        },
        endpoints: ctx.endpoints.clone(),
    };

    let mut results = Vec::with_capacity(scripts.len());
    for script in scripts {
        info!(network = %ctx.network, contract = script.contract(), "Running deploy script");
        let result = script.run(&deployer, &env).await?;
        results.push((script, result));
    }

    Ok(results)
}

/// Deployed addresses on `network`, keyed by contract name.
pub fn deployment_addresses(
    ctx: &Context,
    network: &str,
) -> eyre::Result<BTreeMap<String, Address>> {
    Ok(ctx.store().addresses(network)?)
}

/// Destination chain id and OmniCounter address for `target_network`.
pub fn resolve_relay_target(ctx: &Context, target_network: &str) -> eyre::Result<RelayTarget> {
    let addresses = deployment_addresses(ctx, target_network)?;
    info!(network = target_network, ?addresses, "Destination deployments");

    RelayTarget::resolve(target_network, &ctx.endpoint_ids, &addresses)
}

/// Send an increment message from this network's OmniCounter to the one on
/// `target_network`, paying `value` for delivery.
pub async fn omni_counter_increment(
    ctx: &Context,
    private_key: &str,
    target_network: &str,
    value: U256,
) -> eyre::Result<(RelayTarget, Receipt)> {
    let target = resolve_relay_target(ctx, target_network)?;
    let source = ctx.store().address(&ctx.network, omni_counter::CONTRACT)?;

    let provider = client::create_wallet_provider(ctx.rpc_url()?, private_key)?;
    let receipt = omni_counter::increment(&provider, source, &target, value).await?;

    Ok((target, receipt))
}

/// Report printed once an increment message has been sent.
pub fn increment_summary(ctx: &Context, target: &RelayTarget, receipt: &Receipt) -> String {
    format!(
        "✅ Message Sent [{}] incrementCounter on destination OmniCounter @ [{}] [{}]\n\
         tx: {}\n\
         \n\
         Note: to poll/wait for the message to arrive on the destination use the command:\n\
         \n    $ {}\n",
        ctx.network,
        target.chain_id,
        target.address,
        receipt.tx_hash,
        omni_counter::poll_command(&target.network),
    )
}

/// Log this network's OmniCounter every `interval` until interrupted.
pub async fn omni_counter_poll(ctx: &Context, interval: Duration) -> eyre::Result<()> {
    let counter = ctx.store().address(&ctx.network, omni_counter::CONTRACT)?;
    let provider = client::create_provider(ctx.rpc_url()?).await?;
    let poller = CounterPoller::new(provider, &ctx.network, counter);

    tokio::select! {
        result = poller.run(interval) => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Stopped polling");
            Ok(())
        }
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
