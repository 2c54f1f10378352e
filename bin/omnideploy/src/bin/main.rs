use alloy_primitives::utils::format_ether;
use clap::Parser;
use omnideploy::{
    cli::{Cli, Command},
    Context,
};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    omnideploy::init_tracing(cli.log_json);

    info!(config = %cli.config, network = %cli.network, "Loading settings");
    let ctx = Context::from_file(&cli.config, &cli.network)?;

    match cli.command {
        Command::Deploy { tags, signer } => {
            let results = omnideploy::deploy(&ctx, &signer.private_key, &tags).await?;

            for (script, result) in results {
                info!(
                    contract = script.contract(),
                    address = %result.address,
                    newly_deployed = result.newly_deployed,
                    "Deploy script completed"
                );
            }
        }
        Command::OmniCounterIncrement {
            target_network,
            value,
            signer,
        } => {
            info!(fee = %format_ether(value), "Running: omni-counter-increment");

            let (target, receipt) = omnideploy::omni_counter_increment(
                &ctx,
                &signer.private_key,
                &target_network,
                value,
            )
            .await?;

            print!(
                "{}",
                omnideploy::increment_summary(&ctx, &target, &receipt)
            );
        }
        Command::OmniCounterPoll { interval_ms } => {
            omnideploy::omni_counter_poll(&ctx, Duration::from_millis(interval_ms)).await?;
        }
        Command::Addresses => {
            let addresses = omnideploy::deployment_addresses(&ctx, &ctx.network)?;

            for (name, address) in addresses {
                println!("{name}: {address}");
            }
        }
    }

    Ok(())
}
