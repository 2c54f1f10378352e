//! Command-line surface.

use alloy_primitives::{utils::parse_ether, U256};
use clap::{Args, Parser, Subcommand};
use task::omni_counter::DEFAULT_FEE_ETHER;

#[derive(Debug, Parser)]
#[command(name = "omnideploy")]
#[command(about = "Deploy and operate LayerZero omnichain contracts")]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "omnideploy.toml")]
    pub config: String,

    /// Network to run against (a `[networks.<name>]` entry in the settings file)
    #[arg(short, long, env = "OMNIDEPLOY_NETWORK")]
    pub network: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run deploy scripts
    Deploy {
        /// Only run scripts carrying one of these tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        #[command(flatten)]
        signer: SignerArgs,
    },

    /// Send an OmniCounter increment message to another network
    OmniCounterIncrement {
        /// Network holding the destination OmniCounter
        #[arg(short, long)]
        target_network: String,

        /// Native value paid for delivery, in ether
        #[arg(long, default_value = DEFAULT_FEE_ETHER, value_parser = parse_value)]
        value: U256,

        #[command(flatten)]
        signer: SignerArgs,
    },

    /// Watch this network's OmniCounter
    OmniCounterPoll {
        /// Milliseconds between reads
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Print the deployed addresses of this network
    Addresses,
}

#[derive(Debug, Args)]
pub struct SignerArgs {
    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

fn parse_value(value: &str) -> Result<U256, String> {
    parse_ether(value).map_err(|e| format!("invalid ether amount {value}: {e}"))
}
