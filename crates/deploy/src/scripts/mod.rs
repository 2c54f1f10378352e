//! Deployment recipes.
//!
//! Each recipe resolves its constructor arguments for the target network and
//! hands them to a [`Deploy`] implementation. Recipes run in declaration order
//! and can be selected by tag.

pub mod wefi;
pub mod widget_bridge;

use crate::{Deploy, DeployResult};
use alloy_primitives::Address;
use config::EndpointTable;

/// Addresses resolved from configuration by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedAccounts {
    /// Signer of every deployment transaction
    pub deployer: Address,
}

/// Everything a recipe may read.
#[derive(Debug, Clone)]
pub struct DeployEnv {
    /// Target network name
    pub network: String,
    pub accounts: NamedAccounts,
    pub endpoints: EndpointTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployScript {
    WeFi,
    WidgetOftBridge,
}

impl DeployScript {
    /// All recipes, in execution order.
    pub const ALL: [Self; 2] = [Self::WeFi, Self::WidgetOftBridge];

    /// Name of the contract the recipe deploys.
    pub const fn contract(self) -> &'static str {
        match self {
            Self::WeFi => wefi::CONTRACT,
            Self::WidgetOftBridge => widget_bridge::CONTRACT,
        }
    }

    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::WeFi => &["WeFi"],
            Self::WidgetOftBridge => &["WidgetOFTBridge"],
        }
    }

    pub async fn run<D: Deploy>(self, deployer: &D, env: &DeployEnv) -> eyre::Result<DeployResult> {
        match self {
            Self::WeFi => wefi::deploy(deployer, env).await,
            Self::WidgetOftBridge => widget_bridge::deploy(deployer, env).await,
        }
    }

    /// Recipes carrying any of `tags`, or every recipe when `tags` is empty.
    pub fn select<S: AsRef<str>>(tags: &[S]) -> eyre::Result<Vec<Self>> {
        for tag in tags {
            let tag = tag.as_ref();
            if !Self::ALL.iter().any(|script| script.tags().contains(&tag)) {
                eyre::bail!("No deploy script is tagged {tag}");
            }
        }

        Ok(Self::ALL
            .into_iter()
            .filter(|script| {
                tags.is_empty()
                    || tags
                        .iter()
                        .any(|tag| script.tags().contains(&tag.as_ref()))
            })
            .collect())
    }
}
