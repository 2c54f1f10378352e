use crate::{Deploy, DeployOptions, DeployResult};
use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use deployments::{Artifact, ArtifactStore, DeploymentRecord, DeploymentStore};
use tracing::{debug, info};

/// Deploys artifacts through a wallet provider and caches the result.
pub struct Deployer<P> {
    provider: P,
    network: String,
    artifacts: ArtifactStore,
    store: DeploymentStore,
}

impl<P> Deployer<P>
where
    P: Provider + Clone,
{
    pub fn new(
        provider: P,
        network: impl Into<String>,
        artifacts: ArtifactStore,
        store: DeploymentStore,
    ) -> Self {
        Self {
            provider,
            network: network.into(),
            artifacts,
            store,
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }
}

impl<P> Deploy for Deployer<P>
where
    P: Provider + Clone,
{
    async fn deploy(&self, name: &str, options: DeployOptions) -> eyre::Result<DeployResult> {
        let artifact = self.artifacts.load(name)?;

        if let Some(existing) = self.store.get(&self.network, name)? {
            if existing.matches(&artifact.bytecode, &options.args.values) {
                if options.log {
                    info!(address = %existing.address, "reusing \"{name}\"");
                } else {
                    debug!(address = %existing.address, "reusing \"{name}\"");
                }

                return Ok(DeployResult {
                    address: existing.address,
                    tx_hash: existing.transaction_hash,
                    block_number: existing.block_number,
                    gas_used: None,
                    newly_deployed: false,
                });
            }
        }

        let tx = creation_request(options.from, &artifact.bytecode, &options.args.encoded);

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();

        if options.log {
            info!(%tx_hash, network = %self.network, "deploying \"{name}\"");
        } else {
            debug!(%tx_hash, network = %self.network, "deploying \"{name}\"");
        }

        let receipt = pending
            .with_required_confirmations(required_confirmations(options.wait_confirmations))
            .get_receipt()
            .await?;

        self.record(name, artifact, options, &receipt)
    }
}

impl<P> Deployer<P> {
    /// Check the creation receipt and cache the deployment.
    fn record(
        &self,
        name: &str,
        artifact: Artifact,
        options: DeployOptions,
        receipt: &TransactionReceipt,
    ) -> eyre::Result<DeployResult> {
        let address = deployed_address(name, receipt)?;
        let tx_hash = receipt.transaction_hash;

        let record = DeploymentRecord {
            address,
            transaction_hash: Some(tx_hash),
            block_number: receipt.block_number,
            args: options.args.values,
            bytecode: Some(artifact.bytecode),
            abi: Some(artifact.abi),
        };
        self.store.save(&self.network, name, &record)?;

        if options.log {
            info!(
                %address,
                %tx_hash,
                block_number = receipt.block_number,
                gas_used = receipt.gas_used,
                "deployed \"{name}\""
            );
        } else {
            debug!(%address, %tx_hash, "deployed \"{name}\"");
        }

        Ok(DeployResult {
            address,
            tx_hash: Some(tx_hash),
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used),
            newly_deployed: true,
        })
    }
}

/// Create transaction for `bytecode` with its constructor arguments.
pub fn creation_request(
    from: Address,
    bytecode: &Bytes,
    encoded_args: &Bytes,
) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(from)
        .with_deploy_code(creation_code(bytecode, encoded_args))
}

/// Confirmations to wait for; inclusion counts as the first one.
pub const fn required_confirmations(wait_confirmations: u64) -> u64 {
    if wait_confirmations == 0 {
        1
    } else {
        wait_confirmations
    }
}

/// Address created by a successful creation transaction.
pub fn deployed_address(name: &str, receipt: &TransactionReceipt) -> eyre::Result<Address> {
    let tx_hash = receipt.transaction_hash;

    if !ReceiptResponse::status(receipt) {
        eyre::bail!("Deployment of {name} reverted (tx: {tx_hash})");
    }
    let Some(address) = receipt.contract_address else {
        eyre::bail!("Receipt of {tx_hash} has no contract address");
    };

    Ok(address)
}

/// Creation bytecode followed by the ABI-encoded constructor arguments.
pub fn creation_code(bytecode: &Bytes, encoded_args: &Bytes) -> Bytes {
    [bytecode.as_ref(), encoded_args.as_ref()].concat().into()
}
