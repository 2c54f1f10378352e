//! OmniCounter tasks.
//!
//! `increment` sends a message from the local OmniCounter to the OmniCounter
//! deployed on a target network; `poll` watches the local counter for messages
//! arriving from elsewhere.

use crate::Receipt;
use alloy_primitives::{
    utils::{format_ether, parse_ether},
    Address, Bytes, U256,
};
use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use alloy_sol_types::SolCall;
use binding::counter::OmniCounter;
use config::EndpointIdTable;
use std::{collections::BTreeMap, iter::Take, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{info, warn};

pub const CONTRACT: &str = "OmniCounter";

/// Native value sent with `incrementCounter` to cover the messaging fee.
pub const DEFAULT_FEE_ETHER: &str = "0.01";

pub fn default_fee() -> U256 {
    parse_ether(DEFAULT_FEE_ETHER).expect("valid ether amount")
}

/// Destination of an increment message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    /// Destination network name
    pub network: String,
    /// LayerZero chain id of the destination
    pub chain_id: u16,
    /// OmniCounter address on the destination
    pub address: Address,
}

impl RelayTarget {
    /// Resolve `network` from the endpoint id table and the destination's
    /// deployment addresses.
    pub fn resolve(
        network: &str,
        endpoint_ids: &EndpointIdTable,
        addresses: &BTreeMap<String, Address>,
    ) -> eyre::Result<Self> {
        let chain_id = endpoint_ids.lookup(network)?;
        let Some(address) = addresses.get(CONTRACT).copied() else {
            eyre::bail!("{CONTRACT} is not deployed on {network}");
        };

        Ok(Self {
            network: network.to_string(),
            chain_id,
            address,
        })
    }

    /// Destination address as passed to the endpoint (packed 20 bytes).
    pub fn address_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.address.as_slice())
    }
}

/// Payable `incrementCounter` call on the OmniCounter at `source`.
pub fn increment_request(
    source: Address,
    target: &RelayTarget,
    value: U256,
) -> TransactionRequest {
    let call = OmniCounter::incrementCounterCall {
        dstChainId: target.chain_id,
        dstAddress: target.address_bytes(),
    };

    TransactionRequest::default()
        .with_to(source)
        .with_input(call.abi_encode())
        .with_value(value)
}

/// Send an increment message from the OmniCounter at `source`.
pub async fn increment<P>(
    provider: &P,
    source: Address,
    target: &RelayTarget,
    value: U256,
) -> eyre::Result<Receipt>
where
    P: Provider,
{
    info!(%source, "Source OmniCounter");

    let receipt = provider
        .send_transaction(increment_request(source, target, value))
        .await?
        .get_receipt()
        .await?;
    let sent = sent_receipt(&receipt)?;

    info!(
        tx_hash = %sent.tx_hash,
        block_number = sent.block_number,
        gas_used = sent.gas_used,
        dst_chain_id = target.chain_id,
        dst_address = %target.address,
        fee = %format_ether(value),
        "Message sent"
    );

    Ok(sent)
}

/// Summary of a mined `incrementCounter` transaction; fails if it reverted.
pub fn sent_receipt(receipt: &TransactionReceipt) -> eyre::Result<Receipt> {
    if !ReceiptResponse::status(receipt) {
        eyre::bail!(
            "incrementCounter reverted (tx: {})",
            receipt.transaction_hash
        );
    }

    Ok(Receipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

/// Backoff between failed counter reads: 100ms doubling, each wait capped at
/// `interval`, at most 5 attempts.
pub fn retry_strategy(interval: Duration) -> Take<ExponentialBackoff> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(interval)
        .take(5)
}

/// Command that watches for the message on the destination network.
pub fn poll_command(target_network: &str) -> String {
    format!("omnideploy --network {target_network} omni-counter-poll")
}

/// Periodically reads an OmniCounter.
pub struct CounterPoller<P> {
    provider: P,
    network: String,
    counter: Address,
}

impl<P> CounterPoller<P>
where
    P: Provider + Clone,
{
    pub fn new(provider: P, network: impl Into<String>, counter: Address) -> Self {
        Self {
            provider,
            network: network.into(),
            counter,
        }
    }

    /// Current counter value.
    pub async fn read(&self) -> eyre::Result<U256> {
        let contract = OmniCounter::new(self.counter, &self.provider);
        Ok(contract.getCounter().call().await?)
    }

    async fn read_with_retry(&self, interval: Duration) -> eyre::Result<U256> {
        Retry::spawn(retry_strategy(interval), || async {
            self.read().await.map_err(|e| {
                warn!(counter = %self.counter, error = %e, "Counter read failed, will retry");
                e
            })
        })
        .await
    }

    /// Log the counter every `interval`, forever.
    ///
    /// Returns only when a read keeps failing after retries.
    pub async fn run(&self, interval: Duration) -> eyre::Result<()> {
        info!(network = %self.network, counter = %self.counter, "Polling OmniCounter");

        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            let value = self.read_with_retry(interval).await?;
            info!(network = %self.network, %value, "counter...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, TxKind};

    fn receipt(success: bool) -> TransactionReceipt {
        serde_json::from_value(serde_json::json!({
            "transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "transactionIndex": "0x0",
            "blockHash": "0x2222222222222222222222222222222222222222222222222222222222222222",
            "blockNumber": "0x10",
            "from": "0x0101010101010101010101010101010101010101",
            "to": "0x3333333333333333333333333333333333333333",
            "cumulativeGasUsed": "0x186a0",
            "gasUsed": "0x186a0",
            "contractAddress": null,
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "type": "0x2",
            "status": if success { "0x1" } else { "0x0" },
            "effectiveGasPrice": "0x3b9aca00"
        }))
        .unwrap()
    }

    const FUJI_COUNTER: Address = address!("1111111111111111111111111111111111111111");

    fn addresses() -> BTreeMap<String, Address> {
        BTreeMap::from([
            ("OmniCounter".to_string(), FUJI_COUNTER),
            (
                "WeFi".to_string(),
                address!("2222222222222222222222222222222222222222"),
            ),
        ])
    }

    #[test]
    fn test_resolve_target() {
        let target =
            RelayTarget::resolve("fuji", &EndpointIdTable::builtin(), &addresses()).unwrap();

        assert_eq!(
            target,
            RelayTarget {
                network: "fuji".to_string(),
                chain_id: 10106,
                address: FUJI_COUNTER,
            }
        );
        assert_eq!(target.address_bytes().as_ref(), FUJI_COUNTER.as_slice());
    }

    #[test]
    fn test_resolve_uses_only_the_tables() {
        let ids = EndpointIdTable::from_json(r#"{"fuji": 7}"#).unwrap();
        let target = RelayTarget::resolve("fuji", &ids, &addresses()).unwrap();

        assert_eq!(target.chain_id, 7);
        assert_eq!(target.address, FUJI_COUNTER);
    }

    #[test]
    fn test_resolve_unknown_network() {
        let err = RelayTarget::resolve("moonbase", &EndpointIdTable::builtin(), &addresses())
            .unwrap_err();
        assert!(err.to_string().contains("Unknown network: moonbase"));
    }

    #[test]
    fn test_resolve_missing_counter() {
        let mut addresses = addresses();
        addresses.remove("OmniCounter");

        let err = RelayTarget::resolve("fuji", &EndpointIdTable::builtin(), &addresses)
            .unwrap_err();
        assert!(err.to_string().contains("OmniCounter is not deployed on fuji"));
    }

    #[test]
    fn test_default_fee() {
        assert_eq!(default_fee(), U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_poll_command() {
        assert_eq!(
            poll_command("bsc-testnet"),
            "omnideploy --network bsc-testnet omni-counter-poll"
        );
    }

    #[test]
    fn test_increment_request() {
        let source = address!("3333333333333333333333333333333333333333");
        let target = RelayTarget {
            network: "fuji".to_string(),
            chain_id: 10106,
            address: FUJI_COUNTER,
        };

        let tx = increment_request(source, &target, default_fee());

        assert_eq!(tx.to, Some(TxKind::Call(source)));
        assert_eq!(tx.value, Some(default_fee()));

        let input = tx.input.input().unwrap();
        assert_eq!(&input[..4], OmniCounter::incrementCounterCall::SELECTOR.as_slice());

        let call = OmniCounter::incrementCounterCall::abi_decode(input).unwrap();
        assert_eq!(call.dstChainId, 10106);
        assert_eq!(call.dstAddress.len(), 20);
        assert_eq!(call.dstAddress.as_ref(), FUJI_COUNTER.as_slice());
    }

    #[test]
    fn test_sent_receipt() {
        let sent = sent_receipt(&receipt(true)).unwrap();

        assert_eq!(
            sent,
            Receipt {
                tx_hash: b256!(
                    "1111111111111111111111111111111111111111111111111111111111111111"
                ),
                block_number: Some(16),
                gas_used: 100_000,
            }
        );
    }

    #[test]
    fn test_reverted_increment() {
        let err = sent_receipt(&receipt(false)).unwrap_err();
        assert!(err.to_string().contains("incrementCounter reverted"));
    }

    #[test]
    fn test_retry_delay_is_bounded_per_tick() {
        let interval = Duration::from_secs(1);
        let delays: Vec<_> = retry_strategy(interval).collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
                Duration::from_secs(1),
            ]
        );
        assert!(delays.iter().sum::<Duration>() <= interval * 5);
    }

    #[test]
    fn test_retry_delay_never_exceeds_interval() {
        let interval = Duration::from_millis(50);
        assert!(retry_strategy(interval).all(|delay| delay <= interval));
    }
}
