//! Operational tasks against deployed contracts.

pub mod omni_counter;

use alloy_primitives::TxHash;

/// Result of a state-changing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: u64,
}
