//! OmniCounter bindings.
//!
//! OmniCounter sends an empty LayerZero message to its peer on the destination
//! chain, which increments a counter on receipt.

use alloy_sol_types::sol;

sol! {
    /// OmniCounter - cross-chain message counter
    #[sol(rpc)]
    interface OmniCounter {
        /// Send an increment message to the counter at `dstAddress` on `dstChainId`.
        /// `msg.value` pays the endpoint's messaging fee.
        function incrementCounter(
            uint16 dstChainId,
            bytes calldata dstAddress
        ) external payable;

        /// Number of messages received so far
        function getCounter() external view returns (uint256);
    }
}
