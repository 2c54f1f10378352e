//! Omnichain fungible token bindings.

use alloy_sol_types::sol;

sol! {
    /// WeFi - omnichain fungible token backed by a LayerZero endpoint
    #[sol(rpc)]
    #[derive(Debug)]
    contract WeFi {
        /// Mints `globalSupply` to `receiver` and wires the token to `lzEndpoint`.
        /// `sharedDecimals` is the precision carried across chains.
        constructor(
            address lzEndpoint,
            uint256 globalSupply,
            address receiver,
            uint8 sharedDecimals
        );

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get local token decimals
        function decimals() external view returns (uint8);

        /// Get the decimals used for cross-chain amounts
        function sharedDecimals() external view returns (uint8);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);
    }

    /// WidgetOFTBridge - routes OFT transfers initiated by the widget
    #[sol(rpc)]
    #[derive(Debug)]
    contract WidgetOFTBridge {
        constructor();

        /// Get the bridge owner
        function owner() external view returns (address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use alloy_sol_types::SolConstructor;

    #[test]
    fn test_wefi_constructor_encoding() {
        let call = WeFi::constructorCall {
            lzEndpoint: Address::from([1u8; 20]),
            globalSupply: U256::ZERO,
            receiver: Address::from([2u8; 20]),
            sharedDecimals: 6,
        };

        let encoded = call.abi_encode();

        // Four static words.
        assert_eq!(encoded.len(), 4 * 32);
        assert_eq!(&encoded[12..32], &[1u8; 20]);
        assert_eq!(&encoded[32..64], &[0u8; 32]);
        assert_eq!(&encoded[76..96], &[2u8; 20]);
        assert_eq!(encoded[127], 6);
    }

    #[test]
    fn test_bridge_constructor_is_empty() {
        let call = WidgetOFTBridge::constructorCall {};
        assert!(call.abi_encode().is_empty());
    }
}
