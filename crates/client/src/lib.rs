use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Convenience function to create an ethereum rpc provider from url.
pub async fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Parse a hex private key, with or without 0x prefix.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, ClientError> {
    private_key
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}

/// Address controlled by `private_key`.
///
/// This is the `deployer` named account for deploy scripts.
pub fn signer_address(private_key: &str) -> Result<Address, ClientError> {
    Ok(parse_signer(private_key)?.address())
}

/// Create a provider with wallet signing capability from a private key.
///
/// Nonce, gas and EIP-1559 fees are filled by the provider before signing.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let signer = parse_signer(private_key)?;
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}
