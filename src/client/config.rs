//! Process configuration, loaded once at startup.

use anyhow::{anyhow, Context, Result};
use ethers::types::Address;

/// Default local development endpoint (Ganache's).
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Fixed-at-startup settings: the node endpoint, the deployed contract
/// address and the operator's signing keys.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub contract_address: Address,
    pub private_keys: Vec<String>,
}

impl ClientConfig {
    /// Read configuration from the environment: `AUCTION_RPC_URL`
    /// (optional), `AUCTION_CONTRACT_ADDRESS` (required) and
    /// `AUCTION_PRIVATE_KEYS` (comma-separated secrets, may be empty).
    pub fn from_env() -> Result<Self> {
        let rpc_url =
            std::env::var("AUCTION_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let raw_address = std::env::var("AUCTION_CONTRACT_ADDRESS")
            .context("AUCTION_CONTRACT_ADDRESS is not set")?;
        let contract_address = raw_address.trim().parse().map_err(|err| {
            anyhow!(
                "AUCTION_CONTRACT_ADDRESS {:?} is not a valid address: {}",
                raw_address,
                err
            )
        })?;

        let raw_keys = std::env::var("AUCTION_PRIVATE_KEYS").unwrap_or_default();
        let private_keys = raw_keys
            .split(',')
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            rpc_url,
            contract_address,
            private_keys,
        })
    }
}
