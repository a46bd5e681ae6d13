//! JSON-RPC node access.
//!
//! `NodeClient` is the narrow seam between the auction client and the
//! network: everything above it works against the trait, so tests can
//! substitute a canned node and production wires in the HTTP provider.

use crate::client::error::RpcError;
use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, U256};
use std::time::Duration;
use url::Url;

/// The only timeout layer in the client; a call that the node never answers
/// fails here.
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the auction client needs from a JSON-RPC node.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Free read-only call against current contract state.
    async fn call(&self, tx: &TypedTransaction) -> Result<Bytes, RpcError>;

    /// Ask the node how much gas the call would use; reverts surface here.
    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, RpcError>;

    /// Current network gas price.
    async fn gas_price(&self) -> Result<U256, RpcError>;

    /// Number of transactions sent from `address`, used as the next nonce.
    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError>;

    /// Chain id, bound into signed transactions for replay protection.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// Broadcast a signed payload and await its inclusion. Resolves to the
    /// transaction hash only for a successful on-chain execution.
    async fn submit(&self, raw: Bytes) -> Result<H256, RpcError>;
}

/// Production node client over HTTP JSON-RPC.
#[derive(Debug)]
pub struct HttpNodeClient {
    provider: Provider<Http>,
}

impl HttpNodeClient {
    pub fn connect(endpoint: &str) -> Result<Self, RpcError> {
        let url = Url::parse(endpoint)
            .map_err(|err| RpcError(format!("invalid RPC endpoint {}: {}", endpoint, err)))?;
        let http = reqwest::Client::builder()
            .timeout(TRANSPORT_TIMEOUT)
            .build()
            .map_err(|err| RpcError(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self {
            provider: Provider::new(Http::new_with_client(url, http)),
        })
    }
}

fn into_rpc_error(err: ProviderError) -> RpcError {
    RpcError(err.to_string())
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn call(&self, tx: &TypedTransaction) -> Result<Bytes, RpcError> {
        self.provider.call(tx, None).await.map_err(into_rpc_error)
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, RpcError> {
        self.provider
            .estimate_gas(tx, None)
            .await
            .map_err(into_rpc_error)
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        self.provider.get_gas_price().await.map_err(into_rpc_error)
    }

    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError> {
        self.provider
            .get_transaction_count(address, None)
            .await
            .map_err(into_rpc_error)
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        self.provider
            .get_chainid()
            .await
            .map(|id| id.as_u64())
            .map_err(into_rpc_error)
    }

    async fn submit(&self, raw: Bytes) -> Result<H256, RpcError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(into_rpc_error)?;
        let hash = *pending;
        match pending.await.map_err(into_rpc_error)? {
            Some(receipt) if receipt.status == Some(1u64.into()) => Ok(receipt.transaction_hash),
            Some(receipt) => Err(RpcError(format!(
                "transaction {:?} reverted on-chain",
                receipt.transaction_hash
            ))),
            None => Err(RpcError(format!(
                "transaction {:?} was dropped before inclusion",
                hash
            ))),
        }
    }
}
