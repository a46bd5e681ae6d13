//! Builds, prices, signs and submits state-changing calls.

use crate::client::accounts::SigningIdentity;
use crate::client::error::ExecuteError;
use crate::client::gateway::WriteDescriptor;
use crate::client::rpc::NodeClient;
use ethers::signers::Signer;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{TransactionRequest, H256, U256};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs the full write path for one call at a time. The chain id is queried
/// once at startup and bound here for replay protection.
pub struct TransactionExecutor {
    node: Arc<dyn NodeClient>,
    chain_id: u64,
}

impl TransactionExecutor {
    pub fn new(node: Arc<dyn NodeClient>, chain_id: u64) -> Self {
        Self { node, chain_id }
    }

    /// Execute a state-changing call. Steps are strictly ordered: estimate
    /// gas, query the gas price, query the sender's nonce, assemble, sign
    /// locally, submit and await inclusion. The first failure aborts and
    /// nothing signed is kept around.
    #[instrument(skip_all, fields(method = call.method))]
    pub async fn execute(
        &self,
        call: &WriteDescriptor,
        signer: &SigningIdentity,
        value: U256,
    ) -> Result<H256, ExecuteError> {
        let request = TransactionRequest::new()
            .from(signer.address())
            .to(call.to)
            .data(call.data.clone())
            .value(value);

        // A call the contract would revert fails here, before any signing.
        let unpriced: TypedTransaction = request.clone().into();
        let gas = self
            .node
            .estimate_gas(&unpriced)
            .await
            .map_err(|err| ExecuteError::Estimation(err.to_string()))?;

        let gas_price = self
            .node
            .gas_price()
            .await
            .map_err(|err| ExecuteError::PriceQuery(err.to_string()))?;

        let nonce = self
            .node
            .transaction_count(signer.address())
            .await
            .map_err(|err| ExecuteError::NonceQuery(err.to_string()))?;

        debug!(
            "Prepared {}: gas {}, gas price {}, nonce {}",
            call.method, gas, gas_price, nonce
        );

        let request: TypedTransaction = request
            .gas(gas)
            .gas_price(gas_price)
            .nonce(nonce)
            .chain_id(self.chain_id)
            .into();

        let wallet = signer.wallet().clone().with_chain_id(self.chain_id);
        let signature = wallet
            .sign_transaction_sync(&request)
            .map_err(|err| ExecuteError::Signing(err.to_string()))?;
        let raw = request.rlp_signed(&signature);

        let hash = self
            .node
            .submit(raw)
            .await
            .map_err(|err| ExecuteError::Submission(err.to_string()))?;
        info!("{} confirmed in transaction {:?}", call.method, hash);
        Ok(hash)
    }
}
