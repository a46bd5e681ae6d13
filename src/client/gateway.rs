//! Typed façade over the auction contract's fixed method surface.
//!
//! Reads encode the call, issue it through the node client and decode the
//! returned value into a typed result; a structurally invalid return fails
//! here as a decode error instead of leaking loosely-typed values upward.
//! Writes only produce unsigned call descriptors; pricing, signing and
//! submission belong to the executor.

use crate::client::error::GatewayError;
use crate::client::rpc::NodeClient;
use ethers::abi::{parse_abi, Detokenize};
use ethers::contract::BaseContract;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use std::sync::Arc;

/// The deployed contract's method surface. Fixed at build time; there is no
/// dynamic ABI discovery.
const AUCTION_ABI: &[&str] = &[
    "function isActive() view returns (bool)",
    "function highestBid() view returns (uint256)",
    "function owner() view returns (address)",
    "function highestBidder() view returns (address)",
    "function getHighestBidder() view returns (string, uint256)",
    "function getWinnerInfo() view returns (string, uint256, address)",
    "function placeBid(string name) payable",
    "function endAuction()",
];

/// An unsigned state-changing call: destination plus encoded payload.
#[derive(Debug, Clone)]
pub struct WriteDescriptor {
    pub to: Address,
    pub data: Bytes,
    /// Method label, carried through for logging.
    pub method: &'static str,
}

/// Gateway bound to one contract address on one node. Holds no mutable
/// state beyond that binding.
pub struct AuctionGateway {
    node: Arc<dyn NodeClient>,
    address: Address,
    abi: BaseContract,
}

impl AuctionGateway {
    pub fn new(node: Arc<dyn NodeClient>, address: Address) -> Result<Self, GatewayError> {
        let abi = parse_abi(AUCTION_ABI)
            .map_err(|err| GatewayError::Encode(format!("contract ABI: {}", err)))?;
        Ok(Self {
            node,
            address,
            abi: BaseContract::from(abi),
        })
    }

    pub fn contract_address(&self) -> Address {
        self.address
    }

    /// Encode a no-argument read, issue it as an `eth_call` and decode the
    /// answer into `D`.
    async fn read<D: Detokenize>(&self, method: &str) -> Result<D, GatewayError> {
        let data = self
            .abi
            .encode(method, ())
            .map_err(|err| GatewayError::Encode(format!("{}: {}", method, err)))?;
        let tx: TypedTransaction = TransactionRequest::new()
            .to(self.address)
            .data(data)
            .into();
        let raw = self.node.call(&tx).await?;
        self.abi
            .decode_output(method, raw)
            .map_err(|err| GatewayError::Decode(format!("{}: {}", method, err)))
    }

    pub async fn is_active(&self) -> Result<bool, GatewayError> {
        self.read("isActive").await
    }

    pub async fn highest_bid(&self) -> Result<U256, GatewayError> {
        self.read("highestBid").await
    }

    pub async fn owner(&self) -> Result<Address, GatewayError> {
        self.read("owner").await
    }

    pub async fn highest_bidder(&self) -> Result<Address, GatewayError> {
        self.read("highestBidder").await
    }

    /// Display name and amount registered with the current highest bid.
    pub async fn highest_bidder_info(&self) -> Result<(String, U256), GatewayError> {
        self.read("getHighestBidder").await
    }

    /// Winner name, amount and address; only meaningful once the auction
    /// has ended.
    pub async fn winner_info(&self) -> Result<(String, U256, Address), GatewayError> {
        self.read("getWinnerInfo").await
    }

    /// Unsigned descriptor for a `placeBid` call.
    pub fn place_bid(&self, name: &str) -> Result<WriteDescriptor, GatewayError> {
        let data = self
            .abi
            .encode("placeBid", name.to_owned())
            .map_err(|err| GatewayError::Encode(format!("placeBid: {}", err)))?;
        Ok(WriteDescriptor {
            to: self.address,
            data,
            method: "placeBid",
        })
    }

    /// Unsigned descriptor for an `endAuction` call.
    pub fn end_auction(&self) -> Result<WriteDescriptor, GatewayError> {
        let data = self
            .abi
            .encode("endAuction", ())
            .map_err(|err| GatewayError::Encode(format!("endAuction: {}", err)))?;
        Ok(WriteDescriptor {
            to: self.address,
            data,
            method: "endAuction",
        })
    }
}
