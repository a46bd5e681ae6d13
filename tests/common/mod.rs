//! Shared test fixtures: a canned node client and stack wiring helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, H256, U256};
use gavel::client::{
    AccountRegistry, AuctionCoordinator, AuctionGateway, AuctionStateReader, NodeClient, RpcError,
    TransactionExecutor,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// Well-known development keys (Hardhat accounts #0 and #1).
pub const KEY0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const ADDR0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const ADDR1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub const TEST_CHAIN_ID: u64 = 1337;

pub fn contract_address() -> Address {
    "0x00000000000000000000000000000000000000aa".parse().unwrap()
}

pub fn addr0() -> Address {
    ADDR0.parse().unwrap()
}

pub fn addr1() -> Address {
    ADDR1.parse().unwrap()
}

/// Method selector as it appears on the wire.
pub fn selector(signature: &str) -> [u8; 4] {
    ethers::utils::id(signature)
}

/// ABI-encode a canned return value.
pub fn encoded(tokens: &[Token]) -> Vec<u8> {
    ethers::abi::encode(tokens)
}

/// Node client with canned responses, keyed by method selector, plus
/// counters and captures for asserting what the client sent.
pub struct MockNode {
    responses: Mutex<HashMap<[u8; 4], Result<Vec<u8>, String>>>,
    call_log: Mutex<Vec<[u8; 4]>>,
    estimate_response: Mutex<Result<U256, String>>,
    gas_price_response: Mutex<Result<U256, String>>,
    nonce_response: Mutex<Result<U256, String>>,
    submit_response: Mutex<Result<H256, String>>,
    estimate_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    last_estimate: Mutex<Option<TypedTransaction>>,
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            call_log: Mutex::new(Vec::new()),
            estimate_response: Mutex::new(Ok(U256::from(90_000u64))),
            gas_price_response: Mutex::new(Ok(U256::from(2_000_000_000u64))),
            nonce_response: Mutex::new(Ok(U256::zero())),
            submit_response: Mutex::new(Ok(H256::repeat_byte(0xab))),
            estimate_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            last_estimate: Mutex::new(None),
        }
    }
}

impl MockNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, signature: &str, tokens: &[Token]) {
        self.responses
            .lock()
            .unwrap()
            .insert(selector(signature), Ok(encoded(tokens)));
    }

    /// Install a raw (possibly malformed) response body.
    pub fn respond_raw(&self, signature: &str, bytes: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .insert(selector(signature), Ok(bytes));
    }

    pub fn fail_call(&self, signature: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(selector(signature), Err(message.to_string()));
    }

    pub fn fail_estimate(&self, message: &str) {
        *self.estimate_response.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_gas_price(&self, message: &str) {
        *self.gas_price_response.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_nonce(&self, message: &str) {
        *self.nonce_response.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_submit(&self, message: &str) {
        *self.submit_response.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls_to(&self, signature: &str) -> usize {
        let wanted = selector(signature);
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|sel| **sel == wanted)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    pub fn estimate_count(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn last_estimate_request(&self) -> Option<TypedTransaction> {
        self.last_estimate.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn call(&self, tx: &TypedTransaction) -> Result<Bytes, RpcError> {
        let data = tx.data().cloned().unwrap_or_default();
        let mut sel = [0u8; 4];
        if data.len() >= 4 {
            sel.copy_from_slice(&data[..4]);
        }
        self.call_log.lock().unwrap().push(sel);
        match self.responses.lock().unwrap().get(&sel) {
            Some(Ok(bytes)) => Ok(Bytes::from(bytes.clone())),
            Some(Err(message)) => Err(RpcError(message.clone())),
            None => Err(RpcError(format!(
                "unexpected eth_call with selector {:02x?}",
                sel
            ))),
        }
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, RpcError> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_estimate.lock().unwrap() = Some(tx.clone());
        self.estimate_response.lock().unwrap().clone().map_err(RpcError)
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        self.gas_price_response.lock().unwrap().clone().map_err(RpcError)
    }

    async fn transaction_count(&self, _address: Address) -> Result<U256, RpcError> {
        self.nonce_response.lock().unwrap().clone().map_err(RpcError)
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        Ok(TEST_CHAIN_ID)
    }

    async fn submit(&self, _raw: Bytes) -> Result<H256, RpcError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_response.lock().unwrap().clone().map_err(RpcError)
    }
}

/// Install the four mandatory snapshot reads.
pub fn respond_base_state(
    node: &MockNode,
    active: bool,
    bid_wei: U256,
    bidder: Address,
    owner: Address,
) {
    node.respond("isActive()", &[Token::Bool(active)]);
    node.respond("highestBid()", &[Token::Uint(bid_wei)]);
    node.respond("owner()", &[Token::Address(owner)]);
    node.respond("highestBidder()", &[Token::Address(bidder)]);
}

pub fn gateway_with(node: &Arc<MockNode>) -> Arc<AuctionGateway> {
    let dyn_node: Arc<dyn NodeClient> = node.clone();
    Arc::new(AuctionGateway::new(dyn_node, contract_address()).expect("gateway builds"))
}

pub fn reader_with(node: &Arc<MockNode>) -> AuctionStateReader {
    AuctionStateReader::new(gateway_with(node))
}

pub fn executor_with(node: &Arc<MockNode>) -> TransactionExecutor {
    let dyn_node: Arc<dyn NodeClient> = node.clone();
    TransactionExecutor::new(dyn_node, TEST_CHAIN_ID)
}

pub fn coordinator_with(node: &Arc<MockNode>, secrets: &[&str]) -> AuctionCoordinator {
    let registry = AccountRegistry::import_all(secrets);
    let gateway = gateway_with(node);
    let executor = executor_with(node);
    let reader = AuctionStateReader::new(gateway.clone());
    AuctionCoordinator::new(registry, gateway, executor, reader)
}
