//! Client-side auction machinery: accounts, contract access, transaction
//! execution and state reconciliation.

pub mod accounts;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod reader;
pub mod rpc;

// Re-export the main types
pub use accounts::{AccountRegistry, SigningIdentity};
pub use config::ClientConfig;
pub use coordinator::AuctionCoordinator;
pub use error::{
    ExecuteError, GatewayError, OperationError, RpcError, SnapshotError, ValidationError,
};
pub use executor::TransactionExecutor;
pub use gateway::{AuctionGateway, WriteDescriptor};
pub use reader::AuctionStateReader;
pub use rpc::{HttpNodeClient, NodeClient};
