//! Error taxonomy for the auction client.
//!
//! The split matters to callers: validation errors are reported before any
//! network traffic, write-path errors are tagged with the stage that failed,
//! and read-path errors distinguish transport failures from malformed
//! contract return values so optional lookups can recover to sentinels.

use thiserror::Error;

/// Transport or node-level JSON-RPC failure. The node's message is kept
/// verbatim so revert reasons survive to the presentation layer.
#[derive(Debug, Error, Clone)]
#[error("{0}")]
pub struct RpcError(pub String);

/// Failure at the contract-gateway boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to encode {0}")]
    Encode(String),
    #[error("contract returned a malformed value for {0}")]
    Decode(String),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Stage-tagged failure of the write path. The first failing stage aborts
/// the whole operation.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("gas estimation failed: {0}")]
    Estimation(String),
    #[error("gas price query failed: {0}")]
    PriceQuery(String),
    #[error("nonce query failed: {0}")]
    NonceQuery(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("submission failed: {0}")]
    Submission(String),
}

/// Failure of one of the mandatory auction-state reads.
#[derive(Debug, Error)]
#[error("auction state read failed: {0}")]
pub struct SnapshotError(#[from] pub GatewayError);

/// Bad user input, rejected before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bidder name must not be empty")]
    EmptyName,
    #[error("bid amount is not a valid ether amount: {0}")]
    InvalidAmount(String),
    #[error("bid amount must be greater than zero")]
    NonPositiveAmount,
    #[error("no signing account selected")]
    NoSigner,
}

/// Umbrella for everything a user-triggered operation can fail with before
/// it is converted into an outcome at the coordinator boundary.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
