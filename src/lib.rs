//! gavel - operator console for a single-contract on-chain auction
//!
//! This crate manages locally-held signing identities, submits bid and
//! end-auction transactions, and reconciles a local view of auction state
//! with the contract's authoritative answers.

pub mod client;
pub mod types;

// Re-export main types for convenience
pub use types::{AuctionSnapshot, BidderName, OperationOutcome, Severity, SnapshotView, WinnerInfo};
