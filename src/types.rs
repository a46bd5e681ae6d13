//! Shared view types crossing the presentation boundary.
//!
//! Everything here is a point-in-time value: views are rebuilt wholesale on
//! every refresh and never patched in place, so a holder of one can never
//! observe a half-updated state.

use ethers::types::{Address, U256};
use ethers::utils::format_ether;
use serde::Serialize;
use std::fmt;

/// Render a wei amount as a decimal-ether string with trailing zeros
/// trimmed, so zero renders as plain "0".
pub fn format_eth(wei: U256) -> String {
    let rendered = format_ether(wei);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Display name attached to the highest bid, including the placeholder
/// states the presentation layer needs to tell apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BidderName {
    /// Name registered with the bid.
    Named(String),
    /// No bids have been placed yet.
    NoBids,
    /// A bid exists but no display name was registered with it.
    Unnamed,
    /// The optional name lookup failed; the rest of the snapshot stands.
    LookupFailed,
}

impl fmt::Display for BidderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidderName::Named(name) => f.write_str(name),
            BidderName::NoBids => f.write_str("no bids yet"),
            BidderName::Unnamed => f.write_str("(unnamed)"),
            BidderName::LookupFailed => f.write_str("lookup failed"),
        }
    }
}

/// Point-in-time assembled view of the auction contract's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionSnapshot {
    /// Whether the auction is still accepting bids.
    pub is_active: bool,
    /// Highest bid in wei; forced to zero while no bids exist.
    pub highest_bid_wei: U256,
    /// Highest bidder, or the zero address while no bids exist.
    pub highest_bidder: Address,
    /// Display name of the highest bidder, or a placeholder state.
    pub highest_bidder_name: BidderName,
    /// Account that deployed the contract and may end the auction.
    pub owner: Address,
}

impl AuctionSnapshot {
    /// Highest bid as a decimal-ether string.
    pub fn highest_bid_eth(&self) -> String {
        format_eth(self.highest_bid_wei)
    }
}

/// Last-known auction state as held by the coordinator. A failed refresh is
/// an explicit state of its own rather than a stale `Ready` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SnapshotView {
    Ready(AuctionSnapshot),
    Unavailable { reason: String },
}

impl SnapshotView {
    pub fn is_ready(&self) -> bool {
        matches!(self, SnapshotView::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&AuctionSnapshot> {
        match self {
            SnapshotView::Ready(snapshot) => Some(snapshot),
            SnapshotView::Unavailable { .. } => None,
        }
    }
}

/// Result of the winner query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WinnerInfo {
    /// The auction is still running; no winner exists yet.
    InProgress,
    /// The winner lookup failed.
    Unavailable,
    /// The auction has ended and the contract reported its winner.
    Decided {
        name: BidderName,
        amount_wei: U256,
        address: Address,
    },
}

/// Severity hint for rendering an operation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Result object handed to the presentation layer after a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    pub severity: Severity,
}

impl OperationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    #[test]
    fn test_format_eth_trims_trailing_zeros() {
        assert_eq!(format_eth(parse_ether("1.5").unwrap()), "1.5");
        assert_eq!(format_eth(parse_ether("1000").unwrap()), "1000");
        assert_eq!(format_eth(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_format_eth_zero_renders_as_plain_zero() {
        assert_eq!(format_eth(U256::zero()), "0");
    }

    #[test]
    fn test_bidder_name_display() {
        assert_eq!(BidderName::Named("alice".to_string()).to_string(), "alice");
        assert_eq!(BidderName::NoBids.to_string(), "no bids yet");
        assert_eq!(BidderName::Unnamed.to_string(), "(unnamed)");
        assert_eq!(BidderName::LookupFailed.to_string(), "lookup failed");
    }
}
