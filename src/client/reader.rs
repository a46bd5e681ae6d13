//! Assembles coherent auction-state views from the contract's read surface.
//!
//! The four mandatory reads are awaited one by one and fail fast; the
//! bidder-name lookup is optional and recovers to a sentinel so a flaky
//! auxiliary read never costs the caller the whole snapshot.

use crate::client::error::{GatewayError, SnapshotError};
use crate::client::gateway::AuctionGateway;
use crate::types::{AuctionSnapshot, BidderName, WinnerInfo};
use ethers::types::{Address, U256};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub struct AuctionStateReader {
    gateway: Arc<AuctionGateway>,
}

impl AuctionStateReader {
    pub fn new(gateway: Arc<AuctionGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch a fresh snapshot. Fails only if one of the mandatory reads
    /// (activity, highest bid, owner, highest bidder) fails.
    #[instrument(skip(self))]
    pub async fn read_snapshot(&self) -> Result<AuctionSnapshot, SnapshotError> {
        let is_active = self.gateway.is_active().await?;
        let highest_bid = self.gateway.highest_bid().await?;
        let owner = self.gateway.owner().await?;
        let highest_bidder = self.gateway.highest_bidder().await?;

        // Without a live bid there is nothing to look up; the bid amount is
        // forced to zero alongside the sentinel.
        let (highest_bid_wei, highest_bidder_name) =
            if highest_bidder == Address::zero() || highest_bid.is_zero() {
                (U256::zero(), BidderName::NoBids)
            } else {
                (highest_bid, self.lookup_bidder_name().await)
            };

        debug!(
            "Assembled snapshot: active={}, highest bid {} wei",
            is_active, highest_bid_wei
        );
        Ok(AuctionSnapshot {
            is_active,
            highest_bid_wei,
            highest_bidder,
            highest_bidder_name,
            owner,
        })
    }

    /// Optional sub-read; failures degrade to sentinels instead of
    /// propagating.
    async fn lookup_bidder_name(&self) -> BidderName {
        match self.gateway.highest_bidder_info().await {
            Ok((name, _amount)) => {
                if name.trim().is_empty() {
                    BidderName::Unnamed
                } else {
                    BidderName::Named(name)
                }
            }
            Err(GatewayError::Decode(err)) => {
                warn!("Highest-bidder lookup returned a malformed value: {}", err);
                BidderName::Unnamed
            }
            Err(err) => {
                warn!("Highest-bidder lookup failed: {}", err);
                BidderName::LookupFailed
            }
        }
    }

    /// Winner information for an ended auction. While the auction is still
    /// active no winner read is issued at all.
    #[instrument(skip(self))]
    pub async fn read_winner(&self) -> WinnerInfo {
        let is_active = match self.gateway.is_active().await {
            Ok(active) => active,
            Err(err) => {
                warn!("Winner read aborted, activity check failed: {}", err);
                return WinnerInfo::Unavailable;
            }
        };
        if is_active {
            return WinnerInfo::InProgress;
        }

        match self.gateway.winner_info().await {
            Ok((name, amount_wei, address)) => WinnerInfo::Decided {
                name: if name.trim().is_empty() {
                    BidderName::Unnamed
                } else {
                    BidderName::Named(name)
                },
                amount_wei,
                address,
            },
            Err(err) => {
                warn!("Winner lookup failed: {}", err);
                WinnerInfo::Unavailable
            }
        }
    }
}
