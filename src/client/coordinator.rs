//! Orchestrates user-triggered auction operations.
//!
//! Every operation converts lower-layer failures into an
//! [`OperationOutcome`](crate::types::OperationOutcome) at this boundary;
//! nothing below the coordinator reaches the presentation layer as an
//! uncaught error.

use crate::client::accounts::{AccountRegistry, SigningIdentity};
use crate::client::error::{OperationError, ValidationError};
use crate::client::executor::TransactionExecutor;
use crate::client::gateway::AuctionGateway;
use crate::client::reader::AuctionStateReader;
use crate::types::{format_eth, OperationOutcome, SnapshotView, WinnerInfo};
use ethers::types::{H256, U256};
use ethers::utils::{parse_ether, to_checksum};
use std::sync::Arc;
use tracing::warn;

/// Single logical owner of the auction workflow. Operations take `&mut
/// self` because each refresh replaces the stored view wholesale; a
/// multi-threaded embedding must wrap the coordinator in a mutex.
pub struct AuctionCoordinator {
    registry: AccountRegistry,
    gateway: Arc<AuctionGateway>,
    executor: TransactionExecutor,
    reader: AuctionStateReader,
    last_view: SnapshotView,
}

impl AuctionCoordinator {
    pub fn new(
        registry: AccountRegistry,
        gateway: Arc<AuctionGateway>,
        executor: TransactionExecutor,
        reader: AuctionStateReader,
    ) -> Self {
        Self {
            registry,
            gateway,
            executor,
            reader,
            last_view: SnapshotView::Unavailable {
                reason: "auction state not fetched yet".to_string(),
            },
        }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn last_view(&self) -> &SnapshotView {
        &self.last_view
    }

    /// Place a bid of `amount_eth` ether under the given display name,
    /// signed by the account selected through `signer_addr`. A successful
    /// submission triggers an implicit refresh.
    pub async fn place_bid(
        &mut self,
        signer_addr: &str,
        name: &str,
        amount_eth: &str,
    ) -> OperationOutcome {
        match self.try_place_bid(signer_addr, name, amount_eth).await {
            Ok(hash) => {
                self.refresh().await;
                OperationOutcome::success(format!("Bid placed: transaction {:?}", hash))
            }
            Err(err) => OperationOutcome::error(format!("Bid failed: {}", err)),
        }
    }

    async fn try_place_bid(
        &self,
        signer_addr: &str,
        name: &str,
        amount_eth: &str,
    ) -> Result<H256, OperationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let value = parse_bid_amount(amount_eth)?;
        let signer = self.resolve_signer(signer_addr)?;

        let call = self.gateway.place_bid(name)?;
        Ok(self.executor.execute(&call, signer, value).await?)
    }

    /// End the auction. No client-side ownership pre-check is performed:
    /// the contract is the authority, and a non-owner's attempt fails at
    /// gas estimation or submission. Success triggers a refresh followed by
    /// a winner lookup, folded into the outcome message.
    pub async fn end_auction(&mut self, signer_addr: &str) -> OperationOutcome {
        match self.try_end_auction(signer_addr).await {
            Ok(hash) => {
                self.refresh().await;
                let winner = self.fetch_winner().await;
                let mut message = format!("Auction ended: transaction {:?}", hash);
                if let WinnerInfo::Decided {
                    name,
                    amount_wei,
                    address,
                } = &winner
                {
                    message.push_str(&format!(
                        "; winner {} ({}) at {} ETH",
                        name,
                        to_checksum(address, None),
                        format_eth(*amount_wei)
                    ));
                }
                OperationOutcome::success(message)
            }
            Err(err) => OperationOutcome::error(format!("Ending the auction failed: {}", err)),
        }
    }

    async fn try_end_auction(&self, signer_addr: &str) -> Result<H256, OperationError> {
        let signer = self.resolve_signer(signer_addr)?;
        let call = self.gateway.end_auction()?;
        Ok(self.executor.execute(&call, signer, U256::zero()).await?)
    }

    /// Replace the stored view with a freshly assembled one. A total read
    /// failure becomes an explicit `Unavailable` view instead of escaping
    /// to the caller, and disables end-auction eligibility as a side
    /// effect.
    pub async fn refresh(&mut self) -> SnapshotView {
        let view = match self.reader.read_snapshot().await {
            Ok(snapshot) => SnapshotView::Ready(snapshot),
            Err(err) => {
                warn!("State refresh failed: {}", err);
                SnapshotView::Unavailable {
                    reason: err.to_string(),
                }
            }
        };
        self.last_view = view.clone();
        view
    }

    pub async fn fetch_winner(&self) -> WinnerInfo {
        self.reader.read_winner().await
    }

    /// Advisory gate for offering the end-auction action: true iff a signer
    /// resolves and matches the last-known owner. The contract remains the
    /// authority on who may actually end the auction.
    pub fn end_auction_eligible(&self, signer_addr: Option<&str>) -> bool {
        let snapshot = match &self.last_view {
            SnapshotView::Ready(snapshot) => snapshot,
            SnapshotView::Unavailable { .. } => return false,
        };
        let signer = match signer_addr.and_then(|addr| self.registry.select_by_address(addr)) {
            Some(signer) => signer,
            None => return false,
        };
        signer.address() == snapshot.owner
    }

    fn resolve_signer(&self, signer_addr: &str) -> Result<&SigningIdentity, ValidationError> {
        self.registry
            .select_by_address(signer_addr)
            .ok_or(ValidationError::NoSigner)
    }
}

/// Parse a user-supplied decimal-ether amount into wei. Amounts with more
/// than 18 fractional digits are rejected, never truncated or rounded.
fn parse_bid_amount(amount_eth: &str) -> Result<U256, ValidationError> {
    let trimmed = amount_eth.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidAmount("empty amount".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(ValidationError::NonPositiveAmount);
    }
    let wei =
        parse_ether(trimmed).map_err(|err| ValidationError::InvalidAmount(err.to_string()))?;
    if wei.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(wei)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bid_amount_converts_ether_to_wei() {
        assert_eq!(
            parse_bid_amount("1.5").unwrap(),
            U256::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_bid_amount("2").unwrap(),
            U256::from(2_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_bid_amount_rejects_zero_and_negative() {
        assert_eq!(
            parse_bid_amount("0"),
            Err(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            parse_bid_amount("-1"),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_parse_bid_amount_rejects_garbage() {
        assert!(matches!(
            parse_bid_amount("abc"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_bid_amount("   "),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_bid_amount_rejects_excess_precision() {
        // 19 fractional digits cannot be represented in wei.
        assert!(matches!(
            parse_bid_amount("1.0000000000000000001"),
            Err(ValidationError::InvalidAmount(_))
        ));
    }
}
