//! # Bid Ranking Service
//!
//! Loads bids from a [`BidRepository`] and hands them to the pure
//! comparison engine. One service instance serves one bid kind: product
//! bids for sellers, shipping bids for shipping providers.

use crate::application::error::ApplicationResult;
use crate::domain::entities::CompetingBid;
use crate::domain::services::bid_comparison::{BidComparison, compute_bid_comparison, rank_bids};
use crate::domain::value_objects::{OrderId, PartyId, PriceTier};
use crate::infrastructure::persistence::traits::BidRepository;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One row of a buyer's view of the bids on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidStanding<B> {
    /// The effective bid.
    pub bid: B,
    /// 1-based competition rank.
    pub rank: usize,
    /// Percent above the lowest bid.
    pub diff_from_lowest: Decimal,
    /// Price-competitiveness bucket.
    pub tier: PriceTier,
}

/// Application service computing bid comparisons.
pub struct BidRankingService<B> {
    bids: Arc<dyn BidRepository<B>>,
}

impl<B> fmt::Debug for BidRankingService<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidRankingService").finish_non_exhaustive()
    }
}

impl<B: CompetingBid + Clone> BidRankingService<B> {
    /// Creates a service over the given repository.
    #[must_use]
    pub fn new(bids: Arc<dyn BidRepository<B>>) -> Self {
        Self { bids }
    }

    /// Computes `bidder_id`'s position among the bids on `order_id`.
    ///
    /// Returns `Ok(None)` when the bidder has not bid on the order.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` with `InvalidInput` if the order
    /// has no bids at all.
    pub fn compare_for_order(
        &self,
        order_id: &OrderId,
        bidder_id: &PartyId,
    ) -> ApplicationResult<Option<BidComparison>> {
        let bids = self.bids.find_by_order(order_id)?;
        let comparison = compute_bid_comparison(order_id, bidder_id, &bids)?;
        debug!(
            %order_id,
            %bidder_id,
            bids = bids.len(),
            rank = comparison.as_ref().map(|c| c.rank),
            "bid comparison computed"
        );
        Ok(comparison)
    }

    /// Computes a comparison for every order the bidder has bid on,
    /// ordered by order ID.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` if loading bids or comparing fails.
    pub fn comparisons_for_bidder(
        &self,
        bidder_id: &PartyId,
    ) -> ApplicationResult<Vec<BidComparison>> {
        let orders: BTreeSet<OrderId> = self
            .bids
            .find_by_bidder(bidder_id)?
            .iter()
            .map(|b| b.order_id().clone())
            .collect();

        let mut comparisons = Vec::with_capacity(orders.len());
        for order_id in &orders {
            if let Some(cmp) = self.compare_for_order(order_id, bidder_id)? {
                comparisons.push(cmp);
            }
        }
        debug!(%bidder_id, orders = comparisons.len(), "bidder dashboard computed");
        Ok(comparisons)
    }

    /// Ranks the effective bids on an order, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` if loading bids or ranking fails.
    pub fn standings(&self, order_id: &OrderId) -> ApplicationResult<Vec<BidStanding<B>>> {
        let bids = self.bids.find_by_order(order_id)?;
        let ranked = rank_bids(order_id, &bids)?;
        Ok(ranked
            .into_iter()
            .map(|r| BidStanding {
                bid: r.bid.clone(),
                rank: r.rank,
                diff_from_lowest: r.diff_from_lowest,
                tier: r.tier,
            })
            .collect())
    }
}
