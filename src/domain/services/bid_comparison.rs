//! # Bid Comparison
//!
//! Positions one bidder's offer among all competing bids on an order.
//!
//! Only each bidder's effective bid counts: when a bidder has several rows
//! for the same order, the most recently updated one wins. Rank uses
//! competition ranking, so equal amounts share a position.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::entities::Bid;
//! use marketplace_rfq::domain::services::bid_comparison::compute_bid_comparison;
//! use marketplace_rfq::domain::value_objects::{BidId, OrderId, PartyId, PriceTier, Timestamp};
//! use chrono::NaiveDate;
//!
//! let order = OrderId::new("ord-1");
//! let delivery = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let bid = |id: &str, seller: &str, amount: &str| {
//!     Bid::new(
//!         BidId::new(id),
//!         order.clone(),
//!         PartyId::new(seller),
//!         amount.parse().unwrap(),
//!         delivery,
//!         "Dock 4",
//!         Timestamp::now(),
//!     )
//!     .unwrap()
//! };
//! let bids = vec![bid("b1", "s1", "100"), bid("b2", "s2", "120")];
//!
//! let cmp = compute_bid_comparison(&order, &PartyId::new("s2"), &bids)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(cmp.rank, 2);
//! assert_eq!(cmp.tier, PriceTier::HighPrice);
//! ```

use crate::domain::entities::CompetingBid;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::ranking::{average, highest, lowest, percentage_diff, rank_position};
use crate::domain::value_objects::{OrderId, PartyId, Price, PriceTier};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// One bidder's competitive position on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidComparison {
    /// The order compared on.
    pub order_id: OrderId,
    /// The bidder the comparison was computed for.
    pub bidder_id: PartyId,
    /// The bidder's effective amount.
    pub my_bid: Price,
    /// Lowest effective amount on the order.
    pub lowest_bid: Price,
    /// Highest effective amount on the order.
    pub highest_bid: Price,
    /// Mean of the effective amounts.
    pub average_bid: Decimal,
    /// Percent above the lowest bid.
    pub diff_from_lowest: Decimal,
    /// Percent relative to the highest bid (zero or negative).
    pub diff_from_highest: Decimal,
    /// 1-based competition rank.
    pub rank: usize,
    /// Distinct bidders on the order.
    pub total_bidders: usize,
    /// Bidders other than this one.
    pub competitor_count: usize,
    /// Whether this bid ties for the lowest amount.
    pub is_lowest: bool,
    /// Whether this bid ties for the highest amount.
    pub is_highest: bool,
    /// Whether nobody else has bid.
    pub is_only_bidder: bool,
    /// Price-competitiveness bucket.
    pub tier: PriceTier,
}

impl BidComparison {
    fn only_bidder(order_id: &OrderId, bidder_id: &PartyId, amount: Price) -> Self {
        Self {
            order_id: order_id.clone(),
            bidder_id: bidder_id.clone(),
            my_bid: amount,
            lowest_bid: amount,
            highest_bid: amount,
            average_bid: amount.get(),
            diff_from_lowest: Decimal::ZERO,
            diff_from_highest: Decimal::ZERO,
            rank: 1,
            total_bidders: 1,
            competitor_count: 0,
            is_lowest: true,
            is_highest: true,
            is_only_bidder: true,
            tier: PriceTier::BestPrice,
        }
    }
}

impl fmt::Display for BidComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BidComparison(order={} bidder={} #{}/{} {} {})",
            self.order_id, self.bidder_id, self.rank, self.total_bidders, self.my_bid, self.tier
        )
    }
}

/// A bid with its position among the effective bids of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBid<'a, B> {
    /// The ranked bid.
    pub bid: &'a B,
    /// 1-based competition rank.
    pub rank: usize,
    /// Percent above the lowest bid.
    pub diff_from_lowest: Decimal,
    /// Price-competitiveness bucket.
    pub tier: PriceTier,
}

/// Reduces bids to one per bidder, keeping the most recently updated row.
///
/// Bidders keep the order of their first appearance. On equal `updated_at`
/// the later row in `bids` wins.
#[must_use]
pub fn effective_bids<'a, B: CompetingBid>(bids: impl IntoIterator<Item = &'a B>) -> Vec<&'a B> {
    let mut effective: Vec<&'a B> = Vec::new();
    for bid in bids {
        match effective
            .iter_mut()
            .find(|kept| kept.bidder_id() == bid.bidder_id())
        {
            Some(kept) => {
                if bid.updated_at() >= kept.updated_at() {
                    *kept = bid;
                }
            }
            None => effective.push(bid),
        }
    }
    effective
}

fn amounts<B: CompetingBid>(bids: &[&B]) -> Vec<Decimal> {
    bids.iter().map(|b| b.amount().get()).collect()
}

/// Computes `bidder_id`'s position among the bids on `order_id`.
///
/// `bids` may contain rows for other orders; they are ignored.
///
/// Returns `Ok(None)` when the bidder has no bid on the order. A bidder
/// alone on the order gets rank 1, zero diffs and [`PriceTier::BestPrice`].
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the order has no bids at all,
/// or `DomainError::Arithmetic` on overflow.
pub fn compute_bid_comparison<B: CompetingBid>(
    order_id: &OrderId,
    bidder_id: &PartyId,
    bids: &[B],
) -> DomainResult<Option<BidComparison>> {
    let effective = effective_bids(bids.iter().filter(|b| b.order_id() == order_id));
    if effective.is_empty() {
        return Err(DomainError::invalid_input(format!("order {order_id} has no bids")));
    }

    let Some(mine) = effective.iter().find(|b| b.bidder_id() == bidder_id) else {
        return Ok(None);
    };
    let my_bid = mine.amount();

    if effective.len() == 1 {
        return Ok(Some(BidComparison::only_bidder(order_id, bidder_id, my_bid)));
    }

    let values = amounts(&effective);
    let lowest_bid = Price::new(lowest(&values)?)?;
    let highest_bid = Price::new(highest(&values)?)?;

    let diff_from_lowest = percentage_diff(my_bid.get(), lowest_bid.get())?;
    let is_lowest = my_bid == lowest_bid;
    let total_bidders = effective.len();

    Ok(Some(BidComparison {
        order_id: order_id.clone(),
        bidder_id: bidder_id.clone(),
        my_bid,
        lowest_bid,
        highest_bid,
        average_bid: average(&values)?,
        diff_from_lowest,
        diff_from_highest: percentage_diff(my_bid.get(), highest_bid.get())?,
        rank: rank_position(&values, my_bid.get())?,
        total_bidders,
        competitor_count: total_bidders.saturating_sub(1),
        is_lowest,
        is_highest: my_bid == highest_bid,
        is_only_bidder: false,
        tier: PriceTier::classify(diff_from_lowest, is_lowest),
    }))
}

/// Ranks the effective bids on an order from cheapest to most expensive.
///
/// Equal amounts share a rank and are listed in submission order.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn rank_bids<'a, B: CompetingBid>(
    order_id: &OrderId,
    bids: &'a [B],
) -> DomainResult<Vec<RankedBid<'a, B>>> {
    let mut effective = effective_bids(bids.iter().filter(|b| b.order_id() == order_id));
    if effective.is_empty() {
        return Ok(Vec::new());
    }
    effective.sort_by(|a, b| {
        a.amount()
            .cmp(&b.amount())
            .then_with(|| a.created_at().cmp(&b.created_at()))
    });

    let values = amounts(&effective);
    let lowest = effective
        .first()
        .map_or(Decimal::ZERO, |b| b.amount().get());

    effective
        .into_iter()
        .map(|bid| {
            let amount = bid.amount().get();
            let diff_from_lowest = percentage_diff(amount, lowest)?;
            Ok(RankedBid {
                bid,
                rank: rank_position(&values, amount)?,
                diff_from_lowest,
                tier: PriceTier::classify(diff_from_lowest, amount == lowest),
            })
        })
        .collect()
}
