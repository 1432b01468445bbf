//! # Domain Services
//!
//! Pure computations that span several entities.
//!
//! ## Services
//!
//! - [`ranking`]: min / max / mean, percentage difference and competition rank
//! - [`bid_comparison`]: a bidder's position among the bids on an order
//! - [`quote_comparison`]: lowest quote and quote board for an RFQ

pub mod bid_comparison;
pub mod quote_comparison;
pub mod ranking;

pub use bid_comparison::{BidComparison, RankedBid, compute_bid_comparison, effective_bids, rank_bids};
pub use quote_comparison::{RankedQuote, compare_quotes, get_lowest_quote};
