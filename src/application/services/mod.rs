//! # Application Services
//!
//! Services that load state through the repository traits, call the domain
//! and persist the result.
//!
//! - [`RfqLifecycleService`]: create, invite, quote, award and close RFQs
//! - [`BidRankingService`]: bid comparisons for bidders and buyers
//! - [`filter_sort`]: search, filter and stable sort for list views

pub mod bid_ranking;
pub mod filter_sort;
pub mod rfq_lifecycle;

pub use bid_ranking::{BidRankingService, BidStanding};
pub use filter_sort::{
    BidQuery, BidSortField, CategoryFilter, OrderQuery, OrderSortField, RfqQuery, RfqSortField,
    SortDirection, filter_and_sort_bids, filter_and_sort_orders, filter_and_sort_rfqs,
    matches_search,
};
pub use rfq_lifecycle::RfqLifecycleService;
