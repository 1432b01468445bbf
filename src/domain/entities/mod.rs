//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Rfq`]: request for quote, owning its invites and quotes
//!
//! ## Entities
//!
//! - [`Order`]: a buyer order that bids compete for
//! - [`Bid`], [`ShippingBid`]: competing offers, viewed through [`CompetingBid`]
//! - [`SupplierInvite`], [`Quote`]: RFQ participation and pricing
//! - [`Supplier`], [`BuyerProfile`], [`MarketPrice`]: reference data

pub mod bid;
pub mod invite;
pub mod order;
pub mod quote;
pub mod rfq;
pub mod supplier;

pub use bid::{Bid, CompetingBid, ShippingBid};
pub use invite::SupplierInvite;
pub use order::Order;
pub use quote::{Quote, QuoteSubmission};
pub use rfq::{Award, NewRfq, QuoteOutcome, Rfq};
pub use supplier::{BuyerProfile, MarketPrice, Supplier};

/// Collapses blank optional text to `None`, trimming surrounding whitespace.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
