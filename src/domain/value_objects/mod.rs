//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`RfqId`], [`QuoteId`], [`InviteId`]: UUID-based identifiers
//! - [`OrderId`], [`BidId`], [`ItemId`], [`PartyId`], [`SupplierId`]:
//!   string-based identifiers owned by the hosted backend
//!
//! ## Numeric Types
//!
//! - [`Price`]: non-negative decimal amount
//! - [`CheckedArithmetic`]: overflow-aware decimal operations
//!
//! ## Domain Enums
//!
//! - [`OrderStatus`], [`BidStatus`], [`RfqStatus`], [`InviteStatus`]
//! - [`PriceTier`]: qualitative competitiveness bucket

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod price;
pub mod tier;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, checked_sum};
pub use enums::{BidStatus, InviteStatus, OrderStatus, ParseEnumError, RfqStatus};
pub use ids::{BidId, InviteId, ItemId, OrderId, PartyId, QuoteId, RfqId, SupplierId};
pub use price::Price;
pub use tier::PriceTier;
pub use timestamp::Timestamp;
