//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`RfqRepository`]: RFQ aggregates
//! - [`SupplierRepository`]: supplier reference data
//! - [`MarketPriceRepository`]: market price observations
//! - [`BuyerProfileRepository`]: the buyer profile
//! - [`BidRepository`]: product and shipping bids
//!
//! ## Implementations
//!
//! - `in_memory`: in-memory implementations for tests and embedding
//! - `json_store`: single-file JSON keyed store with date revival

pub mod in_memory;
pub mod json_store;
pub mod traits;

pub use json_store::JsonStore;
pub use traits::{
    BidRepository, BuyerProfileRepository, MarketPriceRepository, RepositoryError,
    RepositoryResult, RfqChange, RfqRepository, SupplierRepository,
};
