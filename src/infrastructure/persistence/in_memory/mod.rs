//! # In-Memory Repositories
//!
//! In-memory implementations for testing without a store file.
//!
//! ## Available Repositories
//!
//! - [`InMemoryRfqRepository`]: RFQ persistence
//! - [`InMemorySupplierRepository`]: supplier reference data
//! - [`InMemoryMarketDataRepository`]: market prices and buyer profile
//! - [`InMemoryBidRepository`]: product or shipping bids
//!
//! ## Thread Safety
//!
//! Map-backed repositories use `Arc<parking_lot::RwLock<_>>`; bids live in a
//! `DashMap` keyed by order.

pub mod bid_repository;
pub mod reference_repository;
pub mod rfq_repository;

pub use bid_repository::InMemoryBidRepository;
pub use reference_repository::{InMemoryMarketDataRepository, InMemorySupplierRepository};
pub use rfq_repository::InMemoryRfqRepository;
