//! # Marketplace RFQ
//!
//! Bid ranking and RFQ quote comparison for a B2B marketplace.
//!
//! Sellers and shipping providers see where their bid stands on an order:
//! rank, distance from the lowest and highest bids, and a price tier.
//! Buyers run requests for quotation: invite suppliers, collect one quote
//! per supplier, compare quotes and award a winner.
//!
//! ## Layers
//!
//! - [`domain`]: entities, value objects and pure ranking services
//! - [`application`]: the RFQ lifecycle, bid ranking and list filtering
//! - [`infrastructure`]: repositories (in-memory and a JSON file store),
//!   ID generation and clocks
//! - [`config`] and [`telemetry`]: settings and `tracing` setup
//!
//! ## Example
//!
//! ```
//! use marketplace_rfq::application::services::RfqLifecycleService;
//! use marketplace_rfq::domain::entities::{NewRfq, Supplier};
//! use marketplace_rfq::domain::value_objects::{SupplierId, Timestamp};
//! use marketplace_rfq::infrastructure::persistence::in_memory::{
//!     InMemoryRfqRepository, InMemorySupplierRepository,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let acme = Supplier::new(SupplierId::new("acme"), "Acme", "sales@acme.test", "", "")?;
//! let service = RfqLifecycleService::with_defaults(
//!     Arc::new(InMemoryRfqRepository::new()),
//!     Arc::new(InMemorySupplierRepository::with_suppliers([acme])),
//! );
//!
//! let due = Timestamp::now().add_days(14);
//! let rfq = service.create_rfq(NewRfq::new("Copper wire", "2.5mm", Decimal::from(100), "m", due))?;
//! let invite = service.add_invite_to_rfq(rfq.id(), &SupplierId::new("acme"))?;
//! assert_eq!(invite.supplier_id().as_str(), "acme");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
