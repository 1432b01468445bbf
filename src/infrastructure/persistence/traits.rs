//! # Repository Traits
//!
//! Storage seams for the marketplace. Services hold `Arc<dyn ...>` handles
//! to these traits and never reach storage any other way. Implementations:
//! the in-memory repositories and [`JsonStore`](super::JsonStore).
//!
//! | Trait | Holds |
//! |-------|-------|
//! | [`RfqRepository`] | RFQs with their invites and quotes |
//! | [`SupplierRepository`] | supplier directory |
//! | [`MarketPriceRepository`] | observed market prices |
//! | [`BuyerProfileRepository`] | the buyer's own profile |
//! | [`BidRepository`] | product or shipping bids |
//!
//! ```
//! use marketplace_rfq::infrastructure::persistence::traits::RfqRepository;
//! use marketplace_rfq::domain::value_objects::RfqStatus;
//!
//! fn open_count(repo: &impl RfqRepository) -> usize {
//!     repo.find_by_status(RfqStatus::Open).map(|r| r.len()).unwrap_or(0)
//! }
//! ```

use crate::domain::entities::{BuyerProfile, CompetingBid, MarketPrice, Rfq, Supplier};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{OrderId, PartyId, RfqId, RfqStatus, SupplierId};
use std::fmt;
use thiserror::Error;

/// Storage failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record under the key.
    #[error("{entity_type} {id} does not exist")]
    NotFound {
        /// Record kind, e.g. `"Supplier"`.
        entity_type: &'static str,
        /// Lookup key.
        id: String,
    },

    /// A record already exists under the key.
    #[error("{entity_type} {id} already stored")]
    Duplicate {
        /// Record kind.
        entity_type: &'static str,
        /// Conflicting key.
        id: String,
    },

    /// Store file could not be read or written.
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON did not match the expected shape.
    #[error("store data malformed: {0}")]
    Serialization(String),

    /// Any other backend failure.
    #[error("store failure: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Missing record.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Key collision.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Malformed stored data.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Backend failure.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for [`RepositoryError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for [`RepositoryError::Duplicate`].
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result of a repository call.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// An edit applied to a stored RFQ by [`RfqRepository::update`].
pub type RfqChange<'a> = Box<dyn FnOnce(&mut Rfq) -> DomainResult<()> + 'a>;

/// Repository for RFQ aggregates.
///
/// An RFQ is stored whole, invites and quotes included.
pub trait RfqRepository: Send + Sync + fmt::Debug {
    /// Saves an RFQ, replacing any stored version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist the RFQ.
    fn save(&self, rfq: &Rfq) -> RepositoryResult<()>;

    /// Gets an RFQ by ID.
    ///
    /// Returns `None` if the RFQ does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get(&self, id: &RfqId) -> RepositoryResult<Option<Rfq>>;

    /// Applies `change` to the stored RFQ and saves the result, holding the
    /// store's write lock from read to write.
    ///
    /// Returns `Ok(None)` if no RFQ has the ID and `Ok(Some(Err(_)))` if
    /// `change` refused; nothing is written in either case. Otherwise
    /// returns the saved RFQ.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist the RFQ.
    fn update(
        &self,
        id: &RfqId,
        change: RfqChange<'_>,
    ) -> RepositoryResult<Option<DomainResult<Rfq>>>;

    /// Finds the RFQ holding the invite with the given token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_invite_token(&self, token: &str) -> RepositoryResult<Option<Rfq>>;

    /// Gets all RFQs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get_all(&self) -> RepositoryResult<Vec<Rfq>>;

    /// Finds RFQs in the given status, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_status(&self, status: RfqStatus) -> RepositoryResult<Vec<Rfq>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.status() == status)
            .collect())
    }

    /// Deletes an RFQ by ID.
    ///
    /// Returns `Ok(true)` if the RFQ was deleted, `Ok(false)` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn delete(&self, id: &RfqId) -> RepositoryResult<bool>;

    /// Counts all RFQs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for supplier reference data.
pub trait SupplierRepository: Send + Sync + fmt::Debug {
    /// Saves a supplier, replacing any stored version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist the supplier.
    fn save(&self, supplier: &Supplier) -> RepositoryResult<()>;

    /// Gets a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>>;

    /// Gets all suppliers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get_all(&self) -> RepositoryResult<Vec<Supplier>>;

    /// Finds suppliers by name (case-insensitive partial match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Supplier>> {
        let needle = name.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Deletes a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn delete(&self, id: &SupplierId) -> RepositoryResult<bool>;
}

/// Repository for market price observations.
pub trait MarketPriceRepository: Send + Sync + fmt::Debug {
    /// Appends an observation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist it.
    fn add(&self, price: &MarketPrice) -> RepositoryResult<()>;

    /// Gets every observation in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get_all(&self) -> RepositoryResult<Vec<MarketPrice>>;

    /// Finds observations for a product (case-insensitive exact match),
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_product(&self, product_name: &str) -> RepositoryResult<Vec<MarketPrice>> {
        let mut found: Vec<MarketPrice> = self
            .get_all()?
            .into_iter()
            .filter(|p| p.product_name.eq_ignore_ascii_case(product_name))
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }
}

/// Repository for the buyer's profile.
pub trait BuyerProfileRepository: Send + Sync + fmt::Debug {
    /// Returns the stored profile, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn get_profile(&self) -> RepositoryResult<Option<BuyerProfile>>;

    /// Replaces the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist it.
    fn save_profile(&self, profile: &BuyerProfile) -> RepositoryResult<()>;
}

/// Repository for competing bids of one kind.
///
/// Bids are keyed by their ID; saving a bid with a known ID replaces it.
pub trait BidRepository<B: CompetingBid>: Send + Sync + fmt::Debug {
    /// Saves a bid, replacing any stored bid with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot persist the bid.
    fn save(&self, bid: &B) -> RepositoryResult<()>;

    /// Finds every bid on an order, in submission order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_order(&self, order_id: &OrderId) -> RepositoryResult<Vec<B>>;

    /// Finds every bid placed by a bidder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn find_by_bidder(&self, bidder_id: &PartyId) -> RepositoryResult<Vec<B>>;

    /// Counts all bids.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` on backend failure.
    fn count(&self) -> RepositoryResult<u64>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn repository_error_helpers() {
        assert!(RepositoryError::not_found("Rfq", "x").is_not_found());
        assert!(RepositoryError::duplicate("Rfq", "x").is_duplicate());
        assert!(!RepositoryError::internal("boom").is_not_found());
    }

    #[test]
    fn repository_error_display() {
        let err = RepositoryError::not_found("Supplier", "s-1");
        assert_eq!(err.to_string(), "Supplier s-1 does not exist");
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RepositoryError = parse.into();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
