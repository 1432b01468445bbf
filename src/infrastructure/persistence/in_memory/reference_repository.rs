//! # In-Memory Reference Data
//!
//! Suppliers, market prices and the buyer profile held in memory.

use crate::domain::entities::{BuyerProfile, MarketPrice, Supplier};
use crate::domain::value_objects::SupplierId;
use crate::infrastructure::persistence::traits::{
    BuyerProfileRepository, MarketPriceRepository, RepositoryResult, SupplierRepository,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory implementation of [`SupplierRepository`].
///
/// Suppliers are kept ordered by ID.
#[derive(Debug, Clone, Default)]
pub struct InMemorySupplierRepository {
    storage: Arc<RwLock<BTreeMap<SupplierId, Supplier>>>,
}

impl InMemorySupplierRepository {
    /// Creates a new empty supplier repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given suppliers.
    #[must_use]
    pub fn with_suppliers(suppliers: impl IntoIterator<Item = Supplier>) -> Self {
        let storage = suppliers.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    /// Returns the number of suppliers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Returns true if no suppliers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SupplierRepository for InMemorySupplierRepository {
    fn save(&self, supplier: &Supplier) -> RepositoryResult<()> {
        self.storage
            .write()
            .insert(supplier.id.clone(), supplier.clone());
        Ok(())
    }

    fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>> {
        Ok(self.storage.read().get(id).cloned())
    }

    fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        Ok(self.storage.read().values().cloned().collect())
    }

    fn delete(&self, id: &SupplierId) -> RepositoryResult<bool> {
        Ok(self.storage.write().remove(id).is_some())
    }
}

/// In-memory market prices and buyer profile.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataRepository {
    prices: Arc<RwLock<Vec<MarketPrice>>>,
    profile: Arc<RwLock<Option<BuyerProfile>>>,
}

impl InMemoryMarketDataRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarketPriceRepository for InMemoryMarketDataRepository {
    fn add(&self, price: &MarketPrice) -> RepositoryResult<()> {
        self.prices.write().push(price.clone());
        Ok(())
    }

    fn get_all(&self) -> RepositoryResult<Vec<MarketPrice>> {
        Ok(self.prices.read().clone())
    }
}

impl BuyerProfileRepository for InMemoryMarketDataRepository {
    fn get_profile(&self) -> RepositoryResult<Option<BuyerProfile>> {
        Ok(self.profile.read().clone())
    }

    fn save_profile(&self, profile: &BuyerProfile) -> RepositoryResult<()> {
        *self.profile.write() = Some(profile.clone());
        Ok(())
    }
}
