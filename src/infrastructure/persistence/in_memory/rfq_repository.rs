//! # In-Memory RFQ Repository
//!
//! In-memory implementation of [`RfqRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests without a store file.

use crate::domain::entities::Rfq;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::RfqId;
use crate::infrastructure::persistence::traits::{RepositoryResult, RfqChange, RfqRepository};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory implementation of [`RfqRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryRfqRepository {
    storage: Arc<RwLock<HashMap<RfqId, Rfq>>>,
}

impl InMemoryRfqRepository {
    /// Creates a new empty in-memory RFQ repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of RFQs in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all RFQs from the repository.
    pub fn clear(&self) {
        self.storage.write().clear();
    }
}

impl RfqRepository for InMemoryRfqRepository {
    fn save(&self, rfq: &Rfq) -> RepositoryResult<()> {
        self.storage.write().insert(rfq.id(), rfq.clone());
        Ok(())
    }

    fn get(&self, id: &RfqId) -> RepositoryResult<Option<Rfq>> {
        Ok(self.storage.read().get(id).cloned())
    }

    fn update(
        &self,
        id: &RfqId,
        change: RfqChange<'_>,
    ) -> RepositoryResult<Option<DomainResult<Rfq>>> {
        let mut storage = self.storage.write();
        let Some(stored) = storage.get_mut(id) else {
            return Ok(None);
        };
        let mut edited = stored.clone();
        if let Err(err) = change(&mut edited) {
            return Ok(Some(Err(err)));
        }
        *stored = edited.clone();
        Ok(Some(Ok(edited)))
    }

    fn find_by_invite_token(&self, token: &str) -> RepositoryResult<Option<Rfq>> {
        let storage = self.storage.read();
        Ok(storage
            .values()
            .find(|rfq| rfq.invite_by_token(token).is_some())
            .cloned())
    }

    fn get_all(&self) -> RepositoryResult<Vec<Rfq>> {
        let mut all: Vec<Rfq> = self.storage.read().values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(all)
    }

    fn delete(&self, id: &RfqId) -> RepositoryResult<bool> {
        Ok(self.storage.write().remove(id).is_some())
    }

    fn count(&self) -> RepositoryResult<u64> {
        Ok(self.storage.read().len() as u64)
    }
}
