//! # In-Memory Bid Repository
//!
//! In-memory implementation of [`BidRepository`] for testing.
//!
//! Uses [`DashMap`] for thread-safe concurrent access, keyed by order
//! identifier. Works for any [`CompetingBid`] kind.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::entities::Bid;
//! use marketplace_rfq::infrastructure::persistence::in_memory::InMemoryBidRepository;
//!
//! let repo: InMemoryBidRepository<Bid> = InMemoryBidRepository::new();
//! assert_eq!(repo.order_count(), 0);
//! ```

use crate::domain::entities::CompetingBid;
use crate::domain::value_objects::{OrderId, PartyId};
use crate::infrastructure::persistence::traits::{BidRepository, RepositoryResult};
use dashmap::DashMap;

/// In-memory bid storage, one list per order.
#[derive(Debug)]
pub struct InMemoryBidRepository<B> {
    /// Bids stored per order, in the order they were first saved.
    bids: DashMap<OrderId, Vec<B>>,
}

impl<B> Default for InMemoryBidRepository<B> {
    fn default() -> Self {
        Self {
            bids: DashMap::new(),
        }
    }
}

impl<B> InMemoryBidRepository<B> {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders with at least one bid.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.bids.len()
    }
}

impl<B> BidRepository<B> for InMemoryBidRepository<B>
where
    B: CompetingBid + Clone + Send + Sync,
{
    fn save(&self, bid: &B) -> RepositoryResult<()> {
        let mut entry = self.bids.entry(bid.order_id().clone()).or_default();
        match entry.iter_mut().find(|stored| stored.id() == bid.id()) {
            Some(stored) => *stored = bid.clone(),
            None => entry.push(bid.clone()),
        }
        Ok(())
    }

    fn find_by_order(&self, order_id: &OrderId) -> RepositoryResult<Vec<B>> {
        Ok(self
            .bids
            .get(order_id)
            .map(|bids| bids.value().clone())
            .unwrap_or_default())
    }

    fn find_by_bidder(&self, bidder_id: &PartyId) -> RepositoryResult<Vec<B>> {
        let mut found: Vec<B> = self
            .bids
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|b| b.bidder_id() == bidder_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(found)
    }

    fn count(&self) -> RepositoryResult<u64> {
        Ok(self
            .bids
            .iter()
            .map(|entry| entry.value().len() as u64)
            .sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::ShippingBid;
    use crate::domain::value_objects::{BidId, Timestamp};
    use chrono::NaiveDate;

    fn ship(id: &str, order: &str, provider: &str, amount: &str, at: i64) -> ShippingBid {
        ShippingBid::new(
            BidId::new(id),
            OrderId::new(order),
            PartyId::new(provider),
            amount.parse().unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Timestamp::from_secs(at).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn save_groups_by_order() {
        let repo = InMemoryBidRepository::new();
        repo.save(&ship("b1", "o1", "p1", "10", 1)).unwrap();
        repo.save(&ship("b2", "o1", "p2", "12", 2)).unwrap();
        repo.save(&ship("b3", "o2", "p1", "20", 3)).unwrap();

        assert_eq!(repo.order_count(), 2);
        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.find_by_order(&OrderId::new("o1")).unwrap().len(), 2);
        assert!(repo.find_by_order(&OrderId::new("none")).unwrap().is_empty());
    }

    #[test]
    fn save_replaces_same_id() {
        let repo = InMemoryBidRepository::new();
        repo.save(&ship("b1", "o1", "p1", "10", 1)).unwrap();
        repo.save(&ship("b1", "o1", "p1", "9", 1)).unwrap();

        let bids = repo.find_by_order(&OrderId::new("o1")).unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].amount().to_string(), "9");
    }

    #[test]
    fn find_by_bidder_across_orders() {
        let repo = InMemoryBidRepository::new();
        repo.save(&ship("b3", "o2", "p1", "20", 3)).unwrap();
        repo.save(&ship("b1", "o1", "p1", "10", 1)).unwrap();
        repo.save(&ship("b2", "o1", "p2", "12", 2)).unwrap();

        let mine = repo.find_by_bidder(&PartyId::new("p1")).unwrap();
        let ids: Vec<&str> = mine.iter().map(|b| b.id().as_str()).collect();
        assert_eq!(ids, ["b1", "b3"]);
    }
}
