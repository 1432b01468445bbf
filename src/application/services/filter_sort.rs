//! # Filter and Sort
//!
//! List views over orders, bids and RFQs: a case-insensitive text search
//! across a few fields, an exact-match category filter, then a stable sort
//! on one key. Items with equal keys keep their input order in both
//! directions.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::application::services::filter_sort::{
//!     CategoryFilter, OrderQuery, OrderSortField, SortDirection, filter_and_sort_orders,
//! };
//! use marketplace_rfq::domain::value_objects::OrderStatus;
//!
//! let query = OrderQuery::new()
//!     .search("warehouse")
//!     .status(CategoryFilter::Only(OrderStatus::Pending))
//!     .sort(OrderSortField::TotalPrice, SortDirection::Ascending);
//! assert!(filter_and_sort_orders(Vec::new(), &query).is_empty());
//! ```

use crate::domain::entities::{CompetingBid, Order, Rfq};
use crate::domain::value_objects::{BidStatus, OrderStatus, RfqStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

/// Exact-match filter on a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter<T> {
    /// Keep everything.
    All,
    /// Keep items whose category equals the value.
    Only(T),
}

impl<T> Default for CategoryFilter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> CategoryFilter<T> {
    /// Returns true if `value` passes the filter.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// Returns true if any field contains `query`, ignoring case.
///
/// A blank query matches everything.
#[must_use]
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

fn sort_stable<T>(items: &mut [T], direction: SortDirection, cmp: impl Fn(&T, &T) -> Ordering) {
    items.sort_by(|a, b| match direction {
        SortDirection::Ascending => cmp(a, b),
        SortDirection::Descending => cmp(b, a),
    });
}

// ========== Orders ==========

/// Sort keys for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderSortField {
    /// Creation date.
    #[default]
    CreatedAt,
    /// Ordered quantity.
    Quantity,
    /// Order total.
    TotalPrice,
    /// Status name, alphabetically.
    Status,
}

/// Filter and sort settings for an order list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderQuery {
    /// Text matched against ID, item, shipping address and notes.
    pub search: String,
    /// Status filter.
    pub status: CategoryFilter<OrderStatus>,
    /// Sort key.
    pub sort_by: OrderSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl OrderQuery {
    /// Newest first, no filtering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn status(mut self, status: CategoryFilter<OrderStatus>) -> Self {
        self.status = status;
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sort(mut self, field: OrderSortField, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.direction = direction;
        self
    }
}

/// Filters and sorts orders.
#[must_use]
pub fn filter_and_sort_orders(orders: Vec<Order>, query: &OrderQuery) -> Vec<Order> {
    let mut kept: Vec<Order> = orders
        .into_iter()
        .filter(|o| query.status.matches(&o.status()))
        .filter(|o| {
            matches_search(
                &query.search,
                &[
                    o.id().as_str(),
                    o.item_id().as_str(),
                    o.shipping_address(),
                    o.notes().unwrap_or_default(),
                ],
            )
        })
        .collect();
    sort_stable(&mut kept, query.direction, |a, b| match query.sort_by {
        OrderSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        OrderSortField::Quantity => a.quantity().cmp(&b.quantity()),
        OrderSortField::TotalPrice => a.total_price().cmp(&b.total_price()),
        OrderSortField::Status => a.status().as_str().cmp(b.status().as_str()),
    });
    kept
}

// ========== Bids ==========

/// Sort keys for bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BidSortField {
    /// Submission date.
    #[default]
    CreatedAt,
    /// Bid amount.
    Amount,
    /// Status priority: pending, accepted, rejected, then anything else.
    StatusPriority,
}

/// Filter and sort settings for a bid list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidQuery {
    /// Text matched against bid ID, order ID, bidder and message.
    pub search: String,
    /// Status filter.
    pub status: CategoryFilter<BidStatus>,
    /// Sort key.
    pub sort_by: BidSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl BidQuery {
    /// Newest first, no filtering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn status(mut self, status: CategoryFilter<BidStatus>) -> Self {
        self.status = status;
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sort(mut self, field: BidSortField, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.direction = direction;
        self
    }
}

/// Filters and sorts product or shipping bids.
#[must_use]
pub fn filter_and_sort_bids<B: CompetingBid>(bids: Vec<B>, query: &BidQuery) -> Vec<B> {
    let mut kept: Vec<B> = bids
        .into_iter()
        .filter(|b| query.status.matches(&b.status()))
        .filter(|b| {
            matches_search(
                &query.search,
                &[
                    b.id().as_str(),
                    b.order_id().as_str(),
                    b.bidder_id().as_str(),
                    b.message().unwrap_or_default(),
                ],
            )
        })
        .collect();
    sort_stable(&mut kept, query.direction, |a, b| match query.sort_by {
        BidSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        BidSortField::Amount => a.amount().cmp(&b.amount()),
        BidSortField::StatusPriority => a.status().priority().cmp(&b.status().priority()),
    });
    kept
}

// ========== RFQs ==========

/// Sort keys for RFQs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RfqSortField {
    /// Creation date.
    #[default]
    CreatedAt,
    /// Required-by date.
    RequiredByDate,
    /// Requested quantity.
    Quantity,
    /// Product name, case-insensitive.
    ProductName,
}

/// Filter and sort settings for an RFQ list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RfqQuery {
    /// Text matched against product name, specs, unit and notes.
    pub search: String,
    /// Status filter.
    pub status: CategoryFilter<RfqStatus>,
    /// Sort key.
    pub sort_by: RfqSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl RfqQuery {
    /// Newest first, no filtering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn status(mut self, status: CategoryFilter<RfqStatus>) -> Self {
        self.status = status;
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sort(mut self, field: RfqSortField, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.direction = direction;
        self
    }
}

/// Filters and sorts RFQs.
#[must_use]
pub fn filter_and_sort_rfqs(rfqs: Vec<Rfq>, query: &RfqQuery) -> Vec<Rfq> {
    let mut kept: Vec<Rfq> = rfqs
        .into_iter()
        .filter(|r| query.status.matches(&r.status()))
        .filter(|r| {
            matches_search(
                &query.search,
                &[
                    r.product_name(),
                    r.specs(),
                    r.unit(),
                    r.notes().unwrap_or_default(),
                ],
            )
        })
        .collect();
    sort_stable(&mut kept, query.direction, |a, b| match query.sort_by {
        RfqSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        RfqSortField::RequiredByDate => a.required_by_date().cmp(&b.required_by_date()),
        RfqSortField::Quantity => a.quantity().cmp(&b.quantity()),
        RfqSortField::ProductName => a
            .product_name()
            .to_lowercase()
            .cmp(&b.product_name().to_lowercase()),
    });
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{Bid, NewRfq};
    use crate::domain::value_objects::{
        BidId, ItemId, OrderId, PartyId, Price, RfqId, Timestamp,
    };
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_secs(secs).unwrap()
    }

    fn order(id: &str, qty: u32, total: i64, address: &str, at: i64) -> Order {
        Order::new(
            OrderId::new(id),
            ItemId::new(format!("item-{id}")),
            PartyId::new("buyer"),
            qty,
            Price::new(Decimal::from(total)).unwrap(),
            address,
            ts(at),
        )
        .unwrap()
    }

    fn bid(id: &str, amount: i64, status: BidStatus, at: i64) -> Bid {
        Bid::new(
            BidId::new(id),
            OrderId::new("o1"),
            PartyId::new(format!("seller-{id}")),
            Price::new(Decimal::from(amount)).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Dock",
            ts(at),
        )
        .unwrap()
        .with_status(status, ts(at))
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> String) -> Vec<String> {
        items.iter().map(id).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("WARE", &["North warehouse"]));
        assert!(matches_search("  ", &["anything"]));
        assert!(!matches_search("dock", &["warehouse", ""]));
    }

    #[test]
    fn orders_search_filter_and_sort() {
        let orders = vec![
            order("o1", 5, 300, "North Warehouse", 1),
            order("o2", 9, 100, "South Depot", 2),
            order("o3", 1, 200, "East warehouse", 3),
        ];
        let query = OrderQuery::new()
            .search("warehouse")
            .sort(OrderSortField::TotalPrice, SortDirection::Ascending);
        let result = filter_and_sort_orders(orders.clone(), &query);
        assert_eq!(ids(&result, |o| o.id().to_string()), ["o3", "o1"]);

        let newest = filter_and_sort_orders(orders.clone(), &OrderQuery::new());
        assert_eq!(ids(&newest, |o| o.id().to_string()), ["o3", "o2", "o1"]);

        let cancelled = OrderQuery::new().status(CategoryFilter::Only(OrderStatus::Cancelled));
        assert!(filter_and_sort_orders(orders, &cancelled).is_empty());
    }

    #[test]
    fn bids_status_priority_with_unknown_last() {
        let bids = vec![
            bid("r", 10, BidStatus::Rejected, 1),
            bid("u", 10, BidStatus::Unknown, 2),
            bid("p", 10, BidStatus::Pending, 3),
            bid("a", 10, BidStatus::Accepted, 4),
        ];
        let query = BidQuery::new().sort(BidSortField::StatusPriority, SortDirection::Ascending);
        let sorted = filter_and_sort_bids(bids, &query);
        assert_eq!(ids(&sorted, |b| b.id().to_string()), ["p", "a", "r", "u"]);
    }

    #[test]
    fn bids_equal_keys_keep_input_order_both_ways() {
        let bids = vec![
            bid("first", 10, BidStatus::Pending, 1),
            bid("second", 10, BidStatus::Pending, 2),
            bid("cheap", 5, BidStatus::Pending, 3),
        ];
        let asc = filter_and_sort_bids(
            bids.clone(),
            &BidQuery::new().sort(BidSortField::Amount, SortDirection::Ascending),
        );
        assert_eq!(ids(&asc, |b| b.id().to_string()), ["cheap", "first", "second"]);

        let desc = filter_and_sort_bids(
            bids,
            &BidQuery::new().sort(BidSortField::Amount, SortDirection::Descending),
        );
        assert_eq!(ids(&desc, |b| b.id().to_string()), ["first", "second", "cheap"]);
    }

    #[test]
    fn bids_filtered_by_status_and_bidder_text() {
        let bids = vec![
            bid("x", 10, BidStatus::Accepted, 1),
            bid("y", 11, BidStatus::Pending, 2),
        ];
        let accepted = BidQuery::new().status(CategoryFilter::Only(BidStatus::Accepted));
        assert_eq!(filter_and_sort_bids(bids.clone(), &accepted).len(), 1);

        let by_seller = BidQuery::new().search("SELLER-Y");
        let found = filter_and_sort_bids(bids, &by_seller);
        assert_eq!(ids(&found, |b| b.id().to_string()), ["y"]);
    }

    #[test]
    fn rfqs_by_product_name() {
        let rfq = |name: &str, at: i64| {
            Rfq::new(
                RfqId::new_v4(),
                NewRfq::new(name, "grade A", Decimal::ONE, "kg", ts(at)),
                ts(at),
            )
            .unwrap()
        };
        let rfqs = vec![rfq("zinc", 1), rfq("Aluminium", 2), rfq("copper", 3)];
        let query = RfqQuery::new()
            .search("GRADE")
            .sort(RfqSortField::ProductName, SortDirection::Ascending);
        let sorted = filter_and_sort_rfqs(rfqs.clone(), &query);
        assert_eq!(
            ids(&sorted, |r| r.product_name().to_string()),
            ["Aluminium", "copper", "zinc"]
        );

        let open = RfqQuery::new().status(CategoryFilter::Only(RfqStatus::Open));
        assert!(filter_and_sort_rfqs(rfqs, &open).is_empty());
    }

    proptest! {
        #[test]
        fn sort_is_stable(amounts in prop::collection::vec(1i64..5, 0..30)) {
            let bids: Vec<Bid> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| bid(&format!("b{i:02}"), *a, BidStatus::Pending, 0))
                .collect();
            let sorted = filter_and_sort_bids(
                bids,
                &BidQuery::new().sort(BidSortField::Amount, SortDirection::Ascending),
            );
            for pair in sorted.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.amount() <= b.amount());
                if a.amount() == b.amount() {
                    prop_assert!(a.id().as_str() < b.id().as_str());
                }
            }
        }
    }
}
