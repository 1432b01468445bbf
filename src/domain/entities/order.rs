//! # Order Entity
//!
//! A buyer's order for a catalogue item. Bids and shipping bids reference
//! an order by id; the order itself is owned by the buyer.

use crate::domain::entities::normalize_optional;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{ItemId, OrderId, OrderStatus, PartyId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A buyer order.
///
/// # Invariants
///
/// - `quantity > 0`
/// - `total_price ≥ 0`
/// - `notes` is `None` rather than blank
///
/// # Examples
///
/// ```
/// use marketplace_rfq::domain::entities::Order;
/// use marketplace_rfq::domain::value_objects::{ItemId, OrderId, PartyId, Price, Timestamp};
///
/// let order = Order::new(
///     OrderId::new("ord-1"),
///     ItemId::new("item-9"),
///     PartyId::new("buyer-1"),
///     12,
///     "480".parse::<Price>().unwrap(),
///     "1 Dock Road",
///     Timestamp::now(),
/// )
/// .unwrap()
/// .with_notes("  ");
///
/// assert_eq!(order.notes(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    item_id: ItemId,
    buyer_id: PartyId,
    quantity: u32,
    total_price: Price,
    status: OrderStatus,
    shipping_address: String,
    #[serde(default)]
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Creates a pending order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `quantity` is zero or the
    /// shipping address is blank.
    pub fn new(
        id: OrderId,
        item_id: ItemId,
        buyer_id: PartyId,
        quantity: u32,
        total_price: Price,
        shipping_address: impl Into<String>,
        created_at: Timestamp,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("order quantity must be positive"));
        }
        let shipping_address = shipping_address.into();
        if shipping_address.trim().is_empty() {
            return Err(DomainError::validation("shipping address is required"));
        }
        Ok(Self {
            id,
            item_id,
            buyer_id,
            quantity,
            total_price,
            status: OrderStatus::Pending,
            shipping_address,
            notes: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Sets the order notes; blank notes are stored as `None`.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_optional(Some(notes.into()));
        self
    }

    /// Returns a copy with the given status and update time.
    #[must_use]
    pub fn with_status(mut self, status: OrderStatus, updated_at: Timestamp) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }

    /// Returns the order ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the ordered item.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Returns the buyer.
    #[inline]
    #[must_use]
    pub fn buyer_id(&self) -> &PartyId {
        &self.buyer_id
    }

    /// Returns the ordered quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the total price.
    #[inline]
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the shipping address.
    #[inline]
    #[must_use]
    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    /// Returns the buyer's notes, if any.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns when the order was placed.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the order last changed.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({} item={} qty={} total={} status={})",
            self.id, self.item_id, self.quantity, self.total_price, self.status
        )
    }
}
