//! # Bid Entities
//!
//! Competing offers placed against a buyer order.
//!
//! Sellers place product [`Bid`]s; shipping providers place
//! [`ShippingBid`]s. Both share the [`CompetingBid`] view so the comparison
//! engine ranks either kind with the same code.

use crate::domain::entities::normalize_optional;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{BidId, BidStatus, OrderId, PartyId, Price, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of a bid competing for an order.
pub trait CompetingBid: fmt::Debug {
    /// The bid's identifier.
    fn id(&self) -> &BidId;

    /// The order being bid on.
    fn order_id(&self) -> &OrderId;

    /// The seller or shipping provider who placed the bid.
    fn bidder_id(&self) -> &PartyId;

    /// The offered amount.
    fn amount(&self) -> Price;

    /// The bid's status.
    fn status(&self) -> BidStatus;

    /// Optional message to the buyer.
    fn message(&self) -> Option<&str>;

    /// When the bid was submitted.
    fn created_at(&self) -> Timestamp;

    /// When the bid was last edited.
    fn updated_at(&self) -> Timestamp;
}

fn validate_amount(amount: Price) -> DomainResult<()> {
    if !amount.is_positive() {
        return Err(DomainError::InvalidPrice(
            "bid amount must be positive".to_string(),
        ));
    }
    Ok(())
}

/// A seller's product bid on an order.
///
/// # Invariants
///
/// - `bid_amount > 0`
/// - `pickup_address` is not blank
///
/// # Examples
///
/// ```
/// use marketplace_rfq::domain::entities::{Bid, CompetingBid};
/// use marketplace_rfq::domain::value_objects::{BidId, OrderId, PartyId, Timestamp};
/// use chrono::NaiveDate;
///
/// let bid = Bid::new(
///     BidId::new("bid-1"),
///     OrderId::new("ord-1"),
///     PartyId::new("seller-1"),
///     "120".parse().unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     "Unit 3, Mill Lane",
///     Timestamp::now(),
/// )
/// .unwrap()
/// .with_message("Can ship early");
///
/// assert_eq!(bid.bidder_id().as_str(), "seller-1");
/// assert_eq!(bid.message(), Some("Can ship early"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    id: BidId,
    order_id: OrderId,
    seller_id: PartyId,
    bid_amount: Price,
    estimated_delivery: NaiveDate,
    #[serde(default)]
    message: Option<String>,
    pickup_address: String,
    status: BidStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Bid {
    /// Creates a pending product bid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the amount is not positive.
    /// Returns `DomainError::ValidationError` if the pickup address is blank.
    pub fn new(
        id: BidId,
        order_id: OrderId,
        seller_id: PartyId,
        bid_amount: Price,
        estimated_delivery: NaiveDate,
        pickup_address: impl Into<String>,
        created_at: Timestamp,
    ) -> DomainResult<Self> {
        validate_amount(bid_amount)?;
        let pickup_address = pickup_address.into();
        if pickup_address.trim().is_empty() {
            return Err(DomainError::validation("pickup address is required"));
        }
        Ok(Self {
            id,
            order_id,
            seller_id,
            bid_amount,
            estimated_delivery,
            message: None,
            pickup_address,
            status: BidStatus::Pending,
            created_at,
            updated_at: created_at,
        })
    }

    /// Sets the message; blank messages are stored as `None`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = normalize_optional(Some(message.into()));
        self
    }

    /// Returns a copy with the given status and update time.
    #[must_use]
    pub fn with_status(mut self, status: BidStatus, updated_at: Timestamp) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }

    /// Returns a copy with a revised amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the amount is not positive.
    pub fn revise(mut self, bid_amount: Price, updated_at: Timestamp) -> DomainResult<Self> {
        validate_amount(bid_amount)?;
        self.bid_amount = bid_amount;
        self.updated_at = updated_at;
        Ok(self)
    }

    /// Returns the seller who placed the bid.
    #[inline]
    #[must_use]
    pub fn seller_id(&self) -> &PartyId {
        &self.seller_id
    }

    /// Returns the estimated delivery date.
    #[inline]
    #[must_use]
    pub fn estimated_delivery(&self) -> NaiveDate {
        self.estimated_delivery
    }

    /// Returns the pickup address.
    #[inline]
    #[must_use]
    pub fn pickup_address(&self) -> &str {
        &self.pickup_address
    }
}

impl CompetingBid for Bid {
    fn id(&self) -> &BidId {
        &self.id
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn bidder_id(&self) -> &PartyId {
        &self.seller_id
    }

    fn amount(&self) -> Price {
        self.bid_amount
    }

    fn status(&self) -> BidStatus {
        self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bid({} order={} seller={} amount={})",
            self.id, self.order_id, self.seller_id, self.bid_amount
        )
    }
}

/// A shipping provider's bid to deliver an order.
///
/// Same shape as [`Bid`] keyed by provider, without a pickup address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBid {
    id: BidId,
    order_id: OrderId,
    shipping_provider_id: PartyId,
    bid_amount: Price,
    estimated_delivery: NaiveDate,
    #[serde(default)]
    message: Option<String>,
    status: BidStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ShippingBid {
    /// Creates a pending shipping bid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the amount is not positive.
    pub fn new(
        id: BidId,
        order_id: OrderId,
        shipping_provider_id: PartyId,
        bid_amount: Price,
        estimated_delivery: NaiveDate,
        created_at: Timestamp,
    ) -> DomainResult<Self> {
        validate_amount(bid_amount)?;
        Ok(Self {
            id,
            order_id,
            shipping_provider_id,
            bid_amount,
            estimated_delivery,
            message: None,
            status: BidStatus::Pending,
            created_at,
            updated_at: created_at,
        })
    }

    /// Sets the message; blank messages are stored as `None`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = normalize_optional(Some(message.into()));
        self
    }

    /// Returns a copy with the given status and update time.
    #[must_use]
    pub fn with_status(mut self, status: BidStatus, updated_at: Timestamp) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }

    /// Returns the shipping provider who placed the bid.
    #[inline]
    #[must_use]
    pub fn shipping_provider_id(&self) -> &PartyId {
        &self.shipping_provider_id
    }

    /// Returns the estimated delivery date.
    #[inline]
    #[must_use]
    pub fn estimated_delivery(&self) -> NaiveDate {
        self.estimated_delivery
    }
}

impl CompetingBid for ShippingBid {
    fn id(&self) -> &BidId {
        &self.id
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn bidder_id(&self) -> &PartyId {
        &self.shipping_provider_id
    }

    fn amount(&self) -> Price {
        self.bid_amount
    }

    fn status(&self) -> BidStatus {
        self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
