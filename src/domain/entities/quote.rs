//! # Quote Entity
//!
//! A supplier's priced answer to an RFQ.
//!
//! Each supplier holds at most one quote per RFQ; resubmitting revises it
//! in place (see [`Rfq::submit_quote`](super::Rfq::submit_quote)).

use crate::domain::entities::normalize_optional;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Price, QuoteId, RfqId, SupplierId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The supplier-entered terms of a quote.
///
/// # Examples
///
/// ```
/// use marketplace_rfq::domain::entities::QuoteSubmission;
/// use rust_decimal::Decimal;
///
/// let submission = QuoteSubmission::new(
///     "45".parse().unwrap(),
///     "450".parse().unwrap(),
///     7,
///     30,
/// );
/// assert!(submission.validate(Decimal::TEN, true).is_ok());
/// assert!(submission.validate(Decimal::ONE, true).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    /// Offered price per unit.
    pub price_per_unit: Price,
    /// Offered total; expected to equal `price_per_unit × rfq.quantity`.
    pub total_price: Price,
    /// Days to deliver after award.
    pub delivery_days: u32,
    /// Days the offer stays valid.
    pub validity_days: u32,
    /// Free-form remarks.
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteSubmission {
    /// Creates a submission without notes.
    #[must_use]
    pub fn new(
        price_per_unit: Price,
        total_price: Price,
        delivery_days: u32,
        validity_days: u32,
    ) -> Self {
        Self {
            price_per_unit,
            total_price,
            delivery_days,
            validity_days,
            notes: None,
        }
    }

    /// Attaches notes; blank notes are dropped.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_optional(Some(notes.into()));
        self
    }

    /// Validates the submission against the RFQ quantity.
    ///
    /// When `check_total` is set, `total_price` must equal
    /// `price_per_unit × quantity` exactly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` for a non-positive unit price,
    /// `DomainError::ValidationError` for zero day counts or a mismatched
    /// total, and `DomainError::Arithmetic` on overflow.
    pub fn validate(&self, quantity: Decimal, check_total: bool) -> DomainResult<()> {
        if !self.price_per_unit.is_positive() {
            return Err(DomainError::InvalidPrice(
                "price per unit must be positive".to_string(),
            ));
        }
        if self.delivery_days == 0 {
            return Err(DomainError::validation("delivery days must be at least 1"));
        }
        if self.validity_days == 0 {
            return Err(DomainError::validation("validity days must be at least 1"));
        }
        if check_total {
            let expected = self.price_per_unit.safe_mul(quantity)?;
            if expected != self.total_price.get() {
                return Err(DomainError::validation(format!(
                    "total price {} does not match {} x {} = {}",
                    self.total_price, self.price_per_unit, quantity, expected
                )));
            }
        }
        Ok(())
    }
}

/// A supplier quote on an RFQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    id: QuoteId,
    rfq_id: RfqId,
    supplier_id: SupplierId,
    supplier_name: String,
    price_per_unit: Price,
    total_price: Price,
    delivery_days: u32,
    validity_days: u32,
    #[serde(default)]
    notes: Option<String>,
    submitted_at: Timestamp,
    #[serde(default)]
    updated_at: Option<Timestamp>,
}

impl Quote {
    /// Creates a first-time quote.
    #[must_use]
    pub fn new(
        id: QuoteId,
        rfq_id: RfqId,
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
        submission: QuoteSubmission,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            rfq_id,
            supplier_id,
            supplier_name: supplier_name.into(),
            price_per_unit: submission.price_per_unit,
            total_price: submission.total_price,
            delivery_days: submission.delivery_days,
            validity_days: submission.validity_days,
            notes: normalize_optional(submission.notes),
            submitted_at,
            updated_at: None,
        }
    }

    /// Overwrites every term of the quote, keeping `id` and `submitted_at`,
    /// and stamps `updated_at`.
    pub fn revise(
        &mut self,
        supplier_name: impl Into<String>,
        submission: QuoteSubmission,
        at: Timestamp,
    ) {
        self.supplier_name = supplier_name.into();
        self.price_per_unit = submission.price_per_unit;
        self.total_price = submission.total_price;
        self.delivery_days = submission.delivery_days;
        self.validity_days = submission.validity_days;
        self.notes = normalize_optional(submission.notes);
        self.updated_at = Some(at);
    }

    /// Returns the quote ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the RFQ ID.
    #[inline]
    #[must_use]
    pub fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Returns the quoting supplier.
    #[inline]
    #[must_use]
    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the supplier's display name.
    #[inline]
    #[must_use]
    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    /// Returns the price per unit.
    #[inline]
    #[must_use]
    pub fn price_per_unit(&self) -> Price {
        self.price_per_unit
    }

    /// Returns the total price.
    #[inline]
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    /// Returns the delivery lead time in days.
    #[inline]
    #[must_use]
    pub fn delivery_days(&self) -> u32 {
        self.delivery_days
    }

    /// Returns how many days the quote stays valid.
    #[inline]
    #[must_use]
    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    /// Returns the supplier's notes, if any.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns when the quote was first submitted.
    #[inline]
    #[must_use]
    pub fn submitted_at(&self) -> Timestamp {
        self.submitted_at
    }

    /// Returns when the quote was last revised, if ever.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    /// Returns the last time the quote's terms changed.
    #[must_use]
    pub fn last_changed_at(&self) -> Timestamp {
        self.updated_at.unwrap_or(self.submitted_at)
    }

    /// Returns the date after which the offer lapses.
    #[must_use]
    pub fn valid_until(&self) -> Timestamp {
        self.last_changed_at().add_days(i64::from(self.validity_days))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} supplier={} unit={} total={})",
            self.id, self.supplier_id, self.price_per_unit, self.total_price
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission(unit: &str, total: &str) -> QuoteSubmission {
        QuoteSubmission::new(unit.parse().unwrap(), total.parse().unwrap(), 5, 14)
    }

    #[test]
    fn validate_rejects_zero_unit_price() {
        let err = submission("0", "0").validate(Decimal::TEN, false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrice(_)));
    }

    #[test]
    fn validate_rejects_zero_days() {
        let mut s = submission("5", "50");
        s.delivery_days = 0;
        assert!(s.validate(Decimal::TEN, true).is_err());
        let mut s = submission("5", "50");
        s.validity_days = 0;
        assert!(s.validate(Decimal::TEN, true).is_err());
    }

    #[test]
    fn validate_total_only_when_requested() {
        let s = submission("5", "49");
        assert!(s.validate(Decimal::TEN, false).is_ok());
        assert!(matches!(
            s.validate(Decimal::TEN, true),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn validate_total_ignores_scale() {
        let s = submission("4.5", "45.00");
        assert!(s.validate(Decimal::TEN, true).is_ok());
    }

    #[test]
    fn revise_keeps_identity() {
        let submitted = Timestamp::from_secs(0).unwrap();
        let mut quote = Quote::new(
            QuoteId::new_v4(),
            RfqId::new_v4(),
            SupplierId::new("s"),
            "Acme",
            submission("50", "500").with_notes("first"),
            submitted,
        );
        let id = quote.id();
        let revised = submitted.add_secs(100);

        quote.revise("Acme Ltd", submission("45", "450"), revised);

        assert_eq!(quote.id(), id);
        assert_eq!(quote.submitted_at(), submitted);
        assert_eq!(quote.updated_at(), Some(revised));
        assert_eq!(quote.supplier_name(), "Acme Ltd");
        assert_eq!(quote.notes(), None);
        assert_eq!(quote.price_per_unit().to_string(), "45");
    }

    #[test]
    fn valid_until_counts_from_last_change() {
        let submitted = Timestamp::parse_lenient("2024-01-01").unwrap();
        let quote = Quote::new(
            QuoteId::new_v4(),
            RfqId::new_v4(),
            SupplierId::new("s"),
            "Acme",
            submission("1", "10"),
            submitted,
        );
        assert_eq!(
            quote.valid_until(),
            Timestamp::parse_lenient("2024-01-15").unwrap()
        );
    }
}
