//! # RFQ Aggregate Root
//!
//! A buyer's request for quote, owning its supplier invites and quotes.
//!
//! # State Machine
//!
//! ```text
//! Draft ──first invite──→ Open ──award──→ Awarded
//!   │                      │
//!   └───────close──────────┴────close───→ Closed
//! ```
//!
//! `Closed` and `Awarded` RFQs refuse new invites and quotes. Awarding
//! itself is permissive: it may be applied from any status, and re-awarding
//! replaces the previous award.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::entities::{NewRfq, Rfq, SupplierInvite};
//! use marketplace_rfq::domain::value_objects::{InviteId, RfqId, RfqStatus, SupplierId, Timestamp};
//! use rust_decimal::Decimal;
//!
//! let now = Timestamp::now();
//! let mut rfq = Rfq::new(
//!     RfqId::new_v4(),
//!     NewRfq::new("Steel bolts", "M8 x 40, zinc", Decimal::from(500), "pcs", now.add_days(14)),
//!     now,
//! )
//! .unwrap();
//! assert_eq!(rfq.status(), RfqStatus::Draft);
//!
//! let invite = SupplierInvite::new(InviteId::new_v4(), rfq.id(), SupplierId::new("sup-1"), "tok", now);
//! rfq.add_invite(invite).unwrap();
//! assert_eq!(rfq.status(), RfqStatus::Open);
//! ```

use crate::domain::entities::invite::SupplierInvite;
use crate::domain::entities::normalize_optional;
use crate::domain::entities::quote::{Quote, QuoteSubmission};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::quote_comparison::get_lowest_quote;
use crate::domain::value_objects::{
    InviteId, Price, QuoteId, RfqId, RfqStatus, SupplierId, Timestamp,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Buyer-entered fields of a new RFQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRfq {
    /// What is being sourced.
    pub product_name: String,
    /// Specification text.
    pub specs: String,
    /// Required quantity, in `unit`s.
    pub quantity: Decimal,
    /// Unit of measure.
    pub unit: String,
    /// Date the goods are needed by.
    pub required_by_date: Timestamp,
    /// Free-form remarks.
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRfq {
    /// Creates RFQ fields without notes.
    #[must_use]
    pub fn new(
        product_name: impl Into<String>,
        specs: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        required_by_date: Timestamp,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            specs: specs.into(),
            quantity,
            unit: unit.into(),
            required_by_date,
            notes: None,
        }
    }

    /// Attaches notes; blank notes are dropped.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_optional(Some(notes.into()));
        self
    }
}

/// The winning supplier of an awarded RFQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    /// Winning supplier.
    pub supplier_id: SupplierId,
    /// Winning supplier's display name.
    pub supplier_name: String,
    /// Awarded price.
    pub price: Price,
    /// When the award was made.
    pub awarded_at: Timestamp,
}

/// What a quote submission did to the RFQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// The supplier's first quote was added.
    Created(QuoteId),
    /// The supplier's existing quote was overwritten.
    Revised(QuoteId),
}

impl QuoteOutcome {
    /// Returns the affected quote's ID.
    #[must_use]
    pub fn quote_id(&self) -> QuoteId {
        match self {
            Self::Created(id) | Self::Revised(id) => *id,
        }
    }

    /// Returns true if an existing quote was overwritten.
    #[must_use]
    pub fn is_revision(&self) -> bool {
        matches!(self, Self::Revised(_))
    }
}

/// RFQ aggregate root.
///
/// # Invariants
///
/// - At most one invite per supplier
/// - At most one quote per supplier; resubmission keeps `id` and `submitted_at`
/// - `Draft` exactly while no invite exists
/// - No invite or quote changes once `Closed` or `Awarded`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rfq {
    id: RfqId,
    product_name: String,
    specs: String,
    quantity: Decimal,
    unit: String,
    required_by_date: Timestamp,
    #[serde(default)]
    notes: Option<String>,
    status: RfqStatus,
    created_at: Timestamp,
    #[serde(default)]
    invites: Vec<SupplierInvite>,
    #[serde(default)]
    quotes: Vec<Quote>,
    #[serde(default)]
    awarded_to: Option<Award>,
}

impl Rfq {
    /// Creates a draft RFQ.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the product name or unit is
    /// blank, or the quantity is not positive.
    pub fn new(id: RfqId, fields: NewRfq, created_at: Timestamp) -> DomainResult<Self> {
        if fields.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        if fields.unit.trim().is_empty() {
            return Err(DomainError::validation("unit is required"));
        }
        if fields.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            id,
            product_name: fields.product_name,
            specs: fields.specs,
            quantity: fields.quantity,
            unit: fields.unit,
            required_by_date: fields.required_by_date,
            notes: normalize_optional(fields.notes),
            status: RfqStatus::Draft,
            created_at,
            invites: Vec::new(),
            quotes: Vec::new(),
            awarded_to: None,
        })
    }

    fn transition_to(&mut self, target: RfqStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn ensure_mutable(&self) -> DomainResult<()> {
        if !self.status.accepts_changes() {
            return Err(DomainError::RfqNotMutable {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    // ========== Accessors ==========

    /// Returns the RFQ ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> RfqId {
        self.id
    }

    /// Returns the product name.
    #[inline]
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the specification text.
    #[inline]
    #[must_use]
    pub fn specs(&self) -> &str {
        &self.specs
    }

    /// Returns the requested quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Returns the unit of measure.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the required-by date.
    #[inline]
    #[must_use]
    pub fn required_by_date(&self) -> Timestamp {
        self.required_by_date
    }

    /// Returns the buyer's notes, if any.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> RfqStatus {
        self.status
    }

    /// Returns when the RFQ was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the invites in the order they were sent.
    #[inline]
    #[must_use]
    pub fn invites(&self) -> &[SupplierInvite] {
        &self.invites
    }

    /// Returns the quotes in first-submission order.
    #[inline]
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Returns the award, if any.
    #[inline]
    #[must_use]
    pub fn awarded_to(&self) -> Option<&Award> {
        self.awarded_to.as_ref()
    }

    /// Returns the invite with the given ID.
    #[must_use]
    pub fn invite(&self, id: InviteId) -> Option<&SupplierInvite> {
        self.invites.iter().find(|i| i.id() == id)
    }

    /// Returns the invite carrying the given token.
    #[must_use]
    pub fn invite_by_token(&self, token: &str) -> Option<&SupplierInvite> {
        self.invites.iter().find(|i| i.invite_token() == token)
    }

    /// Returns the invite sent to the given supplier.
    #[must_use]
    pub fn invite_for_supplier(&self, supplier_id: &SupplierId) -> Option<&SupplierInvite> {
        self.invites.iter().find(|i| i.supplier_id() == supplier_id)
    }

    /// Returns the given supplier's quote.
    #[must_use]
    pub fn quote_for_supplier(&self, supplier_id: &SupplierId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.supplier_id() == supplier_id)
    }

    /// Returns the quote with the lowest price per unit.
    #[must_use]
    pub fn lowest_quote(&self) -> Option<&Quote> {
        get_lowest_quote(&self.quotes)
    }

    // ========== Lifecycle ==========

    /// Adds a supplier invite, opening the RFQ if it was a draft.
    ///
    /// Transitions: Draft → Open (on first invite)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RfqNotMutable` if the RFQ is closed or awarded.
    /// Returns `DomainError::ValidationError` if the invite is for another RFQ.
    /// Returns `DomainError::DuplicateInvite` if the supplier was already invited.
    pub fn add_invite(&mut self, invite: SupplierInvite) -> DomainResult<()> {
        self.ensure_mutable()?;
        if invite.rfq_id() != self.id {
            return Err(DomainError::validation("invite does not belong to this RFQ"));
        }
        if self.invite_for_supplier(invite.supplier_id()).is_some() {
            return Err(DomainError::DuplicateInvite {
                rfq_id: self.id,
                supplier_id: invite.supplier_id().clone(),
            });
        }

        self.invites.push(invite);
        if self.status == RfqStatus::Draft {
            self.transition_to(RfqStatus::Open)?;
        }
        Ok(())
    }

    /// Marks an invite as viewed. Allowed in every status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no such invite exists.
    pub fn mark_invite_viewed(
        &mut self,
        invite_id: InviteId,
        at: Timestamp,
    ) -> DomainResult<&SupplierInvite> {
        let invite = self
            .invites
            .iter_mut()
            .find(|i| i.id() == invite_id)
            .ok_or_else(|| DomainError::not_found("invite", invite_id))?;
        invite.mark_viewed(at);
        Ok(invite)
    }

    /// Adds or revises the supplier's quote.
    ///
    /// A supplier with no quote gets a new one (id from `new_id`,
    /// `submitted_at = at`). A supplier with a quote has every term
    /// overwritten except `id` and `submitted_at`, and `updated_at = at`.
    /// The supplier's invite, if any, moves to `Quoted` or `Updated`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RfqNotMutable` if the RFQ is closed or awarded.
    /// Returns validation errors from [`QuoteSubmission::validate`].
    /// Returns `DomainError::InvalidInviteTransition` if the invite cannot move.
    pub fn submit_quote(
        &mut self,
        supplier_id: &SupplierId,
        supplier_name: impl Into<String>,
        submission: QuoteSubmission,
        check_total: bool,
        at: Timestamp,
        new_id: impl FnOnce() -> QuoteId,
    ) -> DomainResult<QuoteOutcome> {
        self.ensure_mutable()?;
        submission.validate(self.quantity, check_total)?;

        let existing = self
            .quotes
            .iter()
            .position(|q| q.supplier_id() == supplier_id);
        let is_revision = existing.is_some();

        if let Some(invite) = self
            .invites
            .iter_mut()
            .find(|i| i.supplier_id() == supplier_id)
        {
            invite.record_quote(is_revision, at)?;
        }

        let outcome = match existing.and_then(|idx| self.quotes.get_mut(idx)) {
            Some(quote) => {
                quote.revise(supplier_name, submission, at);
                QuoteOutcome::Revised(quote.id())
            }
            None => {
                let quote = Quote::new(
                    new_id(),
                    self.id,
                    supplier_id.clone(),
                    supplier_name,
                    submission,
                    at,
                );
                let id = quote.id();
                self.quotes.push(quote);
                QuoteOutcome::Created(id)
            }
        };
        Ok(outcome)
    }

    /// Awards the RFQ to a supplier.
    ///
    /// Permissive: applies from any status and replaces an earlier award.
    /// With `require_quotes` set, an RFQ without quotes is refused.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `require_quotes` is set and
    /// no quote has been received.
    pub fn award(
        &mut self,
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
        price: Price,
        require_quotes: bool,
        at: Timestamp,
    ) -> DomainResult<()> {
        if require_quotes && self.quotes.is_empty() {
            return Err(DomainError::validation("cannot award an RFQ without quotes"));
        }
        self.status = RfqStatus::Awarded;
        self.awarded_to = Some(Award {
            supplier_id,
            supplier_name: supplier_name.into(),
            price,
            awarded_at: at,
        });
        Ok(())
    }

    /// Closes the RFQ without an award.
    ///
    /// Transitions: Draft/Open → Closed
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if already closed or awarded.
    pub fn close(&mut self) -> DomainResult<()> {
        self.transition_to(RfqStatus::Closed)
    }
}

impl fmt::Display for Rfq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RFQ({} {} {} {} status={} invites={} quotes={})",
            self.id,
            self.product_name,
            self.quantity,
            self.unit,
            self.status,
            self.invites.len(),
            self.quotes.len()
        )
    }
}
