//! # RFQ Lifecycle Service
//!
//! Drives RFQs from draft to award: inviting suppliers, tracking invite
//! views, upserting quotes, awarding and closing.
//!
//! Every command applies its change on the aggregate through
//! [`RfqRepository::update`], so concurrent writers to one RFQ never
//! overwrite each other. IDs, invite
//! tokens and timestamps come from the injected [`IdGenerator`] and
//! [`Clock`].
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::application::services::RfqLifecycleService;
//! use marketplace_rfq::domain::entities::{NewRfq, QuoteSubmission, Supplier};
//! use marketplace_rfq::domain::value_objects::{RfqStatus, SupplierId, Timestamp};
//! use marketplace_rfq::infrastructure::persistence::in_memory::{
//!     InMemoryRfqRepository, InMemorySupplierRepository,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let acme = Supplier::new(SupplierId::new("acme"), "Acme", "sales@acme.test", "", "").unwrap();
//! let service = RfqLifecycleService::with_defaults(
//!     Arc::new(InMemoryRfqRepository::new()),
//!     Arc::new(InMemorySupplierRepository::with_suppliers([acme])),
//! );
//!
//! let rfq = service
//!     .create_rfq(NewRfq::new("Pallets", "EPAL", Decimal::from(10), "pcs", Timestamp::now()))
//!     .unwrap();
//! service.add_invite_to_rfq(rfq.id(), &SupplierId::new("acme")).unwrap();
//!
//! let submission = QuoteSubmission::new("12".parse().unwrap(), "120".parse().unwrap(), 5, 30);
//! service
//!     .submit_quote(rfq.id(), &SupplierId::new("acme"), "Acme", submission)
//!     .unwrap();
//!
//! let rfq = service.get_rfq(rfq.id()).unwrap();
//! assert_eq!(rfq.status(), RfqStatus::Open);
//! assert_eq!(rfq.quotes().len(), 1);
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::RfqPolicy;
use crate::domain::entities::{NewRfq, Quote, QuoteSubmission, Rfq, SupplierInvite};
use crate::domain::errors::DomainResult;
use crate::domain::services::quote_comparison::{RankedQuote, compare_quotes};
use crate::domain::value_objects::{InviteId, Price, RfqId, SupplierId};
use crate::infrastructure::clock::{Clock, SystemClock};
use crate::infrastructure::ids::{IdGenerator, UuidGenerator};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RfqRepository, SupplierRepository,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Application service for the RFQ lifecycle.
pub struct RfqLifecycleService {
    rfqs: Arc<dyn RfqRepository>,
    suppliers: Arc<dyn SupplierRepository>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    policy: RfqPolicy,
}

impl fmt::Debug for RfqLifecycleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RfqLifecycleService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RfqLifecycleService {
    /// Creates a service from its collaborators.
    #[must_use]
    pub fn new(
        rfqs: Arc<dyn RfqRepository>,
        suppliers: Arc<dyn SupplierRepository>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: RfqPolicy,
    ) -> Self {
        Self {
            rfqs,
            suppliers,
            ids,
            clock,
            policy,
        }
    }

    /// Creates a service with UUID IDs, the system clock and the default
    /// policy.
    #[must_use]
    pub fn with_defaults(
        rfqs: Arc<dyn RfqRepository>,
        suppliers: Arc<dyn SupplierRepository>,
    ) -> Self {
        Self::new(
            rfqs,
            suppliers,
            Arc::new(UuidGenerator),
            Arc::new(SystemClock),
            RfqPolicy::default(),
        )
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> RfqPolicy {
        self.policy
    }

    fn load(&self, id: RfqId) -> ApplicationResult<Rfq> {
        self.rfqs
            .get(&id)?
            .ok_or_else(|| ApplicationError::not_found("RFQ", id.to_string()))
    }

    fn rejected<T>(
        &self,
        operation: &'static str,
        rfq_id: RfqId,
        err: ApplicationError,
    ) -> ApplicationResult<T> {
        warn!(%rfq_id, operation, error = %err, "rfq operation rejected");
        Err(err)
    }

    /// Runs `change` on the stored RFQ inside the repository's write lock
    /// and returns the saved RFQ with the change's output.
    fn apply<T>(
        &self,
        operation: &'static str,
        rfq_id: RfqId,
        change: impl FnOnce(&mut Rfq) -> DomainResult<T>,
    ) -> ApplicationResult<(Rfq, T)> {
        let mut output = None;
        let outcome = self.rfqs.update(
            &rfq_id,
            Box::new(|rfq: &mut Rfq| {
                output = Some(change(rfq)?);
                Ok(())
            }),
        )?;
        match outcome {
            None => Err(ApplicationError::not_found("RFQ", rfq_id.to_string())),
            Some(Err(err)) => self.rejected(operation, rfq_id, err.into()),
            Some(Ok(rfq)) => output
                .map(|value| (rfq, value))
                .ok_or_else(|| RepositoryError::internal("rfq change produced no result").into()),
        }
    }

    // ========== Queries ==========

    /// Returns an RFQ.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist.
    pub fn get_rfq(&self, id: RfqId) -> ApplicationResult<Rfq> {
        self.load(id)
    }

    /// Returns all RFQs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` on storage failure.
    pub fn list_rfqs(&self) -> ApplicationResult<Vec<Rfq>> {
        Ok(self.rfqs.get_all()?)
    }

    /// Returns the RFQ's quote with the lowest price per unit, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist.
    pub fn lowest_quote(&self, rfq_id: RfqId) -> ApplicationResult<Option<Quote>> {
        let rfq = self.load(rfq_id)?;
        let lowest = rfq.lowest_quote().cloned();
        debug!(%rfq_id, found = lowest.is_some(), "lowest quote looked up");
        Ok(lowest)
    }

    /// Returns the RFQ's quotes ranked cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist.
    pub fn compare_quotes(&self, rfq_id: RfqId) -> ApplicationResult<Vec<RankedQuote>> {
        let rfq = self.load(rfq_id)?;
        let board = compare_quotes(rfq.quotes())?;
        debug!(%rfq_id, quotes = board.len(), "quote board computed");
        Ok(board)
    }

    // ========== Commands ==========

    /// Creates and stores a draft RFQ.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the fields are invalid.
    pub fn create_rfq(&self, fields: NewRfq) -> ApplicationResult<Rfq> {
        let rfq = Rfq::new(self.ids.rfq_id(), fields, self.clock.now())?;
        self.rfqs.save(&rfq)?;
        info!(
            rfq_id = %rfq.id(),
            product = rfq.product_name(),
            quantity = %rfq.quantity(),
            "rfq created"
        );
        Ok(rfq)
    }

    /// Invites a known supplier, opening the RFQ if it was a draft.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ or supplier does not
    /// exist, or `ApplicationError::Domain` if the RFQ no longer accepts
    /// invites or the supplier is already invited.
    pub fn add_invite_to_rfq(
        &self,
        rfq_id: RfqId,
        supplier_id: &SupplierId,
    ) -> ApplicationResult<SupplierInvite> {
        if self.suppliers.get(supplier_id)?.is_none() {
            return self.rejected(
                "add_invite",
                rfq_id,
                ApplicationError::not_found("Supplier", supplier_id.as_str()),
            );
        }

        let invite = SupplierInvite::new(
            self.ids.invite_id(),
            rfq_id,
            supplier_id.clone(),
            self.ids.invite_token(),
            self.clock.now(),
        );
        let (rfq, ()) = self.apply("add_invite", rfq_id, |rfq| rfq.add_invite(invite.clone()))?;

        info!(
            %rfq_id,
            invite_id = %invite.id(),
            %supplier_id,
            status = %rfq.status(),
            "supplier invited"
        );
        Ok(invite)
    }

    /// Marks an invite as viewed, stamping `viewed_at`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist, or
    /// `ApplicationError::Domain` if the invite does not.
    pub fn mark_invite_viewed(
        &self,
        rfq_id: RfqId,
        invite_id: InviteId,
    ) -> ApplicationResult<SupplierInvite> {
        let now = self.clock.now();
        let (_, invite) = self.apply("mark_viewed", rfq_id, |rfq| {
            rfq.mark_invite_viewed(invite_id, now).cloned()
        })?;
        debug!(%rfq_id, %invite_id, status = %invite.status(), "invite viewed");
        Ok(invite)
    }

    /// Resolves an invite by its token and marks it viewed.
    ///
    /// This is the supplier's entry point: the token is all they hold.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if no invite carries the token.
    pub fn open_invite(&self, token: &str) -> ApplicationResult<(Rfq, SupplierInvite)> {
        let Some(rfq) = self.rfqs.find_by_invite_token(token)? else {
            warn!("invite token not recognised");
            return Err(ApplicationError::not_found("Invite", "<token>"));
        };
        let invite_id = rfq
            .invite_by_token(token)
            .map(SupplierInvite::id)
            .ok_or_else(|| ApplicationError::not_found("Invite", "<token>"))?;
        let invite = self.mark_invite_viewed(rfq.id(), invite_id)?;
        let rfq = self.load(rfq.id())?;
        Ok((rfq, invite))
    }

    /// Submits or revises a supplier's quote.
    ///
    /// A first submission creates the quote; later ones overwrite it in
    /// place, keeping its ID and `submitted_at`. The supplier's invite, if
    /// any, moves to `QUOTED` or `UPDATED`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist, or
    /// `ApplicationError::Domain` if the RFQ is closed or awarded or the
    /// submission is invalid.
    pub fn submit_quote(
        &self,
        rfq_id: RfqId,
        supplier_id: &SupplierId,
        supplier_name: impl Into<String>,
        submission: QuoteSubmission,
    ) -> ApplicationResult<Quote> {
        let now = self.clock.now();
        let validate_total = self.policy.validate_quote_total;
        let (rfq, outcome) = self.apply("submit_quote", rfq_id, |rfq| {
            rfq.submit_quote(supplier_id, supplier_name, submission, validate_total, now, || {
                self.ids.quote_id()
            })
        })?;

        let quote = rfq
            .quote_for_supplier(supplier_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("Quote", outcome.quote_id().to_string()))?;
        info!(
            %rfq_id,
            quote_id = %quote.id(),
            %supplier_id,
            price_per_unit = %quote.price_per_unit(),
            revision = outcome.is_revision(),
            "quote submitted"
        );
        Ok(quote)
    }

    /// Awards the RFQ to a supplier at a price.
    ///
    /// Applies from any status and replaces an earlier award, unless the
    /// policy requires at least one quote.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist, or
    /// `ApplicationError::Domain` if the policy refuses the award.
    pub fn award_rfq(
        &self,
        rfq_id: RfqId,
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
        price: Price,
    ) -> ApplicationResult<Rfq> {
        let now = self.clock.now();
        let require_quotes = self.policy.require_quotes_for_award;
        let awardee = supplier_id.clone();
        let (rfq, previous) = self.apply("award", rfq_id, |rfq| {
            let previous = rfq.status();
            rfq.award(awardee, supplier_name, price, require_quotes, now)?;
            Ok(previous)
        })?;
        info!(%rfq_id, %supplier_id, %price, from = %previous, "rfq awarded");
        Ok(rfq)
    }

    /// Closes a draft or open RFQ without an award.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the RFQ does not exist, or
    /// `ApplicationError::Domain` if it is already closed or awarded.
    pub fn close_rfq(&self, rfq_id: RfqId) -> ApplicationResult<Rfq> {
        let (rfq, ()) = self.apply("close", rfq_id, Rfq::close)?;
        info!(%rfq_id, "rfq closed");
        Ok(rfq)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::Supplier;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::{InviteStatus, RfqStatus, Timestamp};
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ids::SequentialIdGenerator;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryRfqRepository, InMemorySupplierRepository,
    };
    use rust_decimal::Decimal;

    struct Fixture {
        service: RfqLifecycleService,
        clock: Arc<FixedClock>,
    }

    fn fixture(policy: RfqPolicy) -> Fixture {
        let suppliers = ["acme", "bolt", "crane"].map(|id| {
            Supplier::new(SupplierId::new(id), id.to_uppercase(), format!("{id}@test"), "", "")
                .unwrap()
        });
        let clock = Arc::new(FixedClock::new(Timestamp::from_secs(1_700_000_000).unwrap()));
        let service = RfqLifecycleService::new(
            Arc::new(InMemoryRfqRepository::new()),
            Arc::new(InMemorySupplierRepository::with_suppliers(suppliers)),
            Arc::new(SequentialIdGenerator::new()),
            clock.clone(),
            policy,
        );
        Fixture { service, clock }
    }

    fn new_rfq(service: &RfqLifecycleService) -> Rfq {
        service
            .create_rfq(NewRfq::new(
                "Cement",
                "CEM I 42.5",
                Decimal::from(10),
                "t",
                Timestamp::from_secs(1_800_000_000).unwrap(),
            ))
            .unwrap()
    }

    fn submission(unit: i64) -> QuoteSubmission {
        QuoteSubmission::new(
            Price::new(Decimal::from(unit)).unwrap(),
            Price::new(Decimal::from(unit * 10)).unwrap(),
            7,
            14,
        )
    }

    #[test]
    fn create_and_list() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        assert_eq!(rfq.status(), RfqStatus::Draft);
        assert_eq!(rfq.created_at(), f.clock.now());
        assert_eq!(f.service.list_rfqs().unwrap().len(), 1);
        assert_eq!(f.service.get_rfq(rfq.id()).unwrap(), rfq);
    }

    #[test]
    fn unknown_rfq_is_not_found() {
        let f = fixture(RfqPolicy::default());
        let err = f.service.get_rfq(RfqId::new_v4()).unwrap_err();
        assert!(err.is_not_found());
        let err = f.service.close_rfq(RfqId::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn invite_opens_rfq_and_unknown_supplier_rejected() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);

        let err = f
            .service
            .add_invite_to_rfq(rfq.id(), &SupplierId::new("ghost"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(f.service.get_rfq(rfq.id()).unwrap().status(), RfqStatus::Draft);

        let invite = f
            .service
            .add_invite_to_rfq(rfq.id(), &SupplierId::new("acme"))
            .unwrap();
        assert_eq!(invite.status(), InviteStatus::InviteSent);
        assert_eq!(f.service.get_rfq(rfq.id()).unwrap().status(), RfqStatus::Open);
    }

    #[test]
    fn duplicate_invite_is_domain_error() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        let acme = SupplierId::new("acme");
        f.service.add_invite_to_rfq(rfq.id(), &acme).unwrap();
        let err = f.service.add_invite_to_rfq(rfq.id(), &acme).unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::DuplicateInvite { .. })
        ));
    }

    #[test]
    fn open_invite_by_token_marks_viewed() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        let invite = f
            .service
            .add_invite_to_rfq(rfq.id(), &SupplierId::new("bolt"))
            .unwrap();

        f.clock.advance_secs(120);
        let (opened_rfq, opened) = f.service.open_invite(invite.invite_token()).unwrap();
        assert_eq!(opened_rfq.id(), rfq.id());
        assert_eq!(opened.status(), InviteStatus::Viewed);
        assert_eq!(opened.viewed_at(), Some(f.clock.now()));
        assert_eq!(
            opened_rfq.invite(invite.id()).unwrap().status(),
            InviteStatus::Viewed
        );

        assert!(f.service.open_invite("forged").unwrap_err().is_not_found());
    }

    #[test]
    fn quote_then_revision() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        let crane = SupplierId::new("crane");
        let invite = f.service.add_invite_to_rfq(rfq.id(), &crane).unwrap();
        f.service.mark_invite_viewed(rfq.id(), invite.id()).unwrap();

        let first = f
            .service
            .submit_quote(rfq.id(), &crane, "Crane Ltd", submission(90))
            .unwrap();
        f.clock.advance_secs(3_600);
        let second = f
            .service
            .submit_quote(rfq.id(), &crane, "Crane Ltd", submission(85))
            .unwrap();

        assert_eq!(second.id(), first.id());
        assert_eq!(second.submitted_at(), first.submitted_at());
        assert_eq!(second.updated_at(), Some(f.clock.now()));

        let stored = f.service.get_rfq(rfq.id()).unwrap();
        assert_eq!(stored.quotes().len(), 1);
        assert_eq!(
            stored.invite(invite.id()).unwrap().status(),
            InviteStatus::Updated
        );
    }

    #[test]
    fn lowest_quote_and_board() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        assert!(f.service.lowest_quote(rfq.id()).unwrap().is_none());

        f.service
            .submit_quote(rfq.id(), &SupplierId::new("acme"), "Acme", submission(50))
            .unwrap();
        f.service
            .submit_quote(rfq.id(), &SupplierId::new("bolt"), "Bolt", submission(45))
            .unwrap();

        let lowest = f.service.lowest_quote(rfq.id()).unwrap().unwrap();
        assert_eq!(lowest.supplier_id().as_str(), "bolt");

        let board = f.service.compare_quotes(rfq.id()).unwrap();
        assert_eq!(board[0].quote.supplier_id().as_str(), "bolt");
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn mismatched_total_rejected_by_default_policy() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        let bad = QuoteSubmission::new("5".parse().unwrap(), "49".parse().unwrap(), 1, 1);
        let err = f
            .service
            .submit_quote(rfq.id(), &SupplierId::new("acme"), "Acme", bad.clone())
            .unwrap_err();
        assert!(err.is_validation());

        let lenient = fixture(RfqPolicy {
            validate_quote_total: false,
            ..RfqPolicy::default()
        });
        let rfq = new_rfq(&lenient.service);
        lenient
            .service
            .submit_quote(rfq.id(), &SupplierId::new("acme"), "Acme", bad)
            .unwrap();
    }

    #[test]
    fn award_permissive_and_strict() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        let awarded = f
            .service
            .award_rfq(rfq.id(), SupplierId::new("acme"), "Acme", "40".parse().unwrap())
            .unwrap();
        assert_eq!(awarded.status(), RfqStatus::Awarded);
        assert_eq!(awarded.awarded_to().unwrap().awarded_at, f.clock.now());

        let strict = fixture(RfqPolicy {
            require_quotes_for_award: true,
            ..RfqPolicy::default()
        });
        let rfq = new_rfq(&strict.service);
        let err = strict
            .service
            .award_rfq(rfq.id(), SupplierId::new("acme"), "Acme", "40".parse().unwrap())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(strict.service.get_rfq(rfq.id()).unwrap().status(), RfqStatus::Draft);
    }

    #[test]
    fn closed_rfq_refuses_quotes() {
        let f = fixture(RfqPolicy::default());
        let rfq = new_rfq(&f.service);
        f.service.close_rfq(rfq.id()).unwrap();
        let err = f
            .service
            .submit_quote(rfq.id(), &SupplierId::new("acme"), "Acme", submission(1))
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::RfqNotMutable { .. })
        ));
        assert!(f.service.close_rfq(rfq.id()).is_err());
    }
}
