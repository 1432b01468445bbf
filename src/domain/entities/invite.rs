//! # Supplier Invite Entity
//!
//! Tracks one supplier's participation in one RFQ.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{InviteId, InviteStatus, RfqId, SupplierId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An invitation for a supplier to quote on an RFQ.
///
/// Owned by its [`Rfq`](super::Rfq); never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvite {
    id: InviteId,
    rfq_id: RfqId,
    supplier_id: SupplierId,
    status: InviteStatus,
    invite_token: String,
    sent_at: Timestamp,
    #[serde(default)]
    viewed_at: Option<Timestamp>,
    #[serde(default)]
    quoted_at: Option<Timestamp>,
}

impl SupplierInvite {
    /// Creates a freshly sent invite.
    #[must_use]
    pub fn new(
        id: InviteId,
        rfq_id: RfqId,
        supplier_id: SupplierId,
        invite_token: impl Into<String>,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            id,
            rfq_id,
            supplier_id,
            status: InviteStatus::InviteSent,
            invite_token: invite_token.into(),
            sent_at,
            viewed_at: None,
            quoted_at: None,
        }
    }

    /// Records that the supplier opened the invite.
    ///
    /// `viewed_at` is stamped on every call. The status only moves to
    /// `Viewed` from `InviteSent`; later statuses are left alone.
    pub fn mark_viewed(&mut self, at: Timestamp) {
        self.viewed_at = Some(at);
        if self.status == InviteStatus::InviteSent {
            self.status = InviteStatus::Viewed;
        }
    }

    /// Records a quote submission: `Quoted` for a first quote, `Updated`
    /// when the supplier already had one. `quoted_at` is stamped either way.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInviteTransition` if the move would go
    /// backwards, e.g. a "first" quote on an invite already `Updated`.
    pub fn record_quote(&mut self, is_revision: bool, at: Timestamp) -> DomainResult<()> {
        let target = if is_revision {
            InviteStatus::Updated
        } else {
            InviteStatus::Quoted
        };
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidInviteTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.quoted_at = Some(at);
        Ok(())
    }

    /// Returns the invite ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InviteId {
        self.id
    }

    /// Returns the RFQ this invite belongs to.
    #[inline]
    #[must_use]
    pub fn rfq_id(&self) -> RfqId {
        self.rfq_id
    }

    /// Returns the invited supplier.
    #[inline]
    #[must_use]
    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> InviteStatus {
        self.status
    }

    /// Returns the unguessable token embedded in the invite link.
    #[inline]
    #[must_use]
    pub fn invite_token(&self) -> &str {
        &self.invite_token
    }

    /// Returns when the invite was sent.
    #[inline]
    #[must_use]
    pub fn sent_at(&self) -> Timestamp {
        self.sent_at
    }

    /// Returns when the invite was last viewed.
    #[inline]
    #[must_use]
    pub fn viewed_at(&self) -> Option<Timestamp> {
        self.viewed_at
    }

    /// Returns when the supplier last quoted.
    #[inline]
    #[must_use]
    pub fn quoted_at(&self) -> Option<Timestamp> {
        self.quoted_at
    }
}

impl fmt::Display for SupplierInvite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invite({} rfq={} supplier={} status={})",
            self.id, self.rfq_id, self.supplier_id, self.status
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn invite() -> SupplierInvite {
        SupplierInvite::new(
            InviteId::new_v4(),
            RfqId::new_v4(),
            SupplierId::new("sup-1"),
            "token",
            Timestamp::from_secs(0).unwrap(),
        )
    }

    #[test]
    fn viewing_moves_sent_to_viewed() {
        let mut invite = invite();
        let at = Timestamp::from_secs(10).unwrap();
        invite.mark_viewed(at);
        assert_eq!(invite.status(), InviteStatus::Viewed);
        assert_eq!(invite.viewed_at(), Some(at));
    }

    #[test]
    fn viewing_after_quote_keeps_status_but_stamps_time() {
        let mut invite = invite();
        invite
            .record_quote(false, Timestamp::from_secs(5).unwrap())
            .unwrap();
        let at = Timestamp::from_secs(20).unwrap();
        invite.mark_viewed(at);
        assert_eq!(invite.status(), InviteStatus::Quoted);
        assert_eq!(invite.viewed_at(), Some(at));
    }

    #[test]
    fn quote_then_revision() {
        let mut invite = invite();
        invite
            .record_quote(false, Timestamp::from_secs(5).unwrap())
            .unwrap();
        assert_eq!(invite.status(), InviteStatus::Quoted);

        let revised_at = Timestamp::from_secs(50).unwrap();
        invite.record_quote(true, revised_at).unwrap();
        invite.record_quote(true, revised_at.add_secs(1)).unwrap();
        assert_eq!(invite.status(), InviteStatus::Updated);
        assert_eq!(invite.quoted_at(), Some(revised_at.add_secs(1)));
    }

    #[test]
    fn first_quote_after_update_is_rejected() {
        let mut invite = invite();
        invite
            .record_quote(true, Timestamp::from_secs(5).unwrap())
            .unwrap();
        let err = invite
            .record_quote(false, Timestamp::from_secs(6).unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInviteTransition { .. }));
    }
}
