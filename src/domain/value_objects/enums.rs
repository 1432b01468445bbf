//! # Domain Enums
//!
//! Status enumerations for marketplace entities:
//!
//! - [`OrderStatus`] - buyer order lifecycle
//! - [`BidStatus`] - product and shipping bid outcome
//! - [`RfqStatus`] - RFQ lifecycle
//! - [`InviteStatus`] - supplier participation in one RFQ
//!
//! All enums implement `Display`, `FromStr` and Serde with the spellings
//! used by the stored data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The string is not a valid value for the named enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

/// Lifecycle status of a buyer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting bids or acceptance.
    #[default]
    Pending,
    /// A bid has been accepted.
    Accepted,
    /// Rejected by the counterparty.
    Rejected,
    /// Delivered and closed out.
    Completed,
    /// Withdrawn by the buyer.
    Cancelled,
}

impl OrderStatus {
    /// Returns the stored spelling of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::InvalidValue("OrderStatus", s.to_string())),
        }
    }
}

/// Outcome status of a product bid or shipping bid.
///
/// `Unknown` absorbs statuses the backend may introduce later; such bids
/// sort after every known status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    /// Awaiting the buyer's decision.
    #[default]
    Pending,
    /// Chosen by the buyer.
    Accepted,
    /// Declined by the buyer.
    Rejected,
    /// Any status not known to this crate.
    #[serde(other)]
    Unknown,
}

impl BidStatus {
    /// Returns the sort ordinal used by status-priority ordering.
    ///
    /// `pending = 1`, `accepted = 2`, `rejected = 3`, anything else `4`.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::Accepted => 2,
            Self::Rejected => 3,
            Self::Unknown => 4,
        }
    }

    /// Returns the stored spelling of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised non-blank values parse as [`BidStatus::Unknown`].
impl FromStr for BidStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err(ParseEnumError::InvalidValue("BidStatus", s.to_string())),
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Ok(Self::Unknown),
        }
    }
}

/// RFQ lifecycle status.
///
/// ```text
/// Draft ──first invite──→ Open ──award──→ Awarded
///   │                      │
///   └────────close─────────┴──close──→ Closed
/// ```
///
/// Awarding is deliberately permissive and may be applied from any status;
/// see [`Rfq::award`](crate::domain::entities::Rfq::award).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RfqStatus {
    /// Created, no supplier invited yet.
    #[default]
    Draft,
    /// At least one supplier invited; accepting quotes.
    Open,
    /// Closed without an award.
    Closed,
    /// Awarded to a supplier.
    Awarded,
}

impl RfqStatus {
    /// Returns true if this status can move to `target` through the regular
    /// lifecycle (invite and close operations).
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Open)
                | (Self::Draft, Self::Closed)
                | (Self::Open, Self::Closed)
                | (Self::Open, Self::Awarded)
        )
    }

    /// Returns true if invites and quotes may still change.
    #[must_use]
    pub const fn accepts_changes(&self) -> bool {
        matches!(self, Self::Draft | Self::Open)
    }

    /// Returns true for `Closed` and `Awarded`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.accepts_changes()
    }

    /// Returns the stored spelling of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Awarded => "AWARDED",
        }
    }
}

impl fmt::Display for RfqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RfqStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "AWARDED" => Ok(Self::Awarded),
            _ => Err(ParseEnumError::InvalidValue("RfqStatus", s.to_string())),
        }
    }
}

/// Status of a supplier invite.
///
/// ```text
/// InviteSent → Viewed → Quoted → Updated (↺ on every resubmission)
/// ```
///
/// Transitions only move forward; steps may be skipped (a supplier can
/// quote without the invite ever being marked viewed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteStatus {
    /// Invite created and sent.
    #[default]
    InviteSent,
    /// Supplier opened the invite.
    Viewed,
    /// Supplier submitted a first quote.
    Quoted,
    /// Supplier revised an earlier quote.
    Updated,
}

impl InviteStatus {
    const fn ordinal(self) -> u8 {
        match self {
            Self::InviteSent => 0,
            Self::Viewed => 1,
            Self::Quoted => 2,
            Self::Updated => 3,
        }
    }

    /// Returns true if this status can move to `target`.
    ///
    /// Any forward move is allowed, and `Updated` may repeat since every
    /// resubmission re-enters it.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        target.ordinal() > self.ordinal()
            || matches!((self, target), (Self::Updated, Self::Updated))
    }

    /// Returns true once the supplier has submitted any quote.
    #[must_use]
    pub const fn has_quoted(&self) -> bool {
        matches!(self, Self::Quoted | Self::Updated)
    }

    /// Returns the stored spelling of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InviteSent => "INVITE_SENT",
            Self::Viewed => "VIEWED",
            Self::Quoted => "QUOTED",
            Self::Updated => "UPDATED",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InviteStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "INVITE_SENT" => Ok(Self::InviteSent),
            "VIEWED" => Ok(Self::Viewed),
            "QUOTED" => Ok(Self::Quoted),
            "UPDATED" => Ok(Self::Updated),
            _ => Err(ParseEnumError::InvalidValue("InviteStatus", s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bid_status_priority_order() {
        assert!(BidStatus::Pending.priority() < BidStatus::Accepted.priority());
        assert!(BidStatus::Accepted.priority() < BidStatus::Rejected.priority());
        assert_eq!(BidStatus::Unknown.priority(), 4);
    }

    #[test]
    fn bid_status_unknown_absorbs_new_values() {
        let status: BidStatus = serde_json::from_str("\"withdrawn\"").unwrap();
        assert_eq!(status, BidStatus::Unknown);
    }

    #[test]
    fn bid_status_display_parses_back() {
        for status in [
            BidStatus::Pending,
            BidStatus::Accepted,
            BidStatus::Rejected,
            BidStatus::Unknown,
        ] {
            assert_eq!(status.to_string().parse::<BidStatus>().unwrap(), status);
        }
        assert_eq!("Withdrawn".parse::<BidStatus>().unwrap(), BidStatus::Unknown);
        assert!("  ".parse::<BidStatus>().is_err());
    }

    #[test]
    fn order_status_accepts_us_spelling() {
        assert_eq!(
            "Canceled".parse::<OrderStatus>().unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn rfq_status_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&RfqStatus::Awarded).unwrap(),
            "\"AWARDED\""
        );
        assert_eq!("open".parse::<RfqStatus>().unwrap(), RfqStatus::Open);
    }

    #[test]
    fn rfq_status_lifecycle() {
        assert!(RfqStatus::Draft.can_transition_to(RfqStatus::Open));
        assert!(RfqStatus::Open.can_transition_to(RfqStatus::Closed));
        assert!(!RfqStatus::Awarded.can_transition_to(RfqStatus::Open));
        assert!(!RfqStatus::Closed.can_transition_to(RfqStatus::Open));
        assert!(RfqStatus::Awarded.is_terminal());
        assert!(RfqStatus::Open.accepts_changes());
    }

    #[test]
    fn invite_status_is_forward_only() {
        assert!(InviteStatus::InviteSent.can_transition_to(InviteStatus::Viewed));
        assert!(InviteStatus::Viewed.can_transition_to(InviteStatus::Quoted));
        assert!(InviteStatus::Quoted.can_transition_to(InviteStatus::Updated));
        assert!(!InviteStatus::Quoted.can_transition_to(InviteStatus::Viewed));
        assert!(!InviteStatus::Updated.can_transition_to(InviteStatus::Quoted));
    }

    #[test]
    fn invite_status_serde_matches_store() {
        assert_eq!(
            serde_json::to_string(&InviteStatus::InviteSent).unwrap(),
            "\"INVITE_SENT\""
        );
        assert_eq!(
            "invite-sent".parse::<InviteStatus>().unwrap(),
            InviteStatus::InviteSent
        );
    }
}
