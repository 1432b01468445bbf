//! # Domain Errors
//!
//! Errors raised by entities and pure domain services.

use crate::domain::value_objects::{
    ArithmeticError, InviteStatus, RfqId, RfqStatus, SupplierId,
};
use thiserror::Error;

/// Business-rule violation or invalid input detected in the domain layer.
///
/// "No result" outcomes (a caller without a bid on an order, an RFQ without
/// quotes) are not errors; they surface as `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input that a computation cannot be performed on, such as an empty
    /// set of bid amounts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A field failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A price was negative or malformed.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// RFQ lifecycle transition not allowed.
    #[error("invalid RFQ transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current status.
        from: RfqStatus,
        /// Requested status.
        to: RfqStatus,
    },

    /// Invite status transition not allowed.
    #[error("invalid invite transition from {from} to {to}")]
    InvalidInviteTransition {
        /// Current status.
        from: InviteStatus,
        /// Requested status.
        to: InviteStatus,
    },

    /// The RFQ no longer accepts invites or quotes.
    #[error("RFQ {id} is {status} and can no longer change")]
    RfqNotMutable {
        /// The RFQ.
        id: RfqId,
        /// Its current status.
        status: RfqStatus,
    },

    /// The supplier has already been invited to the RFQ.
    #[error("supplier {supplier_id} already invited to RFQ {rfq_id}")]
    DuplicateInvite {
        /// The RFQ.
        rfq_id: RfqId,
        /// The supplier.
        supplier_id: SupplierId,
    },

    /// Decimal arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = DomainError::not_found("invite", "abc");
        assert_eq!(err.to_string(), "invite not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn arithmetic_converts() {
        let err: DomainError = ArithmeticError::DivisionByZero.into();
        assert_eq!(err.to_string(), "arithmetic error: division by zero");
    }

    #[test]
    fn not_mutable_message() {
        let id = RfqId::new_v4();
        let err = DomainError::RfqNotMutable {
            id,
            status: RfqStatus::Awarded,
        };
        assert_eq!(
            err.to_string(),
            format!("RFQ {id} is AWARDED and can no longer change")
        );
    }
}
