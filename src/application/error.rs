//! # Application Errors
//!
//! Failures surfaced by the application services.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Business rule violations
//! ├── Repository(RepositoryError)  - Storage failures
//! ├── Validation(String)           - Input validation failures
//! ├── NotFound { .. }              - Addressed entity missing
//! └── Configuration(String)        - Settings could not be loaded
//! ```
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::application::error::ApplicationError;
//!
//! let err = ApplicationError::not_found("RFQ", "rfq-123");
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Repository error from storage.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Rejected input.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Bad settings.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the addressed entity does not exist, at any layer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Domain(e) => e.is_not_found(),
            Self::Repository(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this is a validation error, at any layer.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Domain(
                    DomainError::ValidationError(_)
                        | DomainError::InvalidInput(_)
                        | DomainError::InvalidPrice(_)
                )
        )
    }

    /// Returns the domain error, if this wraps one.
    #[must_use]
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result of an application service call.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_across_layers() {
        assert!(ApplicationError::not_found("RFQ", "x").is_not_found());
        assert!(ApplicationError::from(DomainError::not_found("invite", "i")).is_not_found());
        assert!(ApplicationError::from(RepositoryError::not_found("Rfq", "r")).is_not_found());
        assert!(!ApplicationError::validation("bad").is_not_found());
    }

    #[test]
    fn validation_across_layers() {
        assert!(ApplicationError::validation("bad").is_validation());
        assert!(ApplicationError::from(DomainError::validation("bad")).is_validation());
        assert!(!ApplicationError::configuration("x").is_validation());
    }

    #[test]
    fn display_messages() {
        let err = ApplicationError::not_found("RFQ", "rfq-1");
        assert_eq!(err.to_string(), "not found: RFQ with id rfq-1");
        let err = ApplicationError::configuration("missing store path");
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn as_domain() {
        let err: ApplicationError = DomainError::invalid_input("empty").into();
        assert!(matches!(err.as_domain(), Some(DomainError::InvalidInput(_))));
        assert!(ApplicationError::validation("x").as_domain().is_none());
    }
}
