//! # Reference Data
//!
//! Suppliers, the buyer's profile and market price observations. None of
//! these take part in ranking; they are carried by the RFQ store.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Price, SupplierId, Timestamp};
use serde::{Deserialize, Serialize};

/// A supplier that can be invited to RFQs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Supplier identifier.
    pub id: SupplierId,
    /// Company name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Named contact person.
    pub contact_person: String,
}

impl Supplier {
    /// Creates a supplier record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the name is blank or the
    /// email has no `@`.
    pub fn new(
        id: SupplierId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        contact_person: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(format!(
                "invalid supplier email: {email}"
            )));
        }
        Ok(Self {
            id,
            name,
            email,
            phone: phone.into(),
            contact_person: contact_person.into(),
        })
    }
}

/// Per-buyer settings shown on RFQ documents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerProfile {
    /// Buyer's company.
    pub company_name: String,
    /// Buyer's name.
    pub buyer_name: String,
    /// Buyer's email.
    pub email: String,
}

/// An observed market price for a product on a given date.
///
/// Used by buyers as a reference when judging quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    /// Product the price applies to.
    pub product_name: String,
    /// Observed price per unit.
    pub price: Price,
    /// Unit of measure.
    pub unit: String,
    /// Observation date.
    pub date: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_requires_name_and_email() {
        assert!(Supplier::new(SupplierId::new("s"), "", "a@b.c", "", "").is_err());
        assert!(Supplier::new(SupplierId::new("s"), "Acme", "nope", "", "").is_err());
        assert!(Supplier::new(SupplierId::new("s"), "Acme", "sales@acme.test", "", "Jo").is_ok());
    }
}
