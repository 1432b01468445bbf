//! # Identifiers
//!
//! Strongly-typed identifiers for marketplace entities.
//!
//! Two families exist:
//!
//! - UUID-based ids for entities minted by this crate: [`RfqId`],
//!   [`QuoteId`], [`InviteId`].
//! - String-based ids for entities owned by the hosted backend and supplied
//!   to this crate already typed: [`OrderId`], [`BidId`], [`ItemId`],
//!   [`PartyId`], [`SupplierId`].
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::value_objects::{PartyId, RfqId};
//!
//! let rfq_id = RfqId::new_v4();
//! let seller = PartyId::new("seller-1");
//!
//! assert_ne!(rfq_id, RfqId::new_v4());
//! assert_eq!(seller.as_str(), "seller-1");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            #[inline]
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a random (v4) identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner UUID.
            #[inline]
            #[must_use]
            pub const fn get(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

uuid_id!(
    /// Identifier of a request for quote.
    RfqId
);

uuid_id!(
    /// Identifier of a supplier quote within an RFQ.
    QuoteId
);

uuid_id!(
    /// Identifier of a supplier invite within an RFQ.
    InviteId
);

string_id!(
    /// Identifier of a buyer order.
    OrderId
);

string_id!(
    /// Identifier of a product bid or a shipping bid.
    BidId
);

string_id!(
    /// Identifier of a catalogue item.
    ItemId
);

string_id!(
    /// Identifier of a marketplace participant: buyer, seller or shipping provider.
    PartyId
);

string_id!(
    /// Identifier of an RFQ supplier.
    SupplierId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_unique() {
        assert_ne!(QuoteId::new_v4(), QuoteId::new_v4());
    }

    #[test]
    fn uuid_id_parses_its_display() {
        let id = InviteId::new_v4();
        let parsed: InviteId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn uuid_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RfqId>().is_err());
    }

    #[test]
    fn string_id_serializes_transparently() {
        let id = SupplierId::new("sup-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sup-7\"");
    }
}
