//! # Identifier Generation
//!
//! Fresh IDs and invite tokens come from an injected [`IdGenerator`] rather
//! than from timestamps, so rapid successive calls never collide.

use crate::domain::value_objects::{InviteId, QuoteId, RfqId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of new identifiers and invite tokens.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Returns a fresh UUID.
    fn next_uuid(&self) -> Uuid;

    /// Returns an unguessable invite token.
    fn invite_token(&self) -> String;

    /// Returns a fresh RFQ ID.
    fn rfq_id(&self) -> RfqId {
        RfqId::new(self.next_uuid())
    }

    /// Returns a fresh quote ID.
    fn quote_id(&self) -> QuoteId {
        QuoteId::new(self.next_uuid())
    }

    /// Returns a fresh invite ID.
    fn invite_id(&self) -> InviteId {
        InviteId::new(self.next_uuid())
    }
}

/// Random v4 UUIDs; tokens are 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn invite_token(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic, monotonically increasing IDs for tests.
///
/// The n-th call yields the UUID whose 128-bit value is n.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_uuid(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next()))
    }

    fn invite_token(&self) -> String {
        format!("token-{:08}", self.next())
    }
}
