//! # Infrastructure Layer
//!
//! Persistence backends plus the injected ID and time sources.

pub mod clock;
pub mod ids;
pub mod persistence;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::{IdGenerator, SequentialIdGenerator, UuidGenerator};
