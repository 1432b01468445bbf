//! # Application Layer
//!
//! Use cases over the domain, wired to repositories, an ID source and a
//! clock.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
