//! # Domain Layer
//!
//! Entities, value objects and pure services. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
