//! Birthdays Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for the birthdays tracker.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod birthdays;
pub mod constants;
pub mod errors;
pub mod events;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
