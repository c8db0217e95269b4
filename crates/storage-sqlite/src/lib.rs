//! SQLite storage implementation for the birthdays tracker.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `birthdays-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The birthday repository and its database model types
//!
//! ```text
//!         core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod birthdays;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from birthdays-core for convenience
pub use birthdays_core::errors::{DatabaseError, Error, Result};
