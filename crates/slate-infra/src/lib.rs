//! # Slate Infrastructure
//!
//! Concrete implementations of the ports defined in `slate-core`.
//! This crate contains the database adapters and the publish outcome source.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod outcome;

// Re-exports - In-Memory
pub use database::InMemoryPostRepository;
pub use outcome::RandomOutcomeSource;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections, PostgresPostRepository};
