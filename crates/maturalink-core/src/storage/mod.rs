//! Storage layer for MaturaLink.
//!
//! A single SQLite connection with foreign keys enabled and the schema
//! migrated to the latest version before any data access.

mod database;
pub mod migrations;

pub use database::{BoundedDatabase, Database, DatabaseStats};
