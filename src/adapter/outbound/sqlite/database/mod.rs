//! SQLite database modules.
//!
//! Provides database connection management, schema definitions, and
//! Diesel model types for the host store tables.

pub mod connection;
pub mod model;
pub mod schema;
