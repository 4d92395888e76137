//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the order reader, product
//! metadata store and snapshot cache using Diesel ORM.

pub mod database;
pub mod meta;
pub mod order;
pub mod snapshot;
