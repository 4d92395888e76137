//! Outbound adapters (driven side).

pub mod memory;
pub mod scheduler;
pub mod sqlite;
