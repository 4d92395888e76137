//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the sales aggregation and popularity sync job.

pub mod aggregate;
pub mod job;
pub mod sync;
