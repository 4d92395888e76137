//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the host store and the scheduler the sales sync
//! job depends on.

pub mod meta;
pub mod order;
pub mod scheduler;
pub mod snapshot;
