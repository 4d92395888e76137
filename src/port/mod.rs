//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the sales sync job and the host store it runs
//! against. Adapters implement them for SQLite, for in-memory test doubles,
//! and for the daily scheduler.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │   (SalesSyncJob, CLI)   │
//!                    └───────────┬─────────────┘
//!          ┌─────────────────┬───┴─────────────┬──────────────────┐
//!          ▼                 ▼                 ▼                  ▼
//!   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!   │ Order lines │   │ Product meta│   │  Snapshot   │   │  Scheduler  │
//!   └─────────────┘   └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`OrderLineReader`] - Completed order line items in a reporting window
//! - [`ProductMetaStore`] - Published products and their key/value metadata
//! - [`SnapshotCache`] - Single-slot storage of the latest sales snapshot
//! - [`Scheduler`] - Daily trigger for a registered job

pub mod outbound;

pub use outbound::meta::ProductMetaStore;
pub use outbound::order::OrderLineReader;
pub use outbound::scheduler::{ScheduledJob, Scheduler};
pub use outbound::snapshot::SnapshotCache;
