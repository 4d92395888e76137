//! Vitalstats - yearly product sales aggregation and catalog popularity sync.
//!
//! Once a day (or on demand) the job totals every completed order line of the
//! current fiscal year per product, stores the result as a snapshot, and
//! writes each published product's yearly quantity into its `yearly_sales`
//! metadata so the catalog can be sorted by popularity.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure types and rules: reporting window, line items,
//!   snapshot aggregation, report sorting and quantity bands
//! - [`port`] - Traits the application needs from the outside world
//! - [`application`] - The aggregator, metadata synchronizer and the job
//!   wiring them together
//! - [`adapter`] - SQLite and in-memory stores, schedulers, and the CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitalstats::adapter::outbound::memory::MemoryStore;
//! use vitalstats::application::job::SalesSyncJob;
//!
//! let store = Arc::new(MemoryStore::new());
//! let job = SalesSyncJob::new(9, store.clone(), store.clone(), store).unwrap();
//! let report = job.run().unwrap();
//! println!("{} products sold", report.products_sold);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
