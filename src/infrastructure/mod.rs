//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading and the composition root that wires
//! the SQLite adapters into the sync job.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`paths`] - Default locations under `~/.vitalstats/`

pub mod bootstrap;
pub mod config;
pub mod paths;
