//! Path utilities for vitalstats.
//!
//! All data lives under `~/.vitalstats/`:
//! - `~/.vitalstats/config.toml` - main configuration
//! - `~/.vitalstats/store.db` - SQLite store

use std::path::PathBuf;

/// Returns the vitalstats home directory (`~/.vitalstats/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vitalstats")
}

/// Returns the default config file path (`~/.vitalstats/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.vitalstats/store.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("store.db")
}
