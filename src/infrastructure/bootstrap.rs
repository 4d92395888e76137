//! Infrastructure bootstrap helpers for runtime wiring.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::meta::SqliteProductMeta;
use crate::adapter::outbound::sqlite::order::SqliteOrderReader;
use crate::adapter::outbound::sqlite::snapshot::SqliteSnapshotCache;
use crate::application::job::SalesSyncJob;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::meta::ProductMetaStore;
use crate::port::outbound::order::OrderLineReader;
use crate::port::outbound::snapshot::SnapshotCache;

/// The store's adapters, all sharing one connection pool.
#[derive(Clone)]
pub struct Store {
    pub orders: Arc<dyn OrderLineReader>,
    pub meta: Arc<dyn ProductMetaStore>,
    pub snapshots: Arc<dyn SnapshotCache>,
}

impl Store {
    /// Wrap an already migrated pool.
    #[must_use]
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            orders: Arc::new(SqliteOrderReader::new(pool.clone())),
            meta: Arc::new(SqliteProductMeta::new(pool.clone())),
            snapshots: Arc::new(SqliteSnapshotCache::new(pool)),
        }
    }
}

/// Open the SQLite store at `database`, creating and migrating it if needed.
pub fn open_store(database: &str) -> Result<Store> {
    if let Some(parent) = Path::new(database).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = create_pool(database)?;
    run_migrations(&pool)?;
    {
        let mut conn = pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
    }
    debug!(database, "Store opened");

    Ok(Store::from_pool(pool))
}

/// Build the sync job over `store` using the configured fiscal year.
pub fn build_job(config: &Config, store: &Store) -> Result<SalesSyncJob> {
    info!(
        fiscal_start_month = config.fiscal_start_month,
        database = %config.database,
        "Building sales sync job"
    );
    SalesSyncJob::new(
        config.fiscal_start_month,
        Arc::clone(&store.orders),
        Arc::clone(&store.snapshots),
        Arc::clone(&store.meta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_store_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.db");

        let store = open_store(&path.to_string_lossy()).unwrap();

        assert!(path.exists());
        assert!(store.snapshots.get().unwrap().is_none());
        assert!(store.meta.product_ids().unwrap().is_empty());
    }

    #[test]
    fn build_job_rejects_bad_fiscal_month() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("store.db").to_string_lossy()).unwrap();
        let config = Config {
            fiscal_start_month: 13,
            ..Config::default()
        };
        assert!(build_job(&config, &store).is_err());
    }
}
