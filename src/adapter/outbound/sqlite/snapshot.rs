//! SQLite snapshot cache.
//!
//! The latest snapshot is one JSON document in the `options` table, replaced
//! wholesale on every write.

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::OptionRow;
use crate::adapter::outbound::sqlite::database::schema::options;
use crate::domain::SalesSnapshot;
use crate::error::{Error, Result};
use crate::port::outbound::snapshot::SnapshotCache;

/// Option name the snapshot is stored under.
pub const SNAPSHOT_OPTION: &str = "yearly_sales_per_product";

/// SQLite-backed snapshot slot.
pub struct SqliteSnapshotCache {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteSnapshotCache {
    /// Create a new snapshot cache with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SnapshotCache for SqliteSnapshotCache {
    fn get(&self) -> Result<Option<SalesSnapshot>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<OptionRow> = options::table
            .find(SNAPSHOT_OPTION)
            .select(OptionRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(|row| {
            serde_json::from_str(&row.option_value).map_err(|e| Error::Parse(e.to_string()))
        })
        .transpose()
    }

    fn put(&self, snapshot: &SalesSnapshot) -> Result<()> {
        let row = OptionRow {
            option_name: SNAPSHOT_OPTION.to_string(),
            option_value: serde_json::to_string(snapshot)?,
        };
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::replace_into(options::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
