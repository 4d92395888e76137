//! SQLite product metadata store.
//!
//! Popularity values live in `postmeta` next to every other product field.
//! Whole-key replacement runs in a single transaction so readers see either
//! the previous values or the new ones.

use std::collections::{BTreeMap, BTreeSet};

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    NewPostMetaRow, POST_TYPE_PRODUCT, STATUS_PUBLISH,
};
use crate::adapter::outbound::sqlite::database::schema::{postmeta, posts};
use crate::domain::ProductId;
use crate::error::{Error, Result};
use crate::port::outbound::meta::ProductMetaStore;

/// SQLite-backed product metadata store.
pub struct SqliteProductMeta {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteProductMeta {
    /// Create a new metadata store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn parse_value(key: &str, post_id: i64, raw: Option<&str>) -> Result<i64> {
        let raw = raw.unwrap_or_default().trim();
        raw.parse::<i64>()
            .map_err(|e| Error::Parse(format!("{key} for product {post_id}: '{raw}': {e}")))
    }
}

impl ProductMetaStore for SqliteProductMeta {
    fn product_ids(&self) -> Result<BTreeSet<ProductId>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let ids: Vec<i64> = posts::table
            .filter(posts::post_type.eq(POST_TYPE_PRODUCT))
            .filter(posts::post_status.eq(STATUS_PUBLISH))
            .select(posts::id)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(ids.into_iter().map(ProductId::new).collect())
    }

    fn replace_all(&self, key: &str, values: &BTreeMap<ProductId, i64>) -> Result<usize> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(postmeta::table.filter(postmeta::meta_key.eq(key))).execute(conn)?;

            let mut written = 0;
            for (id, value) in values {
                written += diesel::insert_into(postmeta::table)
                    .values(&NewPostMetaRow {
                        post_id: id.value(),
                        meta_key: key.to_string(),
                        meta_value: Some(value.to_string()),
                    })
                    .execute(conn)?;
            }
            Ok(written)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    fn values(&self, key: &str) -> Result<BTreeMap<ProductId, i64>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<(i64, Option<String>)> = postmeta::table
            .filter(postmeta::meta_key.eq(key))
            .order(postmeta::meta_id.asc())
            .select((postmeta::post_id, postmeta::meta_value))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(post_id, raw)| {
                Self::parse_value(key, post_id, raw.as_deref())
                    .map(|value| (ProductId::new(post_id), value))
            })
            .collect()
    }

    fn get(&self, product_id: ProductId, key: &str) -> Result<Option<String>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let value: Option<Option<String>> = postmeta::table
            .filter(postmeta::post_id.eq(product_id.value()))
            .filter(postmeta::meta_key.eq(key))
            .order(postmeta::meta_id.desc())
            .select(postmeta::meta_value)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(value.flatten())
    }

    fn set(&self, product_id: ProductId, key: &str, value: &str) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(
                postmeta::table
                    .filter(postmeta::post_id.eq(product_id.value()))
                    .filter(postmeta::meta_key.eq(key)),
            )
            .execute(conn)?;
            diesel::insert_into(postmeta::table)
                .values(&NewPostMetaRow {
                    post_id: product_id.value(),
                    meta_key: key.to_string(),
                    meta_value: Some(value.to_string()),
                })
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }
}
