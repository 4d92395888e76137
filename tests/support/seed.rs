use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tempfile::TempDir;
use vitalstats::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use vitalstats::adapter::outbound::sqlite::database::model::{
    NewOrderItemMetaRow, OrderItemRow, PostRow, ITEM_META_BUNDLE_PRICE, ITEM_META_LINE_TOTAL,
    ITEM_META_PRODUCT_ID, ITEM_META_QTY, POST_TYPE_ORDER, POST_TYPE_PRODUCT, STATUS_COMPLETED,
    STATUS_PUBLISH,
};
use vitalstats::adapter::outbound::sqlite::database::schema::{order_itemmeta, order_items, posts};

/// One line of a seeded order.
pub struct Line<'a> {
    pub product_id: i64,
    pub quantity: &'a str,
    pub line_total: &'a str,
    pub bundle_price: Option<&'a str>,
    pub stored_product_id: Option<&'a str>,
}

impl<'a> Line<'a> {
    pub fn new(product_id: i64, quantity: &'a str, line_total: &'a str) -> Self {
        Self {
            product_id,
            quantity,
            line_total,
            bundle_price: None,
            stored_product_id: None,
        }
    }

    pub fn bundle(mut self, price: &'a str) -> Self {
        self.bundle_price = Some(price);
        self
    }

    /// Store this text as `_product_id` instead of `product_id`.
    pub fn stored_product_id(mut self, raw: &'a str) -> Self {
        self.stored_product_id = Some(raw);
        self
    }
}

/// Temporary SQLite store in the host store's layout.
pub struct SeededDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
    next_item_id: i64,
}

impl SeededDb {
    pub fn create() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("store.db");
        let pool = create_pool(&path.to_string_lossy()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        Self {
            dir,
            path,
            pool,
            next_item_id: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn insert_post(&self, row: PostRow) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert post");
    }

    pub fn product(&self, id: i64, title: &str) {
        self.product_with_status(id, title, STATUS_PUBLISH);
    }

    pub fn product_with_status(&self, id: i64, title: &str, status: &str) {
        self.insert_post(PostRow {
            id,
            post_type: POST_TYPE_PRODUCT.to_string(),
            post_status: status.to_string(),
            post_title: title.to_string(),
            post_date: "2020-01-01 00:00:00".to_string(),
        });
    }

    pub fn completed_order(&mut self, id: i64, placed_at: NaiveDateTime, lines: &[Line<'_>]) {
        self.order(id, placed_at, STATUS_COMPLETED, lines);
    }

    pub fn order(&mut self, id: i64, placed_at: NaiveDateTime, status: &str, lines: &[Line<'_>]) {
        self.insert_post(PostRow {
            id,
            post_type: POST_TYPE_ORDER.to_string(),
            post_status: status.to_string(),
            post_title: format!("Order {id}"),
            post_date: placed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        let mut conn = self.pool.get().expect("get connection");
        for line in lines {
            let item_id = self.next_item_id;
            self.next_item_id += 1;

            diesel::insert_into(order_items::table)
                .values(&OrderItemRow {
                    order_item_id: item_id,
                    order_id: id,
                    order_item_name: format!("Item {item_id}"),
                    order_item_type: "line_item".to_string(),
                })
                .execute(&mut conn)
                .expect("insert order item");

            let mut meta = vec![
                (
                    ITEM_META_PRODUCT_ID,
                    line.stored_product_id
                        .map_or_else(|| line.product_id.to_string(), str::to_string),
                ),
                (ITEM_META_QTY, line.quantity.to_string()),
                (ITEM_META_LINE_TOTAL, line.line_total.to_string()),
            ];
            if let Some(price) = line.bundle_price {
                meta.push((ITEM_META_BUNDLE_PRICE, price.to_string()));
            }
            for (key, value) in meta {
                diesel::insert_into(order_itemmeta::table)
                    .values(&NewOrderItemMetaRow {
                        order_item_id: item_id,
                        meta_key: key.to_string(),
                        meta_value: Some(value),
                    })
                    .execute(&mut conn)
                    .expect("insert order item meta");
            }
        }
    }
}
