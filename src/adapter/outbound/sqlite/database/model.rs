//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{options, order_itemmeta, order_items, postmeta, posts};

/// Post type of a product entity.
pub const POST_TYPE_PRODUCT: &str = "product";
/// Post type of an order entity.
pub const POST_TYPE_ORDER: &str = "shop_order";
/// Status of a product visible in the catalog.
pub const STATUS_PUBLISH: &str = "publish";
/// Status of an order counted as a sale.
pub const STATUS_COMPLETED: &str = "wc-completed";

/// Order item meta key holding the product id.
pub const ITEM_META_PRODUCT_ID: &str = "_product_id";
/// Order item meta key holding the quantity.
pub const ITEM_META_QTY: &str = "_qty";
/// Order item meta key holding the line total.
pub const ITEM_META_LINE_TOTAL: &str = "_line_total";
/// Order item meta key holding a bundle product's price.
pub const ITEM_META_BUNDLE_PRICE: &str = "_bundle_price";

/// Database row for a post (products and orders).
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRow {
    pub id: i64,
    pub post_type: String,
    pub post_status: String,
    pub post_title: String,
    /// `YYYY-MM-DD HH:MM:SS`, store-local.
    pub post_date: String,
}

/// Database row for post metadata (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = postmeta)]
pub struct NewPostMetaRow {
    pub post_id: i64,
    pub meta_key: String,
    pub meta_value: Option<String>,
}

/// Database row for an order item.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderItemRow {
    pub order_item_id: i64,
    pub order_id: i64,
    pub order_item_name: String,
    pub order_item_type: String,
}

/// Database row for order item metadata (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = order_itemmeta)]
pub struct NewOrderItemMetaRow {
    pub order_item_id: i64,
    pub meta_key: String,
    pub meta_value: Option<String>,
}

/// Database row for a named option.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = options)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OptionRow {
    pub option_name: String,
    pub option_value: String,
}
