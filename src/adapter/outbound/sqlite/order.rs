//! SQLite order line-item reader.
//!
//! Reads completed orders' line items in one prepared statement. The window
//! bounds, statuses and meta keys are all bound parameters. Product ids and
//! quantities come back as the stored text and are parsed strictly here.

use std::fmt::Display;
use std::str::FromStr;

use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    ITEM_META_BUNDLE_PRICE, ITEM_META_LINE_TOTAL, ITEM_META_PRODUCT_ID, ITEM_META_QTY,
    POST_TYPE_ORDER, STATUS_COMPLETED,
};
use crate::domain::{LineItem, ProductId, ReportingWindow};
use crate::error::{Error, Result};
use crate::port::outbound::order::OrderLineReader;

/// Format used by the host store for `post_date`.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LINE_ITEMS_SQL: &str = "
    SELECT
        product_meta.meta_value AS product_id,
        product_post.post_title AS product_name,
        qty_meta.meta_value AS quantity,
        total_meta.meta_value AS line_total,
        bundle_meta.meta_value AS bundle_price
    FROM order_items
    INNER JOIN posts AS orders
        ON orders.id = order_items.order_id
    INNER JOIN order_itemmeta AS product_meta
        ON product_meta.order_item_id = order_items.order_item_id
        AND product_meta.meta_key = ?
    INNER JOIN order_itemmeta AS qty_meta
        ON qty_meta.order_item_id = order_items.order_item_id
        AND qty_meta.meta_key = ?
    INNER JOIN order_itemmeta AS total_meta
        ON total_meta.order_item_id = order_items.order_item_id
        AND total_meta.meta_key = ?
    LEFT JOIN order_itemmeta AS bundle_meta
        ON bundle_meta.order_item_id = order_items.order_item_id
        AND bundle_meta.meta_key = ?
    LEFT JOIN posts AS product_post
        ON product_post.id = product_meta.meta_value
    WHERE orders.post_type = ?
        AND orders.post_status = ?
        AND orders.post_date >= ?
        AND orders.post_date <= ?
    ORDER BY order_items.order_item_id
";

#[derive(QueryableByName, Debug)]
struct LineItemRow {
    #[diesel(sql_type = Nullable<Text>)]
    product_id: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    product_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    quantity: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    line_total: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    bundle_price: Option<String>,
}

/// Parse a stored money value; blank values count as absent.
fn parse_money(raw: Option<&str>) -> Result<Option<Decimal>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Decimal::from_str(text)
            .map(Some)
            .map_err(|e| Error::Parse(format!("invalid money value '{text}': {e}"))),
    }
}

/// Parse a stored integer field. Trailing garbage, fractions and signs the
/// target type cannot hold are errors.
fn parse_integer<T>(field: &str, raw: Option<&str>) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text = raw.map(str::trim).unwrap_or_default();
    text.parse::<T>()
        .map_err(|e| Error::Parse(format!("invalid {field} '{text}': {e}")))
}

impl LineItemRow {
    /// `None` when the product post no longer exists.
    fn into_line_item(self) -> Result<Option<LineItem>> {
        let product_id = parse_integer::<i64>("product id", self.product_id.as_deref())?;
        let quantity = parse_integer::<u64>(
            &format!("quantity for product {product_id}"),
            self.quantity.as_deref(),
        )?;
        let line_total = parse_money(self.line_total.as_deref())?.unwrap_or(Decimal::ZERO);
        let bundle_price = parse_money(self.bundle_price.as_deref())?;

        let Some(product_name) = self.product_name else {
            return Ok(None);
        };

        Ok(Some(LineItem {
            product_id: ProductId::new(product_id),
            product_name,
            quantity,
            line_total,
            bundle_price,
        }))
    }
}

/// SQLite-backed reader over the host store's order tables.
pub struct SqliteOrderReader {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteOrderReader {
    /// Create a new reader with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderLineReader for SqliteOrderReader {
    fn completed_line_items(&self, window: &ReportingWindow) -> Result<Vec<LineItem>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let start = window.start().format(POST_DATE_FORMAT).to_string();
        let end = window.end().format(POST_DATE_FORMAT).to_string();

        let rows: Vec<LineItemRow> = diesel::sql_query(LINE_ITEMS_SQL)
            .bind::<Text, _>(ITEM_META_PRODUCT_ID)
            .bind::<Text, _>(ITEM_META_QTY)
            .bind::<Text, _>(ITEM_META_LINE_TOTAL)
            .bind::<Text, _>(ITEM_META_BUNDLE_PRICE)
            .bind::<Text, _>(POST_TYPE_ORDER)
            .bind::<Text, _>(STATUS_COMPLETED)
            .bind::<Text, _>(&start)
            .bind::<Text, _>(&end)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter()
            .map(LineItemRow::into_line_item)
            .filter_map(Result::transpose)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_money_is_absent() {
        assert_eq!(parse_money(None).unwrap(), None);
        assert_eq!(parse_money(Some("  ")).unwrap(), None);
    }

    #[test]
    fn money_parses_exactly() {
        assert_eq!(parse_money(Some("12.50")).unwrap(), Some(dec!(12.50)));
        assert_eq!(parse_money(Some("0")).unwrap(), Some(Decimal::ZERO));
    }

    #[test]
    fn garbage_money_is_a_parse_error() {
        let err = parse_money(Some("twelve")).unwrap_err();
        assert!(err.to_string().contains("twelve"));
    }

    fn row(product_id: &str, quantity: &str) -> LineItemRow {
        LineItemRow {
            product_id: Some(product_id.into()),
            product_name: Some("Tomato".into()),
            quantity: Some(quantity.into()),
            line_total: Some("1.00".into()),
            bundle_price: None,
        }
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(row("1", "-2").into_line_item().is_err());
    }

    #[test]
    fn malformed_quantities_are_rejected() {
        for quantity in ["abc", "2.9", "12abc", ""] {
            let err = row("1", quantity).into_line_item().unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "{quantity}: {err}");
        }
    }

    #[test]
    fn malformed_product_id_is_rejected() {
        let err = row("12abc", "1").into_line_item().unwrap_err();
        assert!(err.to_string().contains("12abc"));
    }

    #[test]
    fn padded_integers_parse() {
        let item = row(" 7 ", " 3 ").into_line_item().unwrap().unwrap();
        assert_eq!(item.product_id, ProductId::new(7));
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn deleted_product_is_skipped() {
        let mut deleted = row("404", "1");
        deleted.product_name = None;
        assert!(deleted.into_line_item().unwrap().is_none());
    }

    #[test]
    fn missing_line_total_counts_as_zero_so_bundle_price_applies() {
        let mut line = row("1", "1");
        line.line_total = None;
        line.bundle_price = Some("12.50".into());
        let item = line.into_line_item().unwrap().unwrap();
        assert_eq!(item.effective_total(), dec!(12.50));
    }
}
