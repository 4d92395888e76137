//! In-memory store implementation for testing.
//!
//! [`MemoryStore`] models the slice of the host store the job needs (products,
//! orders, per-product metadata, the snapshot slot) and implements every
//! outbound store port. Failures can be injected per port to exercise the
//! job's fail-closed paths.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{LineItem, ProductId, ReportingWindow, SalesSnapshot};
use crate::error::{Error, Result};
use crate::port::outbound::meta::ProductMetaStore;
use crate::port::outbound::order::OrderLineReader;
use crate::port::outbound::snapshot::SnapshotCache;

/// Lifecycle state of an order; only completed orders count as sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Refunded,
}

/// One line of a stored order.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u64,
    pub line_total: Decimal,
    pub bundle_price: Option<Decimal>,
}

impl OrderLine {
    #[must_use]
    pub fn new(product_id: i64, quantity: u64, line_total: Decimal) -> Self {
        Self {
            product_id: ProductId::new(product_id),
            quantity,
            line_total,
            bundle_price: None,
        }
    }

    #[must_use]
    pub fn with_bundle_price(mut self, price: Decimal) -> Self {
        self.bundle_price = Some(price);
        self
    }
}

#[derive(Debug, Clone)]
struct Order {
    placed_at: NaiveDateTime,
    status: OrderStatus,
    lines: Vec<OrderLine>,
}

#[derive(Debug, Clone)]
struct Product {
    name: String,
    published: bool,
}

/// In-memory store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
    orders: RwLock<Vec<Order>>,
    meta: RwLock<BTreeMap<(ProductId, String), String>>,
    snapshot: RwLock<Option<SalesSnapshot>>,
    order_read_failure: RwLock<Option<String>>,
    meta_write_failure: RwLock<Option<String>>,
    snapshot_write_failure: RwLock<Option<String>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published product.
    pub fn add_product(&self, id: i64, name: &str) {
        self.products.write().insert(
            ProductId::new(id),
            Product {
                name: name.to_string(),
                published: true,
            },
        );
    }

    /// Add a product that exists but is not published (draft, trashed).
    pub fn add_unpublished_product(&self, id: i64, name: &str) {
        self.products.write().insert(
            ProductId::new(id),
            Product {
                name: name.to_string(),
                published: false,
            },
        );
    }

    /// Add an order with the given status and lines.
    pub fn add_order(&self, placed_at: NaiveDateTime, status: OrderStatus, lines: Vec<OrderLine>) {
        self.orders.write().push(Order {
            placed_at,
            status,
            lines,
        });
    }

    /// Drop every stored order.
    pub fn clear_orders(&self) {
        self.orders.write().clear();
    }

    /// Make order reads fail with `cause` until cleared with `None`.
    pub fn fail_order_reads(&self, cause: Option<&str>) {
        *self.order_read_failure.write() = cause.map(str::to_string);
    }

    /// Make metadata writes fail with `cause` until cleared with `None`.
    pub fn fail_meta_writes(&self, cause: Option<&str>) {
        *self.meta_write_failure.write() = cause.map(str::to_string);
    }

    /// Make snapshot writes fail with `cause` until cleared with `None`.
    pub fn fail_snapshot_writes(&self, cause: Option<&str>) {
        *self.snapshot_write_failure.write() = cause.map(str::to_string);
    }

    fn injected(slot: &RwLock<Option<String>>) -> Result<()> {
        match slot.read().as_ref() {
            Some(cause) => Err(Error::Database(cause.clone())),
            None => Ok(()),
        }
    }
}

impl OrderLineReader for MemoryStore {
    fn completed_line_items(&self, window: &ReportingWindow) -> Result<Vec<LineItem>> {
        Self::injected(&self.order_read_failure)?;

        let products = self.products.read();
        let orders = self.orders.read();
        let items = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .filter(|order| window.contains(order.placed_at))
            .flat_map(|order| order.lines.iter())
            .filter_map(|line| {
                // Inner join: lines for products missing from the store vanish.
                products.get(&line.product_id).map(|product| LineItem {
                    product_id: line.product_id,
                    product_name: product.name.clone(),
                    quantity: line.quantity,
                    line_total: line.line_total,
                    bundle_price: line.bundle_price,
                })
            })
            .collect();
        Ok(items)
    }
}

impl ProductMetaStore for MemoryStore {
    fn product_ids(&self) -> Result<BTreeSet<ProductId>> {
        Ok(self
            .products
            .read()
            .iter()
            .filter(|(_, product)| product.published)
            .map(|(id, _)| *id)
            .collect())
    }

    fn replace_all(&self, key: &str, values: &BTreeMap<ProductId, i64>) -> Result<usize> {
        Self::injected(&self.meta_write_failure)?;

        let mut meta = self.meta.write();
        meta.retain(|(_, k), _| k != key);
        for (id, value) in values {
            meta.insert((*id, key.to_string()), value.to_string());
        }
        Ok(values.len())
    }

    fn values(&self, key: &str) -> Result<BTreeMap<ProductId, i64>> {
        self.meta
            .read()
            .iter()
            .filter(|((_, k), _)| k == key)
            .map(|((id, _), raw)| {
                raw.parse::<i64>()
                    .map(|value| (*id, value))
                    .map_err(|e| Error::Parse(format!("{key} for product {id}: {e}")))
            })
            .collect()
    }

    fn get(&self, product_id: ProductId, key: &str) -> Result<Option<String>> {
        Ok(self
            .meta
            .read()
            .get(&(product_id, key.to_string()))
            .cloned())
    }

    fn set(&self, product_id: ProductId, key: &str, value: &str) -> Result<()> {
        Self::injected(&self.meta_write_failure)?;
        self.meta
            .write()
            .insert((product_id, key.to_string()), value.to_string());
        Ok(())
    }
}

impl SnapshotCache for MemoryStore {
    fn get(&self) -> Result<Option<SalesSnapshot>> {
        Ok(self.snapshot.read().clone())
    }

    fn put(&self, snapshot: &SalesSnapshot) -> Result<()> {
        Self::injected(&self.snapshot_write_failure)?;
        *self.snapshot.write() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn window() -> ReportingWindow {
        ReportingWindow::new(at(2024, 9, 1), at(2025, 8, 31)).unwrap()
    }

    #[test]
    fn only_completed_orders_inside_window_are_read() {
        let store = MemoryStore::new();
        store.add_product(1, "Tomato");
        store.add_order(
            at(2024, 10, 1),
            OrderStatus::Completed,
            vec![OrderLine::new(1, 2, dec!(3.00))],
        );
        store.add_order(
            at(2024, 10, 2),
            OrderStatus::Pending,
            vec![OrderLine::new(1, 5, dec!(7.50))],
        );
        store.add_order(
            at(2023, 1, 1),
            OrderStatus::Completed,
            vec![OrderLine::new(1, 9, dec!(9.00))],
        );

        let items = store.completed_line_items(&window()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].product_name, "Tomato");
    }

    #[test]
    fn lines_for_missing_products_are_dropped() {
        let store = MemoryStore::new();
        store.add_order(
            at(2024, 10, 1),
            OrderStatus::Completed,
            vec![OrderLine::new(404, 1, dec!(1.00))],
        );
        assert!(store.completed_line_items(&window()).unwrap().is_empty());
    }

    #[test]
    fn replace_all_only_touches_its_key() {
        let store = MemoryStore::new();
        store.set(ProductId::new(1), "colour", "red").unwrap();
        store.set(ProductId::new(1), "yearly_sales", "5").unwrap();
        store.set(ProductId::new(2), "yearly_sales", "7").unwrap();

        let values = BTreeMap::from([(ProductId::new(1), 9)]);
        assert_eq!(store.replace_all("yearly_sales", &values).unwrap(), 1);

        assert_eq!(store.values("yearly_sales").unwrap(), values);
        assert_eq!(
            ProductMetaStore::get(&store, ProductId::new(1), "colour").unwrap(),
            Some("red".to_string())
        );
    }

    #[test]
    fn injected_write_failure_leaves_metadata_alone() {
        let store = MemoryStore::new();
        store.set(ProductId::new(1), "yearly_sales", "5").unwrap();
        store.fail_meta_writes(Some("database is locked"));

        let err = store
            .replace_all("yearly_sales", &BTreeMap::new())
            .unwrap_err();
        assert!(err.to_string().contains("database is locked"));
        assert_eq!(
            ProductMetaStore::get(&store, ProductId::new(1), "yearly_sales").unwrap(),
            Some("5".to_string())
        );
    }

    #[test]
    fn unpublished_products_are_not_listed() {
        let store = MemoryStore::new();
        store.add_product(1, "Tomato");
        store.add_unpublished_product(2, "Old Kale");
        let ids: Vec<i64> = store
            .product_ids()
            .unwrap()
            .into_iter()
            .map(ProductId::value)
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn snapshot_slot_starts_empty_and_is_overwritten() {
        let store = MemoryStore::new();
        assert!(SnapshotCache::get(&store).unwrap().is_none());

        let first = SalesSnapshot::default();
        store.put(&first).unwrap();
        assert_eq!(SnapshotCache::get(&store).unwrap(), Some(first));
    }
}
