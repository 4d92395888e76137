//! Sales line items and the aggregated yearly snapshot.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One product entry of a completed order, as read from the order store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    /// Primary monetary line total.
    pub line_total: Decimal,
    /// Alternate total recorded by bundle products, when present.
    pub bundle_price: Option<Decimal>,
}

impl LineItem {
    /// Monetary value this item contributes to its product's total.
    ///
    /// Bundle products record a zero line total and carry the real amount in
    /// the bundle price. The bundle price is used only when the line total is
    /// exactly zero; any non-zero line total wins.
    #[must_use]
    pub fn effective_total(&self) -> Decimal {
        match self.bundle_price {
            Some(bundle) if self.line_total.is_zero() => bundle,
            _ => self.line_total,
        }
    }
}

/// Per-product yearly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesAggregateRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity_sold: u64,
    pub total_sales: Decimal,
}

/// Aggregated sales for one reporting window.
///
/// Rows are kept in descending `quantity_sold` order with ties broken by
/// ascending product id, so two aggregations of the same input are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalesSnapshot {
    rows: Vec<SalesAggregateRow>,
}

impl SalesSnapshot {
    /// Build a snapshot from rows in any order.
    #[must_use]
    pub fn new(mut rows: Vec<SalesAggregateRow>) -> Self {
        rows.sort_by(|a, b| {
            b.quantity_sold
                .cmp(&a.quantity_sold)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        Self { rows }
    }

    /// Group line items by product, summing quantity and effective totals.
    ///
    /// Totals are rounded to two decimal places after summing. The product
    /// name of the first line item seen for a product is kept.
    #[must_use]
    pub fn from_line_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = LineItem>,
    {
        let mut grouped: BTreeMap<ProductId, SalesAggregateRow> = BTreeMap::new();

        for item in items {
            let total = item.effective_total();
            let row = grouped
                .entry(item.product_id)
                .or_insert_with(|| SalesAggregateRow {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity_sold: 0,
                    total_sales: Decimal::ZERO,
                });
            row.quantity_sold = row.quantity_sold.saturating_add(item.quantity);
            row.total_sales += total;
        }

        let rows = grouped
            .into_values()
            .map(|mut row| {
                row.total_sales = row
                    .total_sales
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                row
            })
            .collect();

        Self::new(rows)
    }

    #[must_use]
    pub fn rows(&self) -> &[SalesAggregateRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Quantity sold for a product, if it sold in the window.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u64> {
        self.rows
            .iter()
            .find(|row| row.product_id == product_id)
            .map(|row| row.quantity_sold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(id: i64, qty: u64, total: Decimal, bundle: Option<Decimal>) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            product_name: format!("Product {id}"),
            quantity: qty,
            line_total: total,
            bundle_price: bundle,
        }
    }

    #[test]
    fn zero_line_total_uses_bundle_price() {
        let line = item(1, 1, dec!(0), Some(dec!(12.50)));
        assert_eq!(line.effective_total(), dec!(12.50));
    }

    #[test]
    fn non_zero_line_total_ignores_bundle_price() {
        let line = item(1, 1, dec!(5.00), Some(dec!(12.50)));
        assert_eq!(line.effective_total(), dec!(5.00));
    }

    #[test]
    fn zero_line_total_without_bundle_price_stays_zero() {
        let line = item(1, 1, dec!(0.00), None);
        assert_eq!(line.effective_total(), Decimal::ZERO);
    }

    #[test]
    fn aggregated_total_includes_bundle_substitution() {
        let snapshot = SalesSnapshot::from_line_items(vec![
            item(7, 1, dec!(0), Some(dec!(12.50))),
            item(7, 2, dec!(5.00), Some(dec!(12.50))),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.rows()[0].quantity_sold, 3);
        assert_eq!(snapshot.rows()[0].total_sales, dec!(17.50));
    }

    #[test]
    fn groups_by_product_and_sorts_by_quantity_descending() {
        let snapshot = SalesSnapshot::from_line_items(vec![
            item(1, 2, dec!(4.00), None),
            item(2, 10, dec!(20.00), None),
            item(1, 3, dec!(6.00), None),
            item(3, 1, dec!(1.00), None),
        ]);

        let ids: Vec<i64> = snapshot.rows().iter().map(|r| r.product_id.value()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(snapshot.quantity_of(ProductId::new(1)), Some(5));
        assert_eq!(snapshot.rows()[1].total_sales, dec!(10.00));
    }

    #[test]
    fn ties_break_by_ascending_product_id() {
        let snapshot = SalesSnapshot::from_line_items(vec![
            item(30, 5, dec!(1), None),
            item(10, 5, dec!(1), None),
            item(20, 5, dec!(1), None),
        ]);
        let ids: Vec<i64> = snapshot.rows().iter().map(|r| r.product_id.value()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn adjacent_rows_never_increase_in_quantity() {
        let items = (1..=40).map(|i| item(i % 9, (i as u64 * 7) % 13, dec!(1.10), None));
        let snapshot = SalesSnapshot::from_line_items(items);
        for pair in snapshot.rows().windows(2) {
            assert!(pair[0].quantity_sold >= pair[1].quantity_sold);
        }
    }

    #[test]
    fn totals_round_to_two_places_half_away_from_zero() {
        let snapshot = SalesSnapshot::from_line_items(vec![
            item(1, 1, dec!(0.3333), None),
            item(1, 1, dec!(0.3342), None),
        ]);
        assert_eq!(snapshot.rows()[0].total_sales, dec!(0.67));

        let midpoint = SalesSnapshot::from_line_items(vec![item(2, 1, dec!(2.345), None)]);
        assert_eq!(midpoint.rows()[0].total_sales, dec!(2.35));
    }

    #[test]
    fn empty_input_gives_empty_snapshot() {
        let snapshot = SalesSnapshot::from_line_items(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot, SalesSnapshot::default());
    }

    #[test]
    fn snapshot_survives_json_storage() {
        let snapshot = SalesSnapshot::from_line_items(vec![item(10, 150, dec!(75.00), None)]);
        let blob = serde_json::to_string(&snapshot).unwrap();
        let restored: SalesSnapshot = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, snapshot);
    }
}
