//! Popularity metadata reconciliation stage.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{ProductId, SalesSnapshot};
use crate::error::{JobError, Result};
use crate::port::outbound::meta::ProductMetaStore;

/// Metadata key holding each product's yearly quantity sold.
pub const POPULARITY_META_KEY: &str = "yearly_sales";

/// Outcome of a successful reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    /// Number of popularity records written.
    pub updated: usize,
}

/// Target popularity mapping for a snapshot and the current product set.
///
/// Every id in `product_ids` gets exactly one value: its quantity sold when it
/// appears in the snapshot, 0 otherwise. Snapshot rows for products outside
/// the set (unpublished or deleted since they sold) are dropped.
#[must_use]
pub fn popularity_values(
    snapshot: &SalesSnapshot,
    product_ids: &BTreeSet<ProductId>,
) -> BTreeMap<ProductId, i64> {
    let sold: BTreeMap<ProductId, u64> = snapshot
        .rows()
        .iter()
        .map(|row| (row.product_id, row.quantity_sold))
        .collect();

    product_ids
        .iter()
        .map(|id| {
            let quantity = sold.get(id).copied().unwrap_or(0);
            (*id, i64::try_from(quantity).unwrap_or(i64::MAX))
        })
        .collect()
}

/// Reconciles per-product popularity metadata against a snapshot.
pub struct MetadataSynchronizer {
    store: Arc<dyn ProductMetaStore>,
}

impl MetadataSynchronizer {
    #[must_use]
    pub fn new(store: Arc<dyn ProductMetaStore>) -> Self {
        Self { store }
    }

    /// Read the ids of every published product.
    ///
    /// # Errors
    /// Returns [`JobError::Sync`] when the store read fails.
    pub fn product_ids(&self) -> Result<BTreeSet<ProductId>> {
        self.store.product_ids().map_err(|e| {
            error!(error = %e, "Product id read failed");
            JobError::Sync {
                cause: e.to_string(),
            }
            .into()
        })
    }

    /// Wipe every popularity record, write the snapshot's quantities and
    /// backfill 0 for products that did not sell.
    ///
    /// The three steps are a single store transaction, so the call is
    /// idempotent and a failure leaves the previous records in place.
    ///
    /// # Errors
    /// Returns [`JobError::Sync`] carrying the store's message.
    pub fn sync(
        &self,
        snapshot: &SalesSnapshot,
        all_product_ids: &BTreeSet<ProductId>,
    ) -> Result<SyncResult> {
        let values = popularity_values(snapshot, all_product_ids);
        let zeroed = values.values().filter(|v| **v == 0).count();
        debug!(
            products = values.len(),
            zero_backfill = zeroed,
            "Reconciling popularity metadata"
        );

        let updated = self
            .store
            .replace_all(POPULARITY_META_KEY, &values)
            .map_err(|e| {
                error!(error = %e, "Popularity metadata write failed");
                JobError::Sync {
                    cause: e.to_string(),
                }
            })?;

        info!(updated, "Popularity metadata synced");
        Ok(SyncResult { updated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesAggregateRow;
    use rust_decimal_macros::dec;

    fn tomato_snapshot() -> SalesSnapshot {
        SalesSnapshot::new(vec![SalesAggregateRow {
            product_id: ProductId::new(10),
            product_name: "Tomato".to_string(),
            quantity_sold: 150,
            total_sales: dec!(75.00),
        }])
    }

    fn ids(raw: &[i64]) -> BTreeSet<ProductId> {
        raw.iter().copied().map(ProductId::new).collect()
    }

    #[test]
    fn sold_products_carry_quantity_and_others_zero() {
        let values = popularity_values(&tomato_snapshot(), &ids(&[10, 20]));
        assert_eq!(
            values,
            BTreeMap::from([(ProductId::new(10), 150), (ProductId::new(20), 0)])
        );
    }

    #[test]
    fn empty_snapshot_zeroes_every_product() {
        let values = popularity_values(&SalesSnapshot::default(), &ids(&[1, 2, 3]));
        assert_eq!(values.len(), 3);
        assert!(values.values().all(|v| *v == 0));
    }

    #[test]
    fn rows_for_unknown_products_are_dropped() {
        let values = popularity_values(&tomato_snapshot(), &ids(&[20]));
        assert_eq!(values, BTreeMap::from([(ProductId::new(20), 0)]));
    }

    #[test]
    fn key_set_equals_product_set() {
        let products = ids(&[4, 10, 99]);
        let values = popularity_values(&tomato_snapshot(), &products);
        let keys: BTreeSet<ProductId> = values.keys().copied().collect();
        assert_eq!(keys, products);
    }
}
