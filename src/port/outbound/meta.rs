//! Product metadata ports.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::ProductId;
use crate::error::Result;

/// Per-product key/value metadata in the host store.
pub trait ProductMetaStore: Send + Sync {
    /// Ids of every published product.
    fn product_ids(&self) -> Result<BTreeSet<ProductId>>;

    /// Replace every record stored under `key` with `values`.
    ///
    /// Existing records for `key` are deleted and one record per entry is
    /// inserted, as a single atomic unit: on error the previous records are
    /// left in place. Returns the number of records written.
    fn replace_all(&self, key: &str, values: &BTreeMap<ProductId, i64>) -> Result<usize>;

    /// All values stored under `key`, by product.
    fn values(&self, key: &str) -> Result<BTreeMap<ProductId, i64>>;

    /// Raw value of one product's `key`, if set.
    fn get(&self, product_id: ProductId, key: &str) -> Result<Option<String>>;

    /// Create or overwrite one product's `key`.
    fn set(&self, product_id: ProductId, key: &str, value: &str) -> Result<()>;
}
