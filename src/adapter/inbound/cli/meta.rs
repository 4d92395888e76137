//! Handlers for `meta get` and `meta set`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::sync::POPULARITY_META_KEY;
use crate::domain::ProductId;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Print one product's popularity value.
pub fn execute_get(config: &Config, product_id: ProductId) -> Result<()> {
    let store = bootstrap::open_store(&config.database)?;
    let value = store.meta.get(product_id, POPULARITY_META_KEY)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "meta.get",
            "product_id": product_id,
            "key": POPULARITY_META_KEY,
            "value": value,
        }));
        return Ok(());
    }

    match value {
        Some(value) => output::field(&format!("Product {product_id}"), value),
        None => output::warning(&format!(
            "No {POPULARITY_META_KEY} value for product {product_id}"
        )),
    }
    Ok(())
}

/// Overwrite one product's popularity value and confirm it stuck.
pub fn execute_set(config: &Config, product_id: ProductId, value: i64) -> Result<()> {
    let store = bootstrap::open_store(&config.database)?;

    let wanted = value.to_string();
    store.meta.set(product_id, POPULARITY_META_KEY, &wanted)?;

    let stored = store.meta.get(product_id, POPULARITY_META_KEY)?;
    if stored.as_deref() != Some(wanted.as_str()) {
        return Err(Error::Database(format!(
            "{POPULARITY_META_KEY} for product {product_id} reads back as {stored:?}, expected {wanted}"
        )));
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "meta.set",
            "product_id": product_id,
            "key": POPULARITY_META_KEY,
            "value": value,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Set {POPULARITY_META_KEY} for product {product_id} to {value}"
    ));
    Ok(())
}
