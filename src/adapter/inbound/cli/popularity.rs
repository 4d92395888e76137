//! Handler for the `popularity` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::sync::POPULARITY_META_KEY;
use crate::domain::rank_by_popularity;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Product ID")]
    product_id: i64,
    #[tabled(rename = "Popularity")]
    popularity: i64,
}

/// List products in catalog popularity order.
pub fn execute(config: &Config, limit: Option<usize>) -> Result<()> {
    let store = bootstrap::open_store(&config.database)?;
    let values = store.meta.values(POPULARITY_META_KEY)?;
    let mut ranked = rank_by_popularity(&values);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "popularity",
            "products": ranked,
        }));
        return Ok(());
    }

    output::section("Catalog Popularity");
    if ranked.is_empty() {
        output::warning("No popularity data found. Run `vitalstats run` first.");
        return Ok(());
    }

    let rows = ranked.iter().enumerate().map(|(i, entry)| RankRow {
        rank: i + 1,
        product_id: entry.product_id.value(),
        popularity: entry.popularity,
    });
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
