//! Handler for the `show` command: the cached snapshot as a sales table.

use chrono::Local;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ShowArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{resolve_window, sorted_rows, QuantityBand, SalesAggregateRow};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SalesRow {
    #[tabled(rename = "Product ID")]
    product_id: i64,
    #[tabled(rename = "Product Title")]
    title: String,
    #[tabled(rename = "Quantity Sold")]
    quantity: String,
    #[tabled(rename = "Total Sales")]
    total: String,
}

impl From<&SalesAggregateRow> for SalesRow {
    fn from(row: &SalesAggregateRow) -> Self {
        let band = QuantityBand::classify(row.quantity_sold);
        Self {
            product_id: row.product_id.value(),
            title: row.product_name.clone(),
            quantity: output::on_background(row.quantity_sold, band.background()),
            total: format!("{:.2}", row.total_sales),
        }
    }
}

/// Print the current window and the cached snapshot.
pub fn execute(config: &Config, args: &ShowArgs) -> Result<()> {
    let window = resolve_window(Local::now().naive_local(), config.fiscal_start_month)?;
    let store = bootstrap::open_store(&config.database)?;
    let snapshot = store.snapshots.get()?.unwrap_or_default();
    let rows = sorted_rows(&snapshot, args.sort_by.map(Into::into), args.order.into());

    if output::is_json() {
        let rows: Vec<_> = rows
            .iter()
            .map(|row| {
                json!({
                    "product_id": row.product_id,
                    "product_name": row.product_name,
                    "quantity_sold": row.quantity_sold,
                    "total_sales": format!("{:.2}", row.total_sales),
                    "band": QuantityBand::classify(row.quantity_sold),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "show",
            "window": {
                "start": window.start().to_string(),
                "end": window.end().to_string(),
            },
            "rows": rows,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Yearly Sales");
    output::field("Window", output::format_window(&window));

    if rows.is_empty() {
        output::warning("No sales data found.");
        return Ok(());
    }

    let table = Table::new(rows.into_iter().map(SalesRow::from)).to_string();
    output::lines(&table);
    Ok(())
}
