//! Handler for the `run` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::job::RunReport;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute one sales sync and report the outcome.
pub fn execute(config: &Config) -> Result<()> {
    let store = bootstrap::open_store(&config.database)?;
    let job = bootstrap::build_job(config, &store)?;

    let pb = output::spinner("Aggregating yearly sales");
    match job.run() {
        Ok(report) => {
            output::spinner_success(&pb, "Sales sync complete");
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Sales sync failed");
            Err(e)
        }
    }
}

fn print_report(report: &RunReport) {
    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "run_id": report.run_id.to_string(),
            "window": {
                "start": report.window.start().to_string(),
                "end": report.window.end().to_string(),
            },
            "products_sold": report.products_sold,
            "metadata_updated": report.metadata_updated,
        }));
        return;
    }

    output::field("Window", output::format_window(&report.window));
    output::field("Products sold", report.products_sold);
    output::field("Metadata updated", report.metadata_updated);
    if output::verbosity() > 0 {
        output::field("Run id", report.run_id);
    }
}
