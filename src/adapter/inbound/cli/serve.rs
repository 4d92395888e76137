//! Handler for the `serve` command.

use std::sync::Arc;

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::scheduler::DailyScheduler;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run the sync daily at the configured time until ctrl-c.
pub async fn execute(config: &Config, run_now: bool) -> Result<()> {
    let at = config.schedule.run_at()?;
    let store = bootstrap::open_store(&config.database)?;
    let job = Arc::new(bootstrap::build_job(config, &store)?);

    if run_now {
        // A failed immediate run is reported but does not stop the schedule.
        match job.run() {
            Ok(report) => output::success(&format!(
                "Synced {} products for {}",
                report.products_sold,
                output::format_window(&report.window)
            )),
            Err(e) => output::warning(&format!("Immediate run failed: {e}")),
        }
    }

    let mut scheduler = DailyScheduler::new();
    Arc::clone(&job).register(&mut scheduler, at);

    output::field("Schedule", format!("daily at {}", at.format("%H:%M")));
    output::note("Press ctrl-c to stop");

    tokio::select! {
        () = scheduler.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    output::success("Scheduler stopped");
    Ok(())
}
