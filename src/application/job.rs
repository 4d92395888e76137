//! The sales aggregation and popularity sync job.
//!
//! One run is: resolve the window, aggregate, store the snapshot, reconcile
//! popularity metadata. Stages run in order and the run stops at the first
//! failure:
//!
//! - aggregation failure: nothing is written
//! - snapshot failure: metadata is not touched
//! - sync failure: the new snapshot stays, metadata keeps its previous state
//!
//! Runs are not mutually excluded. Two overlapping runs each write a complete
//! snapshot and the later `put` wins.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tracing::{error, info, info_span};
use uuid::Uuid;

use super::aggregate::Aggregator;
use super::sync::MetadataSynchronizer;
use crate::domain::{resolve_window, validate_fiscal_month, ReportingWindow};
use crate::error::{JobError, Result};
use crate::port::outbound::meta::ProductMetaStore;
use crate::port::outbound::order::OrderLineReader;
use crate::port::outbound::scheduler::Scheduler;
use crate::port::outbound::snapshot::SnapshotCache;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub window: ReportingWindow,
    /// Distinct products that sold in the window.
    pub products_sold: usize,
    /// Popularity records written.
    pub metadata_updated: usize,
}

/// Wires the four stages together over injected ports.
pub struct SalesSyncJob {
    fiscal_start_month: u32,
    aggregator: Aggregator,
    cache: Arc<dyn SnapshotCache>,
    synchronizer: MetadataSynchronizer,
}

impl SalesSyncJob {
    /// Build a job for the given fiscal start month (1-12).
    pub fn new(
        fiscal_start_month: u32,
        orders: Arc<dyn OrderLineReader>,
        cache: Arc<dyn SnapshotCache>,
        meta: Arc<dyn ProductMetaStore>,
    ) -> Result<Self> {
        Ok(Self {
            fiscal_start_month: validate_fiscal_month(fiscal_start_month)?,
            aggregator: Aggregator::new(orders),
            cache,
            synchronizer: MetadataSynchronizer::new(meta),
        })
    }

    #[must_use]
    pub const fn fiscal_start_month(&self) -> u32 {
        self.fiscal_start_month
    }

    /// Run against the current local time.
    pub fn run(&self) -> Result<RunReport> {
        self.run_at(Local::now().naive_local())
    }

    /// Run as if the current time were `now`.
    ///
    /// # Errors
    /// Returns the [`JobError`] of the first failing stage.
    pub fn run_at(&self, now: NaiveDateTime) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("sales_sync", run_id = %run_id);
        let _enter = span.enter();

        let window = resolve_window(now, self.fiscal_start_month)?;
        info!(
            start = %window.start(),
            end = %window.end(),
            fiscal_start_month = self.fiscal_start_month,
            "Starting sales sync"
        );

        let snapshot = self.aggregator.aggregate(&window)?;
        info!(products = snapshot.len(), "Sales aggregated");

        self.cache.put(&snapshot).map_err(|e| {
            error!(error = %e, "Snapshot write failed");
            JobError::Snapshot {
                cause: e.to_string(),
            }
        })?;

        let product_ids = self.synchronizer.product_ids()?;
        let result = self.synchronizer.sync(&snapshot, &product_ids)?;

        info!(
            products_sold = snapshot.len(),
            metadata_updated = result.updated,
            "Sales sync complete"
        );

        Ok(RunReport {
            run_id,
            window,
            products_sold: snapshot.len(),
            metadata_updated: result.updated,
        })
    }

    /// Register this job with `scheduler` to run daily at `at`.
    ///
    /// Scheduled runs have no caller to report to, so failures are logged.
    pub fn register(self: Arc<Self>, scheduler: &mut dyn Scheduler, at: NaiveTime) {
        info!(at = %at, "Registering daily sales sync");
        scheduler.schedule_daily(
            at,
            Box::new(move || match self.run() {
                Ok(report) => info!(
                    run_id = %report.run_id,
                    products_sold = report.products_sold,
                    "Scheduled sales sync finished"
                ),
                Err(e) => error!(error = %e, "Scheduled sales sync failed"),
            }),
        );
    }
}
