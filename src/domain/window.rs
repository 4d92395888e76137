//! Reporting window resolution.
//!
//! The window spans one fiscal year ending "through today": it opens on day 1
//! of the fiscal start month (this calendar year once that month has passed,
//! otherwise last calendar year) and closes at 23:59:59 on the current date.
//!
//! Timestamps are naive store-local date-times, matching how the host store
//! records order dates.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Inclusive `[start, end]` range of order dates covered by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ReportingWindow {
    /// Create a window, rejecting empty or inverted ranges.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(ConfigError::InvalidValue {
                field: "window",
                reason: format!("start {start} must be before end {end}"),
            }
            .into());
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `at` falls inside the window, both bounds inclusive.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Validate a fiscal start month (1-12).
pub fn validate_fiscal_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ConfigError::InvalidValue {
            field: "fiscal_start_month",
            reason: format!("must be between 1 and 12, got {month}"),
        }
        .into())
    }
}

/// Resolve the reporting window for a run happening at `now`.
///
/// A month equal to the fiscal start month still opens the window last
/// calendar year, so the window on the first day of a new fiscal year covers
/// the whole previous one.
pub fn resolve_window(now: NaiveDateTime, fiscal_start_month: u32) -> Result<ReportingWindow> {
    let month = validate_fiscal_month(fiscal_start_month)?;
    let today = now.date();

    let start_year = if today.month() > month {
        today.year()
    } else {
        today.year() - 1
    };

    let start = NaiveDate::from_ymd_opt(start_year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "fiscal_start_month",
            reason: format!("no first day of month {month} in {start_year}"),
        })?;
    let end = today
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: "window",
            reason: format!("cannot close window on {today}"),
        })?;

    ReportingWindow::new(start, end)
}
