//! Scheduler port.

use chrono::NaiveTime;

/// Job invoked by a scheduler. Failures are the job's to log.
pub type ScheduledJob = Box<dyn FnMut() + Send + 'static>;

/// Periodic trigger for registered jobs.
///
/// The job logic only ever sees this trait, so it can be driven by a tokio
/// timer loop in production and fired by hand in tests.
pub trait Scheduler {
    /// Register `job` to run once per calendar day at local time `at`.
    fn schedule_daily(&mut self, at: NaiveTime, job: ScheduledJob);
}
