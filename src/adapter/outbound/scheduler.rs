//! Scheduler adapters.
//!
//! [`DailyScheduler`] drives registered jobs from a tokio timer loop.
//! [`ManualScheduler`] only records registrations and fires them on request.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tracing::{error, info};

use crate::port::outbound::scheduler::{ScheduledJob, Scheduler};

/// Next occurrence of `at` strictly after `now`.
#[must_use]
pub fn next_run_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

struct Entry {
    at: NaiveTime,
    job: ScheduledJob,
    /// Occurrence that last ran, if any.
    last_run: Option<NaiveDateTime>,
}

impl Entry {
    fn new(at: NaiveTime, job: ScheduledJob) -> Self {
        Self {
            at,
            job,
            last_run: None,
        }
    }

    /// Next occurrence to run. Never repeats the occurrence that just ran,
    /// even if the wall clock still reads slightly before it.
    fn next_due(&self, now: NaiveDateTime) -> NaiveDateTime {
        let from = self.last_run.map_or(now, |last| last.max(now));
        next_run_after(from, self.at)
    }
}

/// Runs each registered job once a day at its local time.
#[derive(Default)]
pub struct DailyScheduler {
    entries: Vec<Entry>,
}

impl DailyScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loop forever, sleeping until the next due job and running it on the
    /// blocking pool. Returns once no jobs remain.
    pub async fn run(mut self) {
        loop {
            let now = Local::now().naive_local();
            let Some((index, due)) = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| (i, entry.next_due(now)))
                .min_by_key(|(_, due)| *due)
            else {
                info!("No scheduled jobs remain");
                return;
            };

            let wait = (due - now).to_std().unwrap_or_default();
            info!(
                next_run = %due,
                hours = wait.as_secs() / 3600,
                minutes = (wait.as_secs() % 3600) / 60,
                "Waiting for next scheduled run"
            );
            tokio::time::sleep(wait).await;

            let Entry { at, mut job, .. } = self.entries.swap_remove(index);
            match tokio::task::spawn_blocking(move || {
                job();
                job
            })
            .await
            {
                Ok(job) => self.entries.push(Entry {
                    at,
                    job,
                    last_run: Some(due),
                }),
                Err(e) => error!(error = %e, at = %at, "Scheduled job panicked; dropping it"),
            }
        }
    }
}

impl Scheduler for DailyScheduler {
    fn schedule_daily(&mut self, at: NaiveTime, job: ScheduledJob) {
        self.entries.push(Entry::new(at, job));
    }
}

/// Scheduler that never fires on its own.
#[derive(Default)]
pub struct ManualScheduler {
    entries: Vec<Entry>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Times of every registered job, in registration order.
    #[must_use]
    pub fn times(&self) -> Vec<NaiveTime> {
        self.entries.iter().map(|entry| entry.at).collect()
    }

    /// Invoke every registered job once.
    pub fn fire_all(&mut self) {
        for entry in &mut self.entries {
            (entry.job)();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_daily(&mut self, at: NaiveTime, job: ScheduledJob) {
        self.entries.push(Entry::new(at, job));
    }
}
