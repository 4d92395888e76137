//! Daily schedule configuration.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const RUN_AT_FORMAT: &str = "%H:%M";

/// When the daily sync fires, in store-local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// `HH:MM`, 24-hour clock.
    pub run_at: String,
}

impl ScheduleConfig {
    /// Parsed `run_at`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] unless `run_at` is `HH:MM`.
    pub fn run_at(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.run_at.trim(), RUN_AT_FORMAT).map_err(|e| {
            ConfigError::InvalidValue {
                field: "schedule.run_at",
                reason: format!("'{}' is not HH:MM ({e})", self.run_at),
            }
            .into()
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            run_at: "00:00".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_midnight() {
        assert_eq!(
            ScheduleConfig::default().run_at().unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_afternoon_time() {
        let schedule = ScheduleConfig {
            run_at: "14:30".into(),
        };
        assert_eq!(
            schedule.run_at().unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        for bad in ["24:00", "noon", "7", ""] {
            let schedule = ScheduleConfig {
                run_at: bad.into(),
            };
            assert!(schedule.run_at().is_err(), "{bad} should be rejected");
        }
    }
}
