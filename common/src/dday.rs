//! Day counting towards (or since) an anniversary.
//!
//! Both ends are plain dates: the time of day the count was taken at never
//! leaks into the result, so the difference is always a whole number of days.

use chrono::NaiveDate;
use derive_more::Display;

/// Where today is relative to the d-day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DdayState {
    /// d-day is `_0` days ahead
    #[display("D - {_0}")]
    Future(u32),
    #[display("D - DAY")]
    Today,
    /// d-day was `_0` days ago
    #[display("D + {_0}")]
    Past(u32),
}

impl DdayState {
    pub fn between(target: NaiveDate, today: NaiveDate) -> Self {
        Self::from_diff(diff_days(target, today))
    }

    /// Classifies a signed `target - today` difference
    pub fn from_diff(diff: i64) -> Self {
        // chrono dates span far less than u32::MAX days
        let days = u32::try_from(diff.unsigned_abs()).unwrap_or(u32::MAX);
        match diff.signum() {
            1 => Self::Future(days),
            -1 => Self::Past(days),
            _ => Self::Today,
        }
    }

    /// Signed `target - today`, in days
    pub fn diff(self) -> i64 {
        match self {
            Self::Future(days) => i64::from(days),
            Self::Today => 0,
            Self::Past(days) => -i64::from(days),
        }
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

/// Signed number of days from `today` to `target`
pub fn diff_days(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}
