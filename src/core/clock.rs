//! Source of "today" for expiry checks

use chrono::{Local, NaiveDate};

/// Provides the current calendar date
///
/// Expiry validation compares against the current month and year, so the
/// controller takes the date from an injected clock instead of reading the
/// system time directly.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Fixed clock on the first day of the given month
    ///
    /// Returns `None` for an impossible month.
    pub fn on(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
