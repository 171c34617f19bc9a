//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Days, Local, NaiveDate};

/// Date format expected by the exchange-rate provider (e.g. `01.12.2024`).
pub const PROVIDER_DATE_FORMAT: &str = "%d.%m.%Y";

/// Timestamp format used by the command log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;

    /// Get the calendar date `days_ago` days before today
    fn date_days_ago(&self, days_ago: u32) -> NaiveDate {
        date_days_before(self.now().date_naive(), days_ago)
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Subtract whole calendar days from a date, saturating at the earliest representable date
pub fn date_days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Format a date the way the exchange-rate provider expects (`DD.MM.YYYY`)
pub fn format_provider_date(date: NaiveDate) -> String {
    date.format(PROVIDER_DATE_FORMAT).to_string()
}

/// Format a timestamp for the command log
pub fn format_log_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(LOG_TIMESTAMP_FORMAT).to_string()
}
