use chrono::{Local, NaiveDate};

/// Source of "today" for month navigation.
pub trait Clock: Send + Sync {
    /// Current calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
