use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Week,
    Month,
    Year,
}

/// A fixed cadence measured from an anchor date.
///
/// Occurrences are addressed by slot index: slot `k` is `anchor + k * every
/// units`, always computed from the anchor rather than from slot `k - 1`.
/// Calendar units (months and years) keep the anchor's day of month; a slot
/// whose target month lacks that day resolves to `None` instead of clamping
/// or rolling over into the following month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub const fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Resolves slot `index` relative to `anchor`. Returns `None` when the
    /// slot falls on a day that does not exist in its month, or beyond the
    /// representable date range.
    pub fn slot(&self, anchor: NaiveDate, index: u32) -> Option<NaiveDate> {
        let steps = i64::from(self.every) * i64::from(index);
        match self.unit {
            TimeUnit::Week => anchor.checked_add_signed(Duration::try_weeks(steps)?),
            TimeUnit::Month => shift_months_exact(anchor, steps),
            TimeUnit::Year => shift_months_exact(anchor, steps.checked_mul(12)?),
        }
    }

    /// Returns the only slot index that could land on `target`, without
    /// checking whether that slot actually exists. `None` means no slot can
    /// match: `target` precedes the anchor or sits off the cadence.
    pub fn candidate_index(&self, anchor: NaiveDate, target: NaiveDate) -> Option<u32> {
        if target < anchor || self.every == 0 {
            return None;
        }
        let (distance, period) = match self.unit {
            TimeUnit::Week => ((target - anchor).num_days(), i64::from(self.every) * 7),
            TimeUnit::Month => (month_distance(anchor, target), i64::from(self.every)),
            TimeUnit::Year => (
                i64::from(target.year() - anchor.year()),
                i64::from(self.every),
            ),
        };
        if distance < 0 || distance % period != 0 {
            return None;
        }
        u32::try_from(distance / period).ok()
    }

    /// Lowest slot index whose period contains or follows `date`. Every slot
    /// below it falls in an earlier period, so it is strictly before `date`.
    pub fn floor_index(&self, anchor: NaiveDate, date: NaiveDate) -> u32 {
        if date <= anchor || self.every == 0 {
            return 0;
        }
        let every = i64::from(self.every);
        let steps = match self.unit {
            TimeUnit::Week => (date - anchor).num_days().div_euclid(every * 7),
            TimeUnit::Month => month_distance(anchor, date).div_euclid(every),
            TimeUnit::Year => i64::from(date.year() - anchor.year()).div_euclid(every),
        };
        u32::try_from(steps.max(0)).unwrap_or(u32::MAX)
    }

    /// True when `target` is exactly the date of one of the slots.
    pub fn lands_on(&self, anchor: NaiveDate, target: NaiveDate) -> bool {
        self.candidate_index(anchor, target)
            .and_then(|index| self.slot(anchor, index))
            == Some(target)
    }
}

/// Signed number of calendar months from `from` to `to`, ignoring days.
pub fn month_distance(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year() - from.year());
    years * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

fn shift_months_exact(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let month_index = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, date.day())
}
