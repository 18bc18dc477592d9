//! Occurrence semantics for one-time and recurring transactions.
//!
//! Point membership ([`occurs_on`]) and forward expansion ([`Occurrences`])
//! both resolve dates through [`TimeInterval::slot`], so a date is reported as
//! an occurrence by one exactly when it is produced by the other.

use chrono::NaiveDate;

use super::{time_interval::TimeInterval, Transaction};

/// A leap-day anchor stepping yearly misses at most seven slots in a row
/// (2096 -> 2104). Anything longer means the calendar ran out of range.
const MAX_CONSECUTIVE_SKIPS: u32 = 8;

/// Returns whether `transaction` applies on `target`.
pub fn occurs_on(transaction: &Transaction, target: NaiveDate) -> bool {
    match transaction.recurrence.interval() {
        None => target == transaction.anchor_date,
        Some(interval) => interval.lands_on(transaction.anchor_date, target),
    }
}

/// All occurrence dates of `transaction` up to and including `target`, in
/// strictly increasing order. Empty when the anchor is after `target`.
pub fn expand(transaction: &Transaction, target: NaiveDate) -> Vec<NaiveDate> {
    occurrences_until(transaction, target).collect()
}

/// Unbounded occurrence stream starting at the anchor date.
pub fn occurrences(transaction: &Transaction) -> Occurrences {
    Occurrences::new(transaction.anchor_date, transaction.recurrence.interval(), None)
}

/// Occurrence stream that stops after the last date `<= limit`.
pub fn occurrences_until(transaction: &Transaction, limit: NaiveDate) -> Occurrences {
    Occurrences::new(
        transaction.anchor_date,
        transaction.recurrence.interval(),
        Some(limit),
    )
}

/// First occurrence on or after `from`, if any.
pub fn next_occurrence(transaction: &Transaction, from: NaiveDate) -> Option<NaiveDate> {
    let anchor = transaction.anchor_date;
    let Some(interval) = transaction.recurrence.interval() else {
        return (anchor >= from).then_some(anchor);
    };
    Occurrences::new(anchor, Some(interval), None)
        .starting_at(interval.floor_index(anchor, from))
        .find(|date| *date >= from)
}

/// Lazily yields occurrence dates in increasing order.
///
/// Each item is computed from the anchor and a slot index, so yielded dates
/// never alias iterator state.
#[derive(Debug, Clone)]
pub struct Occurrences {
    anchor: NaiveDate,
    interval: Option<TimeInterval>,
    index: u32,
    limit: Option<NaiveDate>,
    finished: bool,
}

impl Occurrences {
    pub fn new(anchor: NaiveDate, interval: Option<TimeInterval>, limit: Option<NaiveDate>) -> Self {
        let finished = limit.is_some_and(|limit| anchor > limit);
        Self {
            anchor,
            interval,
            index: 0,
            limit,
            finished,
        }
    }

    /// Skips directly to slot `index`. Only meaningful for recurring streams.
    pub fn starting_at(mut self, index: u32) -> Self {
        if self.interval.is_some() {
            self.index = index;
        }
        self
    }

    fn within_limit(&self, date: NaiveDate) -> bool {
        self.limit.map_or(true, |limit| date <= limit)
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.finished {
            return None;
        }
        let Some(interval) = self.interval else {
            self.finished = true;
            return self.within_limit(self.anchor).then_some(self.anchor);
        };

        let mut skipped = 0;
        loop {
            let index = self.index;
            match self.index.checked_add(1) {
                Some(next) => self.index = next,
                None => self.finished = true,
            }
            match interval.slot(self.anchor, index) {
                Some(date) if self.within_limit(date) => return Some(date),
                Some(_) => {
                    self.finished = true;
                    return None;
                }
                None => {
                    skipped += 1;
                    if skipped >= MAX_CONSECUTIVE_SKIPS || self.finished {
                        self.finished = true;
                        return None;
                    }
                }
            }
        }
    }
}
