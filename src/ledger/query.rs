//! Read-only queries consumed by calendar rendering.
//!
//! [`transactions_on`] and [`balance_on`] answer a single day. [`daily_balances`]
//! and [`month_view`] answer a whole range in one chronological pass: each
//! transaction's occurrences are walked once, contributions before the range
//! fold into the opening balance and the rest are bucketed per day, then a
//! running total crosses the range. That costs O(occurrences + days) instead of
//! recomputing from the starting balance for every cell.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{
    balance::balance_as_of,
    recurring::{occurrences_until, occurs_on},
    window::DateWindow,
    Ledger, Transaction,
};
use crate::errors::LedgerError;

/// Transactions that apply on `date`, one-time entries first, then by
/// description and id.
pub fn transactions_on(ledger: &Ledger, date: NaiveDate) -> Vec<&Transaction> {
    let mut matches: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|txn| occurs_on(txn, date))
        .collect();
    matches.sort_by(|a, b| display_order(a, b));
    matches
}

/// Running balance at the end of `date`.
pub fn balance_on(ledger: &Ledger, date: NaiveDate) -> Decimal {
    balance_as_of(ledger, date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBalance {
    pub date: NaiveDate,
    /// Sum of the amounts that occur on this day.
    pub net_change: Decimal,
    /// Balance at the end of this day.
    pub balance: Decimal,
}

/// Balance at the end of every day in `window`, computed in one sweep.
pub fn daily_balances(ledger: &Ledger, window: DateWindow) -> Vec<DayBalance> {
    let sweep = Sweep::run(ledger, window, false);
    sweep.into_balances(window).collect()
}

/// One rendered calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub net_change: Decimal,
    pub balance: Decimal,
    pub transactions: Vec<&'a Transaction>,
}

impl DayCell<'_> {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Everything a month grid needs, one cell per day of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub opening_balance: Decimal,
    pub days: Vec<DayCell<'a>>,
}

impl MonthView<'_> {
    pub fn days_in_month(&self) -> usize {
        self.days.len()
    }

    /// Days between Sunday and the first of the month.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_weekday.num_days_from_sunday()
    }

    /// Number of empty cells before day 1 for a week starting on `week_start`.
    pub fn leading_blanks(&self, week_start: Weekday) -> u32 {
        (self.first_weekday.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
    }

    pub fn closing_balance(&self) -> Decimal {
        self.days
            .last()
            .map(|cell| cell.balance)
            .unwrap_or(self.opening_balance)
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell<'_>> {
        let index = usize::try_from(day.checked_sub(1)?).ok()?;
        self.days.get(index)
    }
}

/// Builds the calendar data for `month` of `year`.
pub fn month_view(ledger: &Ledger, year: i32, month: u32) -> Result<MonthView<'_>, LedgerError> {
    let window = DateWindow::month(year, month)?;
    let mut sweep = Sweep::run(ledger, window, true);
    let opening_balance = sweep.opening;
    let mut members = std::mem::take(&mut sweep.members);
    let days = sweep
        .into_balances(window)
        .zip(members.iter_mut())
        .map(|(day, members)| {
            members.sort_by(|a, b| display_order(a, b));
            DayCell {
                date: day.date,
                net_change: day.net_change,
                balance: day.balance,
                transactions: std::mem::take(members),
            }
        })
        .collect();
    tracing::debug!(year, month, transactions = ledger.transactions.len(), "month view built");
    Ok(MonthView {
        year,
        month,
        first_weekday: window.start.weekday(),
        opening_balance,
        days,
    })
}

struct Sweep<'a> {
    opening: Decimal,
    deltas: Vec<Decimal>,
    members: Vec<Vec<&'a Transaction>>,
}

impl<'a> Sweep<'a> {
    fn run(ledger: &'a Ledger, window: DateWindow, collect_members: bool) -> Self {
        let days = window.len_days();
        let mut sweep = Sweep {
            opening: ledger.starting_balance,
            deltas: vec![Decimal::ZERO; days],
            members: if collect_members {
                vec![Vec::new(); days]
            } else {
                Vec::new()
            },
        };
        let last_day = window.last_day();
        for txn in &ledger.transactions {
            for date in occurrences_until(txn, last_day) {
                match window.offset_of(date) {
                    Some(offset) => {
                        sweep.deltas[offset] = sweep.deltas[offset].saturating_add(txn.amount);
                        if collect_members {
                            sweep.members[offset].push(txn);
                        }
                    }
                    None => sweep.opening = sweep.opening.saturating_add(txn.amount),
                }
            }
        }
        sweep
    }

    fn into_balances(self, window: DateWindow) -> impl Iterator<Item = DayBalance> {
        let mut running = self.opening;
        window
            .days()
            .collect::<Vec<_>>()
            .into_iter()
            .zip(self.deltas)
            .map(move |(date, net_change)| {
                running = running.saturating_add(net_change);
                DayBalance {
                    date,
                    net_change,
                    balance: running,
                }
            })
    }
}

fn display_order(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    a.is_recurring()
        .cmp(&b.is_recurring())
        .then_with(|| a.description.cmp(&b.description))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Recurrence;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn busy_ledger() -> Ledger {
        let mut ledger = Ledger::new(dec!(1000));
        ledger.add_transaction(Transaction::new(date(2024, 1, 1), "Groceries", dec!(-50), Recurrence::Weekly)).expect("add");
        ledger.add_transaction(Transaction::new(date(2024, 1, 31), "Rent", dec!(-100), Recurrence::Monthly)).expect("add");
        ledger.add_transaction(Transaction::new(date(2024, 1, 1), "Bonus", dec!(2000), Recurrence::Annually)).expect("add");
        ledger.add_transaction(Transaction::new(date(2024, 2, 1), "Insurance", dec!(-300), Recurrence::Quarterly)).expect("add");
        ledger.add_transaction(Transaction::new(date(2024, 1, 12), "Salary", dec!(1500), Recurrence::Biweekly)).expect("add");
        ledger.add_transaction(Transaction::one_time(date(2024, 6, 15), "Refund", dec!(500))).expect("add");
        ledger
    }

    #[test]
    fn sweep_matches_per_day_balances() {
        let ledger = busy_ledger();
        let window = DateWindow::new(date(2023, 12, 20), date(2024, 8, 10)).unwrap();
        let balances = daily_balances(&ledger, window);
        assert_eq!(balances.len(), window.len_days());
        for day in balances {
            assert_eq!(day.balance, balance_on(&ledger, day.date), "on {}", day.date);
        }
    }

    #[test]
    fn month_view_cells_agree_with_point_queries() {
        let ledger = busy_ledger();
        let view = month_view(&ledger, 2024, 3).unwrap();
        assert_eq!(view.days_in_month(), 31);
        assert_eq!(view.first_weekday, Weekday::Fri);
        for cell in &view.days {
            assert_eq!(cell.transactions, transactions_on(&ledger, cell.date));
            assert_eq!(cell.balance, balance_on(&ledger, cell.date));
        }
        assert_eq!(view.opening_balance, balance_on(&ledger, date(2024, 2, 29)));
        assert_eq!(view.closing_balance(), balance_on(&ledger, date(2024, 3, 31)));
    }

    #[test]
    fn rent_on_the_31st_is_absent_in_february_and_present_in_march() {
        let ledger = busy_ledger();
        let february = month_view(&ledger, 2024, 2).unwrap();
        let leap_day = february.cell(29).expect("leap day");
        assert!(leap_day.transactions.iter().all(|txn| txn.description != "Rent"));
        let march = month_view(&ledger, 2024, 3).unwrap();
        let last = march.cell(31).expect("31st");
        assert!(last.transactions.iter().any(|txn| txn.description == "Rent"));
    }

    #[test]
    fn one_time_refund_adds_on_top_of_weekly_spend() {
        let ledger = busy_ledger();
        let before = balance_on(&ledger, date(2024, 6, 14));
        let on = balance_on(&ledger, date(2024, 6, 15));
        let weekly_today: Decimal = transactions_on(&ledger, date(2024, 6, 15))
            .iter()
            .filter(|txn| txn.description != "Refund")
            .map(|txn| txn.amount)
            .sum();
        assert_eq!(on, before + dec!(500) + weekly_today);
    }

    #[test]
    fn oversized_weekly_income_renders_a_saturated_month() {
        let mut ledger = Ledger::new(dec!(1000));
        let huge = Decimal::from_str_exact("79228162514264337593543950335").unwrap();
        ledger
            .add_transaction(Transaction::new(date(2024, 1, 1), "Jackpot", huge, Recurrence::Weekly))
            .expect("add");
        assert_eq!(balance_on(&ledger, date(2024, 1, 8)), Decimal::MAX);
        let view = month_view(&ledger, 2024, 1).unwrap();
        assert_eq!(view.opening_balance, dec!(1000));
        assert_eq!(view.cell(1).unwrap().balance, Decimal::MAX);
        assert_eq!(view.closing_balance(), Decimal::MAX);
        let february = month_view(&ledger, 2024, 2).unwrap();
        assert_eq!(february.opening_balance, Decimal::MAX);
        let days = daily_balances(&ledger, DateWindow::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap());
        assert!(days.iter().all(|day| day.balance == Decimal::MAX));
    }

    #[test]
    fn transactions_on_lists_one_time_entries_first() {
        let mut ledger = Ledger::default();
        ledger.add_transaction(Transaction::new(date(2024, 6, 1), "Allowance", dec!(10), Recurrence::Weekly)).expect("add");
        ledger.add_transaction(Transaction::one_time(date(2024, 6, 15), "Zoo", dec!(-30))).expect("add");
        let listed: Vec<_> = transactions_on(&ledger, date(2024, 6, 15))
            .into_iter()
            .map(|txn| txn.description.as_str())
            .collect();
        assert_eq!(listed, vec!["Zoo", "Allowance"]);
    }

    #[test]
    fn leading_blanks_follow_the_week_start() {
        let ledger = Ledger::default();
        // June 2024 starts on a Saturday.
        let view = month_view(&ledger, 2024, 6).unwrap();
        assert_eq!(view.first_weekday_offset(), 6);
        assert_eq!(view.leading_blanks(Weekday::Sun), 6);
        assert_eq!(view.leading_blanks(Weekday::Mon), 5);
        assert!(month_view(&ledger, 2024, 0).is_err());
    }
}
