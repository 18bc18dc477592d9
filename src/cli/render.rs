//! Text layout for the month grid and day listings.

use std::fmt::Write;

use chrono::{NaiveDate, Weekday};
use colored::Colorize;
use rust_decimal::Decimal;

use crate::ledger::{DayCell, MonthView, Transaction};

use super::output::{format_amount, money, paint};

const CELL_WIDTH: usize = 11;

/// Month grid: one cell per day holding the day number (starred when
/// something occurs, bracketed on `today`) and the end-of-day balance,
/// followed by an agenda of the days that have transactions.
pub fn render_month(view: &MonthView<'_>, week_start: Weekday, today: NaiveDate) -> String {
    let mut out = String::new();
    let title = NaiveDate::from_ymd_opt(view.year, view.month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_default();
    let border = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(7));
    let _ = writeln!(out, "{title:^width$}", width = border.len());
    let _ = writeln!(out, "{border}");

    let mut header = String::from("|");
    let mut weekday = week_start;
    for _ in 0..7 {
        let _ = write!(header, "{:^CELL_WIDTH$}|", weekday.to_string());
        weekday = weekday.succ();
    }
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{border}");

    let blanks = view.leading_blanks(week_start) as usize;
    let mut cells: Vec<Option<&DayCell<'_>>> = vec![None; blanks];
    cells.extend(view.days.iter().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    for week in cells.chunks(7) {
        let mut days = String::from("|");
        let mut balances = String::from("|");
        for cell in week {
            match cell {
                Some(cell) => {
                    let marker = if cell.transactions.is_empty() { "" } else { "*" };
                    let label = if cell.date == today {
                        format!("[{}]{marker}", cell.day())
                    } else {
                        format!(" {}{marker}", cell.day())
                    };
                    let label = format!("{label:<CELL_WIDTH$}");
                    if cell.date == today {
                        let _ = write!(days, "{}|", label.bold());
                    } else {
                        let _ = write!(days, "{label}|");
                    }
                    let amount = format!("{:>w$} ", format_amount(cell.balance), w = CELL_WIDTH - 1);
                    let _ = write!(balances, "{}|", paint(amount, cell.balance));
                }
                None => {
                    let _ = write!(days, "{:CELL_WIDTH$}|", "");
                    let _ = write!(balances, "{:CELL_WIDTH$}|", "");
                }
            }
        }
        let _ = writeln!(out, "{days}");
        let _ = writeln!(out, "{balances}");
        let _ = writeln!(out, "{border}");
    }

    let _ = writeln!(
        out,
        "Opening {}   Closing {}",
        money(view.opening_balance),
        money(view.closing_balance())
    );
    for cell in view.days.iter().filter(|cell| !cell.transactions.is_empty()) {
        let _ = writeln!(out, "{}", cell.date.format("%a %b %e"));
        for txn in &cell.transactions {
            let _ = writeln!(out, "    {}", transaction_line(txn));
        }
    }
    out
}

/// Transactions on one day followed by the balance at its end.
pub fn render_day(date: NaiveDate, transactions: &[&Transaction], balance: Decimal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", date.format("%A, %B %e, %Y"));
    if transactions.is_empty() {
        let _ = writeln!(out, "    no transactions");
    }
    for txn in transactions {
        let _ = writeln!(out, "    {}", transaction_line(txn));
    }
    let _ = write!(out, "Balance: {}", money(balance));
    out
}

pub fn transaction_line(txn: &Transaction) -> String {
    format!(
        "[{}] {}  {} ({})",
        txn.id.short(),
        txn.description,
        money(txn.amount),
        txn.recurrence.label()
    )
}
