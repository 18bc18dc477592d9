#![allow(dead_code)]

use chrono::NaiveDate;
use fincal_core::ledger::{Ledger, Recurrence, Transaction};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn recurring(anchor: NaiveDate, description: &str, amount: Decimal, recurrence: Recurrence) -> Transaction {
    Transaction::new(anchor, description, amount, recurrence)
}

/// Ledger with every recurrence kind and a month-end anchor.
pub fn household(starting: Decimal) -> Ledger {
    use rust_decimal_macros::dec;
    let mut ledger = Ledger::new(starting);
    ledger.add_transaction(recurring(date(2024, 1, 1), "Groceries", dec!(-50), Recurrence::Weekly)).expect("add");
    ledger.add_transaction(recurring(date(2024, 1, 5), "Salary", dec!(1800), Recurrence::Biweekly)).expect("add");
    ledger.add_transaction(recurring(date(2024, 1, 31), "Rent", dec!(-100), Recurrence::Monthly)).expect("add");
    ledger.add_transaction(recurring(date(2024, 2, 1), "Insurance", dec!(-300), Recurrence::Quarterly)).expect("add");
    ledger.add_transaction(recurring(date(2024, 1, 1), "Bonus", dec!(2000), Recurrence::Annually)).expect("add");
    ledger.add_transaction(Transaction::one_time(date(2024, 6, 15), "Refund", dec!(500))).expect("add");
    ledger
}
