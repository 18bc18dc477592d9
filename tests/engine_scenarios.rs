mod common;

use common::{date, household, recurring};
use fincal_core::ledger::{
    balance_on, daily_balances, expand, month_view, occurs_on, transactions_on, DateWindow,
    Ledger, Recurrence, Transaction,
};
use rust_decimal_macros::dec;

#[test]
fn weekly_expense_reduces_balance_each_week() {
    let mut ledger = Ledger::new(dec!(1000));
    ledger.add_transaction(recurring(date(2024, 1, 1), "Groceries", dec!(-50), Recurrence::Weekly)).expect("add");
    assert_eq!(balance_on(&ledger, date(2024, 1, 15)), dec!(850));
}

#[test]
fn monthly_on_the_31st_skips_february() {
    let rent = recurring(date(2024, 1, 31), "Rent", dec!(-100), Recurrence::Monthly);
    assert!(!occurs_on(&rent, date(2024, 2, 29)));
    assert!(occurs_on(&rent, date(2024, 3, 31)));
}

#[test]
fn annual_income_counts_from_its_anchor() {
    let mut ledger = Ledger::new(dec!(1000));
    ledger.add_transaction(recurring(date(2024, 1, 1), "Bonus", dec!(2000), Recurrence::Annually)).expect("add");
    assert_eq!(balance_on(&ledger, date(2024, 1, 1)), dec!(3000));
    assert_eq!(balance_on(&ledger, date(2023, 12, 31)), dec!(1000));
    assert_eq!(balance_on(&ledger, date(2025, 1, 1)), dec!(5000));
}

#[test]
fn quarterly_from_february_lands_four_times_in_2024() {
    let insurance = recurring(date(2024, 2, 1), "Insurance", dec!(-300), Recurrence::Quarterly);
    assert_eq!(
        expand(&insurance, date(2024, 12, 31)),
        vec![date(2024, 2, 1), date(2024, 5, 1), date(2024, 8, 1), date(2024, 11, 1)]
    );
}

#[test]
fn one_time_income_stacks_with_weekly_spend() {
    let mut ledger = Ledger::new(dec!(1000));
    // 2024-06-15 is a Saturday, so a Saturday-anchored weekly also lands on it.
    ledger.add_transaction(recurring(date(2024, 1, 6), "Market", dec!(-20), Recurrence::Weekly)).expect("add");
    ledger.add_transaction(Transaction::one_time(date(2024, 6, 15), "Refund", dec!(500))).expect("add");
    let before = balance_on(&ledger, date(2024, 6, 14));
    let after = balance_on(&ledger, date(2024, 6, 15));
    assert_eq!(after, before + dec!(500) - dec!(20));
    assert_eq!(transactions_on(&ledger, date(2024, 6, 15)).len(), 2);
}

#[test]
fn sweep_agrees_with_point_queries_across_a_year() {
    let ledger = household(dec!(250));
    let window = DateWindow::new(date(2023, 11, 1), date(2025, 3, 1)).expect("window");
    for day in daily_balances(&ledger, window) {
        assert_eq!(day.balance, balance_on(&ledger, day.date), "balance on {}", day.date);
        let expected: rust_decimal::Decimal = transactions_on(&ledger, day.date)
            .iter()
            .map(|txn| txn.amount)
            .sum();
        assert_eq!(day.net_change, expected, "net change on {}", day.date);
    }
}

#[test]
fn every_month_view_matches_point_queries() {
    let ledger = household(dec!(0));
    for month in 1..=12 {
        let view = month_view(&ledger, 2024, month).expect("valid month");
        for cell in &view.days {
            assert_eq!(cell.transactions, transactions_on(&ledger, cell.date));
            assert_eq!(cell.balance, balance_on(&ledger, cell.date));
        }
    }
}

#[test]
fn queries_are_deterministic_and_order_independent() {
    let ledger = household(dec!(100));
    let mut reversed = ledger.clone();
    reversed.transactions.reverse();
    let target = date(2026, 7, 4);
    assert_eq!(balance_on(&ledger, target), balance_on(&ledger, target));
    assert_eq!(balance_on(&ledger, target), balance_on(&reversed, target));
    assert_eq!(
        transactions_on(&ledger, date(2024, 3, 1)),
        transactions_on(&reversed, date(2024, 3, 1))
    );
}
