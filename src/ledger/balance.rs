use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{recurring::occurrences_until, Ledger, Transaction};

/// Number of times `transaction` has fired on or before `target`.
pub fn occurrence_count(transaction: &Transaction, target: NaiveDate) -> u64 {
    occurrences_until(transaction, target).count() as u64
}

/// Signed total `transaction` has contributed on or before `target`.
///
/// Money arithmetic saturates at `Decimal::MIN`/`Decimal::MAX`, so an
/// oversized amount read from storage cannot abort a query.
pub fn contribution(transaction: &Transaction, target: NaiveDate) -> Decimal {
    transaction
        .amount
        .saturating_mul(Decimal::from(occurrence_count(transaction, target)))
}

/// Starting balance plus every occurrence of every transaction up to and
/// including `target`.
pub fn balance_as_of(ledger: &Ledger, target: NaiveDate) -> Decimal {
    let total = ledger
        .transactions
        .iter()
        .map(|txn| contribution(txn, target))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    tracing::trace!(%target, transactions = ledger.transactions.len(), %total, "balance computed");
    ledger.starting_balance.saturating_add(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Recurrence;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_expense_accumulates_each_occurrence() {
        let mut ledger = Ledger::new(dec!(1000));
        ledger.add_transaction(Transaction::new(
            date(2024, 1, 1),
            "Groceries",
            dec!(-50),
            Recurrence::Weekly,
        )).expect("add");
        assert_eq!(balance_as_of(&ledger, date(2024, 1, 15)), dec!(850));
        assert_eq!(balance_as_of(&ledger, date(2024, 1, 14)), dec!(900));
        assert_eq!(balance_as_of(&ledger, date(2023, 12, 31)), dec!(1000));
    }

    #[test]
    fn anchor_date_includes_exactly_one_occurrence() {
        for recurrence in Recurrence::ALL {
            let txn = Transaction::new(date(2024, 3, 31), "Rent", dec!(-700), recurrence);
            let anchor = txn.anchor_date;
            let mut ledger = Ledger::new(dec!(0));
            ledger.add_transaction(txn).expect("add");
            assert_eq!(balance_as_of(&ledger, anchor), dec!(-700), "{recurrence:?}");
        }
    }

    #[test]
    fn contribution_uses_exact_decimal_arithmetic() {
        let txn = Transaction::new(date(2024, 1, 1), "Coffee", dec!(-0.10), Recurrence::Weekly);
        assert_eq!(occurrence_count(&txn, date(2024, 3, 4)), 10);
        assert_eq!(contribution(&txn, date(2024, 3, 4)), dec!(-1.00));
    }

    #[test]
    fn near_maximum_amounts_saturate_instead_of_overflowing() {
        let huge = Transaction::new(date(2024, 1, 1), "Jackpot", Decimal::MAX, Recurrence::Weekly);
        assert_eq!(occurrence_count(&huge, date(2024, 1, 29)), 5);
        assert_eq!(contribution(&huge, date(2024, 1, 29)), Decimal::MAX);

        let mut ledger = Ledger::new(dec!(1000));
        ledger.add_transaction(huge).expect("add");
        ledger
            .add_transaction(Transaction::new(date(2024, 1, 1), "Debt", Decimal::MIN, Recurrence::Monthly))
            .expect("add");
        assert_eq!(balance_as_of(&ledger, date(2023, 12, 31)), dec!(1000));
        // Two weekly hits saturate at MAX; the monthly MIN then cancels them.
        assert_eq!(balance_as_of(&ledger, date(2024, 1, 8)), dec!(1000));

        let mut rich = Ledger::new(Decimal::MAX);
        rich.add_transaction(Transaction::new(date(2024, 1, 1), "Bonus", dec!(1), Recurrence::Weekly))
            .expect("add");
        assert_eq!(balance_as_of(&rich, date(2024, 6, 1)), Decimal::MAX);
    }

    #[test]
    fn insertion_order_does_not_change_the_result() {
        let a = Transaction::new(date(2024, 1, 31), "Rent", dec!(-100), Recurrence::Monthly);
        let b = Transaction::new(date(2024, 2, 1), "Salary", dec!(2500), Recurrence::Biweekly);
        let c = Transaction::one_time(date(2024, 4, 2), "Refund", dec!(12.34));

        let mut forward = Ledger::new(dec!(250));
        let mut backward = Ledger::new(dec!(250));
        for txn in [&a, &b, &c] {
            forward.add_transaction(txn.clone()).expect("add");
        }
        for txn in [&c, &b, &a] {
            backward.add_transaction(txn.clone()).expect("add");
        }
        let target = date(2024, 12, 31);
        assert_eq!(balance_as_of(&forward, target), balance_as_of(&backward, target));
        assert_eq!(balance_as_of(&forward, target), balance_as_of(&forward, target));
    }
}
