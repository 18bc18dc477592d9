//! Transaction model, recurrence rules, and the balance queries built on them.

pub mod balance;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod query;
pub mod recurring;
pub mod time_interval;
pub mod transaction;
pub mod window;

pub use balance::{balance_as_of, contribution, occurrence_count};
pub use ledger::{Ledger, DEFAULT_STARTING_BALANCE};
pub use query::{
    balance_on, daily_balances, month_view, transactions_on, DayBalance, DayCell, MonthView,
};
pub use recurring::{expand, next_occurrence, occurrences, occurrences_until, occurs_on, Occurrences};
pub use time_interval::{TimeInterval, TimeUnit};
pub use transaction::{check_magnitude, Recurrence, Transaction, TransactionId, MAX_AMOUNT};
pub use window::DateWindow;
