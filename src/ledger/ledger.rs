use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionId};
use crate::errors::LedgerError;

/// Balance assumed when nothing has been stored yet.
pub const DEFAULT_STARTING_BALANCE: Decimal = Decimal::ONE_THOUSAND;

/// Snapshot of the starting balance and the transaction set it applies to.
///
/// Transaction order carries no meaning; every query result is independent of
/// it. [`Ledger::add_transaction`] keeps ids unique; snapshots read from
/// storage are checked by `storage::ledger_warnings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    pub starting_balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

impl Ledger {
    pub fn new(starting_balance: Decimal) -> Self {
        Self {
            starting_balance,
            transactions: Vec::new(),
        }
    }

    pub fn with_transactions(starting_balance: Decimal, transactions: Vec<Transaction>) -> Self {
        Self {
            starting_balance,
            transactions,
        }
    }

    /// Appends `transaction`. Fails when its id is already stored.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<TransactionId, LedgerError> {
        let id = transaction.id;
        if self.transaction(id).is_some() {
            return Err(LedgerError::Validation(format!(
                "transaction {id} already exists"
            )));
        }
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Swaps in `transaction` for the stored entry with the same id and
    /// returns the previous value.
    pub fn replace_transaction(&mut self, transaction: Transaction) -> Result<Transaction, LedgerError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
            .ok_or_else(|| LedgerError::NotFound(transaction.id.to_string()))?;
        Ok(std::mem::replace(slot, transaction))
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        Ok(self.transactions.remove(index))
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Resolves a transaction by a case-insensitive prefix of its id (dashes
    /// ignored). The prefix must match exactly one transaction.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Transaction, LedgerError> {
        let needle: String = prefix
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if needle.is_empty() {
            return Err(LedgerError::NotFound(prefix.to_string()));
        }
        let mut matches = self
            .transactions
            .iter()
            .filter(|txn| txn.id.as_uuid().simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(LedgerError::Ambiguous(prefix.to_string())),
            (None, _) => Err(LedgerError::NotFound(prefix.to_string())),
        }
    }

    pub fn set_starting_balance(&mut self, balance: Decimal) {
        self.starting_balance = balance;
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
