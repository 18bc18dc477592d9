pub mod json_backend;

use std::{collections::HashSet, sync::RwLock};

use rust_decimal::Decimal;

use crate::{
    errors::{LedgerError, Result},
    ledger::{Ledger, Transaction, DEFAULT_STARTING_BALANCE},
};

pub use json_backend::JsonStore;

/// Persistence for the two pieces of ledger state. Saves are full overwrites.
pub trait LedgerStore: Send + Sync {
    /// Stored starting balance, or the store's default when none was saved.
    fn load_starting_balance(&self) -> Result<Decimal>;
    /// Stored transactions, empty when none were saved.
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn save_starting_balance(&self, balance: Decimal) -> Result<()>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;

    fn load_ledger(&self) -> Result<Ledger> {
        let starting_balance = self.load_starting_balance()?;
        let transactions = self.load_transactions()?;
        Ok(Ledger::with_transactions(starting_balance, transactions))
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        self.save_starting_balance(ledger.starting_balance)?;
        self.save_transactions(&ledger.transactions)
    }
}

/// Volatile store backed by process memory.
#[derive(Debug)]
pub struct MemoryStore {
    default_balance: Decimal,
    state: RwLock<(Option<Decimal>, Vec<Transaction>)>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

impl MemoryStore {
    pub fn new(default_balance: Decimal) -> Self {
        Self {
            default_balance,
            state: RwLock::new((None, Vec::new())),
        }
    }

    fn poisoned() -> LedgerError {
        LedgerError::Storage("memory store lock poisoned".into())
    }
}

impl LedgerStore for MemoryStore {
    fn load_starting_balance(&self) -> Result<Decimal> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.0.unwrap_or(self.default_balance))
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.1.clone())
    }

    fn save_starting_balance(&self, balance: Decimal) -> Result<()> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        state.0 = Some(balance);
        Ok(())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        state.1 = transactions.to_vec();
        Ok(())
    }
}

/// Problems in loaded data that do not prevent using the ledger.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for txn in &ledger.transactions {
        if !seen.insert(txn.id) {
            warnings.push(format!("duplicate transaction id {}", txn.id));
        }
        if let Err(err) = txn.validate() {
            warnings.push(err.to_string());
        }
    }
    warnings
}
