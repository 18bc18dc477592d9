use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    errors::Result,
    ledger::{Transaction, DEFAULT_STARTING_BALANCE},
    utils::paths::{ensure_dir, write_atomic},
};

use super::LedgerStore;

const STARTING_BALANCE_FILE: &str = "starting_balance.json";
const TRANSACTIONS_FILE: &str = "transactions.json";

/// JSON files in one directory: `starting_balance.json` and
/// `transactions.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    default_balance: Decimal,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_default_balance(root, DEFAULT_STARTING_BALANCE)
    }

    pub fn with_default_balance(root: impl Into<PathBuf>, default_balance: Decimal) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self {
            root,
            default_balance,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn starting_balance_path(&self) -> PathBuf {
        self.root.join(STARTING_BALANCE_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.root.join(TRANSACTIONS_FILE)
    }
}

impl LedgerStore for JsonStore {
    fn load_starting_balance(&self) -> Result<Decimal> {
        Ok(read_json(&self.starting_balance_path())?.unwrap_or(self.default_balance))
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions: Vec<Transaction> =
            read_json(&self.transactions_path())?.unwrap_or_default();
        tracing::debug!(count = transactions.len(), root = %self.root.display(), "transactions loaded");
        Ok(transactions)
    }

    fn save_starting_balance(&self, balance: Decimal) -> Result<()> {
        write_json(&self.starting_balance_path(), &balance)?;
        tracing::info!(%balance, "starting balance saved");
        Ok(())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        write_json(&self.transactions_path(), &transactions)?;
        tracing::info!(count = transactions.len(), "transactions saved");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)?;
    Ok(())
}
