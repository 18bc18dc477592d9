//! Form-level input for creating and editing transactions.
//!
//! A draft holds what a user typed: an unsigned amount string plus an
//! expense/income flag. Validation and sign handling happen here so the ledger
//! only ever sees signed, nonzero amounts.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{LedgerError, Result},
    ledger::{check_magnitude, Recurrence, Transaction, TransactionId},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: String,
    pub is_expense: bool,
    pub recurrence: Recurrence,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            date: None,
            description: String::new(),
            amount: String::new(),
            is_expense: true,
            recurrence: Recurrence::None,
        }
    }
}

impl TransactionDraft {
    /// Pre-fills a draft from a stored transaction for editing.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            date: Some(transaction.anchor_date),
            description: transaction.description.clone(),
            amount: transaction.amount.abs().normalize().to_string(),
            is_expense: transaction.is_expense(),
            recurrence: transaction.recurrence,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.checked().map(|_| ())
    }

    /// Builds a new transaction with a fresh id.
    pub fn into_transaction(self) -> Result<Transaction> {
        let (date, amount) = self.checked()?;
        Ok(Transaction::new(
            date,
            self.description.trim(),
            amount,
            self.recurrence,
        ))
    }

    /// Builds the full replacement for the transaction identified by `id`.
    pub fn into_replacement(self, id: TransactionId) -> Result<Transaction> {
        Ok(self.into_transaction()?.with_id(id))
    }

    fn checked(&self) -> Result<(NaiveDate, Decimal)> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::Validation("description is required".into()));
        }
        let date = self
            .date
            .ok_or_else(|| LedgerError::Validation("date is required".into()))?;
        let raw = self.amount.trim();
        if raw.is_empty() {
            return Err(LedgerError::Validation("amount is required".into()));
        }
        let magnitude = Decimal::from_str(raw)
            .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a valid amount")))?;
        if magnitude <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        let magnitude = check_magnitude(magnitude)?;
        let amount = if self.is_expense { -magnitude } else { magnitude };
        Ok((date, amount))
    }
}

/// Parses a signed balance such as a starting balance. Negative values are
/// allowed; the magnitude is bounded like any amount.
pub fn parse_balance(input: &str) -> Result<Decimal> {
    let raw = input.trim();
    let balance = Decimal::from_str(raw)
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a valid amount")))?;
    check_magnitude(balance)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(format!("`{}` is not a YYYY-MM-DD date", input.trim())))
}
