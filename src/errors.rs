use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for ledger mutation, entry validation, and persistence failures.
///
/// Query functions over a [`Ledger`](crate::ledger::Ledger) are total and never
/// produce one of these; errors only arise at the boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    NotFound(String),
    #[error("Ambiguous transaction id: {0}")]
    Ambiguous(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serde(err.to_string())
    }
}
