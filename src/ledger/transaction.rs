use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_interval::{TimeInterval, TimeUnit};
use crate::errors::LedgerError;

/// Largest accepted magnitude for an amount or balance: 10^15.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Rejects amounts whose magnitude exceeds [`MAX_AMOUNT`].
pub fn check_magnitude(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.abs() > MAX_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "amount {amount} exceeds the limit of {MAX_AMOUNT}"
        )));
    }
    Ok(amount)
}

/// Stable identity of a transaction. Assigned once at creation and carried
/// through every edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// First block of the UUID, used as a short handle in listings.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TransactionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A one-time or repeating cash movement.
///
/// `amount` is signed: negative values are expenses, positive values income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub anchor_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl Transaction {
    pub fn new(
        anchor_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            anchor_date,
            description: description.into(),
            amount,
            recurrence,
        }
    }

    pub fn one_time(anchor_date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(anchor_date, description, amount, Recurrence::None)
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Checks the invariants the query engine relies on.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount.is_zero() {
            return Err(LedgerError::Validation(format!(
                "transaction {} has a zero amount",
                self.id
            )));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::Validation(format!(
                "transaction {} has an empty description",
                self.id
            )));
        }
        check_magnitude(self.amount)?;
        Ok(())
    }
}

/// Repetition rule applied from a transaction's anchor date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Recurrence {
    pub const ALL: [Recurrence; 6] = [
        Recurrence::None,
        Recurrence::Weekly,
        Recurrence::Biweekly,
        Recurrence::Monthly,
        Recurrence::Quarterly,
        Recurrence::Annually,
    ];

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Step between consecutive occurrence slots, or `None` for one-time
    /// transactions.
    pub fn interval(&self) -> Option<TimeInterval> {
        match self {
            Recurrence::None => None,
            Recurrence::Weekly => Some(TimeInterval::new(1, TimeUnit::Week)),
            Recurrence::Biweekly => Some(TimeInterval::new(2, TimeUnit::Week)),
            Recurrence::Monthly => Some(TimeInterval::new(1, TimeUnit::Month)),
            Recurrence::Quarterly => Some(TimeInterval::new(3, TimeUnit::Month)),
            Recurrence::Annually => Some(TimeInterval::new(1, TimeUnit::Year)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Biweekly => "biweekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Quarterly => "quarterly",
            Recurrence::Annually => "annually",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::None => "One-time",
            Recurrence::Weekly => "Weekly",
            Recurrence::Biweekly => "Biweekly",
            Recurrence::Monthly => "Monthly",
            Recurrence::Quarterly => "Quarterly",
            Recurrence::Annually => "Annually",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Recurrence {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "one-time" | "onetime" | "once" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "biweekly" | "fortnightly" => Ok(Recurrence::Biweekly),
            "monthly" => Ok(Recurrence::Monthly),
            "quarterly" => Ok(Recurrence::Quarterly),
            "annually" | "yearly" => Ok(Recurrence::Annually),
            other => Err(LedgerError::Validation(format!(
                "unknown recurrence `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn recurrence_serializes_in_lowercase() {
        let json = serde_json::to_string(&Recurrence::Biweekly).unwrap();
        assert_eq!(json, "\"biweekly\"");
        let parsed: Recurrence = serde_json::from_str("\"annually\"").unwrap();
        assert_eq!(parsed, Recurrence::Annually);
    }

    #[test]
    fn unknown_recurrence_fails_to_deserialize() {
        assert!(serde_json::from_str::<Recurrence>("\"daily\"").is_err());
    }

    #[test]
    fn recurring_kinds_step_in_weeks_months_or_years() {
        use TimeUnit::{Month, Week, Year};
        let steps: Vec<_> = Recurrence::ALL
            .iter()
            .filter_map(|kind| kind.interval())
            .map(|interval| (interval.every, interval.unit))
            .collect();
        assert_eq!(steps, vec![(1, Week), (2, Week), (1, Month), (3, Month), (1, Year)]);
        assert_eq!(Recurrence::None.interval(), None);
    }

    #[test]
    fn recurrence_parses_aliases() {
        assert_eq!("One-Time".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert_eq!("yearly".parse::<Recurrence>().unwrap(), Recurrence::Annually);
        assert!("hourly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let txn = Transaction::one_time(date, "Nothing", dec!(0));
        assert!(matches!(txn.validate(), Err(LedgerError::Validation(_))));
        let txn = Transaction::one_time(date, "Coffee", dec!(-4.50));
        assert!(txn.validate().is_ok());
        assert!(txn.is_expense());
    }

    #[test]
    fn amount_limit_is_ten_to_the_fifteenth() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
        assert!(check_magnitude(dec!(-1000000000000000)).is_ok());
        assert!(matches!(
            check_magnitude(dec!(1000000000000000.01)),
            Err(LedgerError::Validation(_))
        ));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let huge = Transaction::one_time(date, "Lottery", Decimal::MAX);
        assert!(matches!(huge.validate(), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn missing_recurrence_defaults_to_one_time() {
        let json = r#"{
            "id": "5f1d7c1e-8a4b-4c1e-9a57-2f8e0c3b7d10",
            "anchor_date": "2024-03-05",
            "description": "Gift",
            "amount": "25"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.recurrence, Recurrence::None);
        assert_eq!(txn.amount, dec!(25));
    }
}
