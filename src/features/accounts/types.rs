//! Request and response types for the customer account endpoints.

use crate::app_lib::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Account {
    pub account_id: i64,
    #[serde(deserialize_with = "de::text")]
    pub account_number: String,
    #[serde(deserialize_with = "de::amount")]
    pub balance: f64,
    #[serde(default)]
    pub account_status: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Status as shown to the customer; anything the rule engine has not
    /// restricted reads as active.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match self.account_status.as_deref() {
            Some("blocked") => "Blocked",
            Some("restricted") => "Restricted",
            Some("limited") => "Limited",
            _ => "Active",
        }
    }

    #[must_use]
    pub fn risk_label(&self) -> &'static str {
        match self.risk_level.as_deref() {
            Some("high") => "High Risk",
            Some("medium") => "Medium Risk",
            Some("low") => "Low Risk",
            _ => "-",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: i64,
    pub account_id: i64,
    pub transaction_type: String,
    #[serde(deserialize_with = "de::amount")]
    pub amount: f64,
    #[serde(deserialize_with = "de::timestamp")]
    pub transaction_time: DateTime<Utc>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Which balance movement a dialog submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementKind {
    Deposit,
    Withdraw,
}

impl MovementKind {
    /// Trailing path segment of `/user/accounts/{id}/...`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit failed",
            Self::Withdraw => "Withdrawal failed",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.path_segment())
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct AmountRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TransferRequest {
    pub source_id: i64,
    pub dest_id: i64,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_decodes_decimal_strings() -> anyhow::Result<()> {
        let account: Account = serde_json::from_value(json!({
            "account_id": 3,
            "account_number": 100_200,
            "balance": "250.75",
            "account_status": "restricted",
            "risk_level": "high",
            "created_at": "Mon, 01 Jan 2024 08:00:00 GMT"
        }))?;

        assert_eq!(account.account_number, "100200");
        assert_eq!(account.balance, 250.75);
        assert_eq!(account.status_label(), "Restricted");
        assert_eq!(account.risk_label(), "High Risk");
        assert!(account.created_at.is_some());
        Ok(())
    }

    #[test]
    fn missing_status_reads_active() -> anyhow::Result<()> {
        let account: Account = serde_json::from_value(json!({
            "account_id": 4,
            "account_number": "ACC-4",
            "balance": 0
        }))?;
        assert_eq!(account.status_label(), "Active");
        assert_eq!(account.risk_label(), "-");
        Ok(())
    }

    #[test]
    fn transaction_details_are_optional() -> anyhow::Result<()> {
        let transaction: Transaction = serde_json::from_value(json!({
            "transaction_id": 9,
            "account_id": 3,
            "transaction_type": "withdrawal",
            "amount": "12.50",
            "transaction_time": "2024-01-02 10:30:00"
        }))?;
        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.details, None);
        Ok(())
    }
}
