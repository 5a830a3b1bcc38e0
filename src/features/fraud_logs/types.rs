//! Request and response types for the fraud log endpoints.

use crate::app_lib::{AppError, de};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A transaction flagged by the rule engine, pending a disposition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FraudAlert {
    pub log_id: i64,
    pub account_id: i64,
    pub transaction_id: i64,
    #[serde(default)]
    pub rule_id: Option<i64>,
    pub detected_rule: String,
    #[serde(deserialize_with = "de::amount")]
    pub amount: f64,
    #[serde(deserialize_with = "de::timestamp")]
    pub transaction_time: DateTime<Utc>,
    pub status: String,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Disposition an operator can request for an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FraudAction {
    Blocked,
    Restricted,
    Limited,
}

impl FraudAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Restricted => "restricted",
            Self::Limited => "limited",
        }
    }

    /// Label shown in selection prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blocked => "Block",
            Self::Restricted => "Restrict",
            Self::Limited => "Limit",
        }
    }
}

impl fmt::Display for FraudAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FraudAction {
    type Err = AppError;

    /// Accepts both the verb (`block`) and the resulting status (`blocked`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" | "blocked" => Ok(Self::Blocked),
            "restrict" | "restricted" => Ok(Self::Restricted),
            "limit" | "limited" => Ok(Self::Limited),
            other => Err(AppError::Validation(format!(
                "Unknown action: {other}. Use block, restrict or limit."
            ))),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FraudActionRequest {
    pub log_id: i64,
    pub account_id: i64,
    pub new_status: FraudAction,
}
