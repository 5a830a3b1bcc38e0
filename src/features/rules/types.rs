//! Request and response types for the fraud rule endpoints.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FraudRule {
    pub rule_id: i64,
    pub rule_name: String,
    #[serde(default)]
    pub rule_description: Option<String>,
    pub action: String,
    pub risk_level: String,
    pub precedence: i64,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// What the rule engine does to an account when a rule fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Block,
    Restrict,
    Limit,
}

impl RuleAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Restrict => "restrict",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RuleAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "restrict" => Ok(Self::Restrict),
            "limit" => Ok(Self::Limit),
            _ => Err(AppError::Validation(
                "Action must be block, restrict or limit.".to_string(),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(AppError::Validation(
                "Risk level must be high, medium or low.".to_string(),
            )),
        }
    }
}

/// Body of `POST /admin/fraud-rules`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NewFraudRule {
    pub rule_name: String,
    pub rule_description: String,
    pub action: RuleAction,
    pub risk_level: RiskLevel,
    pub precedence: u32,
}
