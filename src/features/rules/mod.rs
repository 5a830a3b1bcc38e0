//! Fraud rule administration: the rule list and the create form.

pub mod client;
mod form;
pub mod types;

pub use form::{RuleField, RuleForm, RulesWorkflow};
pub use types::{FraudRule, NewFraudRule, RiskLevel, RuleAction};
