//! Client wrappers for the fraud rule endpoints.

use super::types::{FraudRule, NewFraudRule};
use crate::app_lib::{ApiClient, AppError};
use serde_json::Value;

pub async fn list_rules(api: &ApiClient) -> Result<Vec<FraudRule>, AppError> {
    api.get_json("/admin/fraud-rules", "Failed to fetch fraud rules")
        .await
}

/// Creates a rule. The server decides precedence conflicts.
pub async fn create_rule(api: &ApiClient, rule: &NewFraudRule) -> Result<Value, AppError> {
    api.post_json("/admin/fraud-rules", rule, "Failed to create rule")
        .await
}
