//! Client wrappers for the admin fraud log endpoints.

use super::types::{FraudActionRequest, FraudAlert};
use crate::app_lib::{Ack, ApiClient, AppError};

/// Fetches every fraud alert visible to the administrator.
pub async fn list_fraud_logs(api: &ApiClient) -> Result<Vec<FraudAlert>, AppError> {
    api.get_json("/admin/fraud-logs", "Failed to fetch fraud logs")
        .await
}

/// Requests a status transition for the account behind an alert.
pub async fn update_fraud_action(
    api: &ApiClient,
    request: &FraudActionRequest,
) -> Result<Ack, AppError> {
    api.post_json(
        "/admin/update-fraud-action",
        request,
        "Failed to update fraud action",
    )
    .await
}

/// Marks a single alert resolved through the older per-log endpoint.
pub async fn resolve_fraud(api: &ApiClient, log_id: i64) -> Result<Ack, AppError> {
    let path = format!("/admin/resolve/{log_id}");
    api.post_empty(&path, "Failed to resolve fraud").await
}
