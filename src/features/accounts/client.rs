//! Client wrappers for the customer account endpoints.

use super::types::{Account, AmountRequest, MovementKind, Transaction, TransferRequest};
use crate::app_lib::{Ack, ApiClient, AppError};
use serde_json::Value;

/// Fetches the signed-in customer's accounts.
pub async fn list_accounts(api: &ApiClient) -> Result<Vec<Account>, AppError> {
    api.get_json("/user/accounts", "Failed to fetch your accounts")
        .await
}

/// Opens a new account; the server assigns every field.
pub async fn create_account(api: &ApiClient) -> Result<Value, AppError> {
    api.post_empty("/user/accounts", "Failed to create account")
        .await
}

/// Deposits into or withdraws from one account.
pub async fn move_funds(
    api: &ApiClient,
    account_id: i64,
    kind: MovementKind,
    amount: f64,
) -> Result<Value, AppError> {
    let path = format!("/user/accounts/{account_id}/{}", kind.path_segment());
    api.post_json(&path, &AmountRequest { amount }, kind.failure_message())
        .await
}

pub async fn transfer(api: &ApiClient, request: &TransferRequest) -> Result<Ack, AppError> {
    api.post_json(
        "/user/transfer",
        request,
        "Transfer failed. Please try again.",
    )
    .await
}

/// Fetches the signed-in customer's transaction history.
pub async fn list_transactions(api: &ApiClient) -> Result<Vec<Transaction>, AppError> {
    api.get_json("/user/transactions", "Failed to fetch your transactions")
        .await
}
