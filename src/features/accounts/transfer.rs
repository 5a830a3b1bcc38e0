//! Transfer form between two of the customer's accounts.
//!
//! Source and destination may be the same account: that case is left to the
//! backend, which owns the rule.

use super::{client, funds::parse_amount, types::TransferRequest};
use crate::app_lib::{Ack, ApiClient, AppError, Notice};
use tracing::{info, warn};

/// Form fields the operator can edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferField {
    Source,
    Destination,
    Amount,
}

#[derive(Debug, Default)]
pub struct TransferForm {
    source_id: String,
    dest_id: String,
    amount: String,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
}

impl TransferForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates one field and clears the previous outcome message.
    pub fn set_field(&mut self, field: TransferField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TransferField::Source => self.source_id = value,
            TransferField::Destination => self.dest_id = value,
            TransferField::Amount => self.amount = value,
        }
        self.error = None;
        self.success = None;
    }

    #[must_use]
    pub fn field(&self, field: TransferField) -> &str {
        match field {
            TransferField::Source => &self.source_id,
            TransferField::Destination => &self.dest_id,
            TransferField::Amount => &self.amount,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Builds the request body from the current fields.
    ///
    /// # Errors
    /// Returns `AppError::Validation` when an account id is blank or not an
    /// integer, or the amount is not a positive number.
    pub fn validate(&self) -> Result<TransferRequest, AppError> {
        let source_id = parse_account_id(&self.source_id)?;
        let dest_id = parse_account_id(&self.dest_id)?;
        let amount = parse_amount(&self.amount)?;
        Ok(TransferRequest {
            source_id,
            dest_id,
            amount,
        })
    }

    /// Validates and locks the form for one request.
    ///
    /// # Errors
    /// Returns a notice when a transfer is already running or the fields are
    /// invalid; nothing is sent in either case.
    pub fn begin_submit(&mut self) -> Result<TransferRequest, Notice> {
        if self.submitting {
            return Err(Notice::info("A transfer is already in progress."));
        }
        let request = self.validate().map_err(|err| {
            self.error = Some(err.message().to_string());
            Notice::error(err.message())
        })?;
        self.submitting = true;
        self.error = None;
        self.success = None;
        Ok(request)
    }

    /// Records the outcome. Success clears the fields; failure keeps them
    /// so the operator can correct and resubmit.
    pub fn finish_submit(
        &mut self,
        request: &TransferRequest,
        result: Result<Ack, AppError>,
    ) -> Notice {
        self.submitting = false;
        match result {
            Ok(_) => {
                let message = format!(
                    "${:.2} transferred from #{} to #{}",
                    request.amount, request.source_id, request.dest_id
                );
                info!(
                    source_id = request.source_id,
                    dest_id = request.dest_id,
                    "transfer completed"
                );
                self.source_id.clear();
                self.dest_id.clear();
                self.amount.clear();
                self.success = Some(message.clone());
                Notice::success(message)
            }
            Err(err) => {
                warn!(error = %err, "transfer failed");
                let message = err.message().to_string();
                self.error = Some(message.clone());
                Notice::error(message)
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Notice {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(notice) => return notice,
        };
        let result = client::transfer(api, &request).await;
        self.finish_submit(&request, result)
    }
}

fn parse_account_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::Validation("Enter numeric source and destination accounts.".to_string())
    })
}
