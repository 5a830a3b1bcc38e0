//! Triage state for one fraud log view.
//!
//! The alert list is replaced wholesale on every load and only shrinks on a
//! confirmed server response. Selections and in-flight markers are keyed by
//! `log_id` and share the list's lifetime: a reload invalidates all of them.
//! Each network call is split into `begin_*` and `finish_*` halves so the
//! request runs without borrowing the workflow, and the lifecycle ticket
//! decides whether its completion may still touch state.

use super::{
    client,
    types::{FraudAction, FraudActionRequest, FraudAlert},
};
use crate::app_lib::{ApiClient, AppError, Lifecycle, Loadable, Notice, Ticket};
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};
use tracing::{debug, info, warn};

const SELECT_FIRST: &str = "Please select an action first.";
const APPLIED: &str = "Action applied successfully!";
const APPLY_FAILED: &str = "Failed to apply action.";

/// An apply request that has been validated and locked but not yet answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingApply {
    ticket: Ticket,
    request: FraudActionRequest,
}

impl PendingApply {
    #[must_use]
    pub const fn request(&self) -> &FraudActionRequest {
        &self.request
    }
}

#[derive(Debug, Default)]
pub struct TriageWorkflow {
    alerts: Loadable<Vec<FraudAlert>>,
    selections: HashMap<i64, FraudAction>,
    in_flight: HashSet<i64>,
    lifecycle: Lifecycle,
}

impl TriageWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<FraudAlert>> {
        &self.alerts
    }

    /// Loaded alerts in triage order; empty while loading or after a failure.
    #[must_use]
    pub fn alerts(&self) -> &[FraudAlert] {
        self.alerts.value().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.alerts.error()
    }

    #[must_use]
    pub fn pending_for(&self, log_id: i64) -> Option<FraudAction> {
        self.selections.get(&log_id).copied()
    }

    #[must_use]
    pub fn is_in_flight(&self, log_id: i64) -> bool {
        self.in_flight.contains(&log_id)
    }

    /// Fetches and replaces the alert list.
    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = client::list_fraud_logs(api).await;
        self.finish_load(ticket, result);
    }

    /// Enters the loading state and drops every selection and lock tied to
    /// the previous list.
    pub fn begin_load(&mut self) -> Ticket {
        self.alerts = Loadable::Loading;
        self.selections.clear();
        self.in_flight.clear();
        self.lifecycle.advance()
    }

    /// Stores the fetch result. Returns false when the completion was stale.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<FraudAlert>, AppError>,
    ) -> bool {
        if !self.lifecycle.accepts(ticket) {
            debug!("ignoring stale fraud log load");
            return false;
        }

        self.alerts = match result {
            Ok(mut alerts) => {
                sort_for_triage(&mut alerts);
                info!(count = alerts.len(), "fraud logs loaded");
                Loadable::Loaded(alerts)
            }
            Err(err) => {
                warn!(error = %err, "failed to load fraud logs");
                Loadable::Failed(err)
            }
        };
        true
    }

    /// Records the operator's choice for one row, replacing any earlier one.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if no loaded alert has this `log_id`.
    pub fn select_action(&mut self, log_id: i64, action: FraudAction) -> Result<(), AppError> {
        if self.find(log_id).is_none() {
            return Err(AppError::Validation(format!("No fraud log #{log_id} in the list.")));
        }
        self.selections.insert(log_id, action);
        Ok(())
    }

    /// Validates an apply and locks the row.
    ///
    /// # Errors
    /// Returns an error notice, without locking anything, when the row is
    /// unknown, has no selection, or already has a request in flight.
    pub fn begin_apply(&mut self, log_id: i64) -> Result<PendingApply, Notice> {
        let account_id = self
            .find(log_id)
            .map(|alert| alert.account_id)
            .ok_or_else(|| Notice::error(format!("No fraud log #{log_id} in the list.")))?;
        let new_status = self
            .pending_for(log_id)
            .ok_or_else(|| Notice::error(SELECT_FIRST))?;
        if !self.in_flight.insert(log_id) {
            return Err(Notice::info(format!(
                "An action for fraud log #{log_id} is already in progress."
            )));
        }

        Ok(PendingApply {
            ticket: self.lifecycle.current(),
            request: FraudActionRequest {
                log_id,
                account_id,
                new_status,
            },
        })
    }

    /// Reconciles the list with the server's answer. On success every alert
    /// on the account leaves the list together with its selection; on
    /// failure the list and the selection stay as they were.
    pub fn finish_apply<T>(
        &mut self,
        pending: PendingApply,
        result: Result<T, AppError>,
    ) -> Notice {
        let PendingApply { ticket, request } = pending;
        let accepted = self.lifecycle.accepts(ticket);
        if accepted {
            self.in_flight.remove(&request.log_id);
        }

        match result {
            Ok(_) if accepted => {
                self.remove_account(request.account_id);
                info!(
                    log_id = request.log_id,
                    account_id = request.account_id,
                    status = %request.new_status,
                    "fraud action applied"
                );
                Notice::success(APPLIED)
            }
            Ok(_) => {
                debug!(log_id = request.log_id, "fraud action applied after reload");
                Notice::info(format!("{APPLIED} Reload to see the current list."))
            }
            Err(err) => {
                warn!(log_id = request.log_id, error = %err, "fraud action failed");
                Notice::error(format!("{APPLY_FAILED} {}", err.message()))
            }
        }
    }

    /// Submits the selected action for `log_id`. Failures are returned as
    /// notices and never propagated.
    pub async fn apply(&mut self, api: &ApiClient, log_id: i64) -> Notice {
        let pending = match self.begin_apply(log_id) {
            Ok(pending) => pending,
            Err(notice) => return notice,
        };
        let result = client::update_fraud_action(api, pending.request()).await;
        self.finish_apply(pending, result)
    }

    /// Stops every outstanding completion from touching this workflow.
    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
        self.in_flight.clear();
    }

    fn find(&self, log_id: i64) -> Option<&FraudAlert> {
        self.alerts().iter().find(|alert| alert.log_id == log_id)
    }

    fn remove_account(&mut self, account_id: i64) {
        let Some(alerts) = self.alerts.value_mut() else {
            return;
        };
        let selections = &mut self.selections;
        let in_flight = &mut self.in_flight;
        alerts.retain(|alert| {
            let keep = alert.account_id != account_id;
            if !keep {
                selections.remove(&alert.log_id);
                in_flight.remove(&alert.log_id);
            }
            keep
        });
    }
}

/// Account ascending, newest transaction first within an account. The sort
/// is stable so equal keys keep the server's order.
pub fn sort_for_triage(alerts: &mut [FraudAlert]) {
    alerts.sort_by(|left, right| match left.account_id.cmp(&right.account_id) {
        Ordering::Equal => right.transaction_time.cmp(&left.transaction_time),
        ordering => ordering,
    });
}
