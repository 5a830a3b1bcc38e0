//! Fraud alert triage: the alert list, per-row action selections and the
//! apply cycle that closes out every alert on an account.

pub mod client;
mod triage;
pub mod types;

pub use triage::{PendingApply, TriageWorkflow};
pub use types::{FraudAction, FraudActionRequest, FraudAlert};
