//! Domain-level console features and their shared logic. The CLI imports these
//! modules to keep rendering code thin while session handling, validation and
//! reconciliation stay in dedicated feature areas.

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod fraud_logs;
pub mod rules;
