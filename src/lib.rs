//! Operator console for a fraud-detection banking backend.
//!
//! Administrators triage fraud alerts and manage fraud rules; customers move
//! funds between their accounts. The backend owns every balance, status and
//! rule decision. This crate only consumes its JSON API, keeps a signed-in
//! session on disk, and reconciles local views from confirmed responses.
//!
//! Layout:
//! - [`app_lib`]: HTTP client, configuration, errors and shared view state.
//! - [`features`]: auth/session, fraud triage, accounts, rules, admin views.
//! - [`routes`]: the navigation table gated by the auth guard.
//! - [`cli`]: the `fraudesk` command-line front end.

pub mod app_lib;
pub mod cli;
pub mod features;
pub mod routes;

pub use app_lib::{ApiClient, AppConfig, AppError, Notice, NoticeKind};
pub use features::auth::{Role, Session, SessionContext};
