//! Shared console utilities for API access, configuration, errors, notices
//! and build metadata.
//!
//! ## Request flow
//!
//! 1. **Session:** [`crate::features::auth::SessionContext`] restores the
//!    credential record from the session file on start.
//! 2. **Request:** [`ApiClient`] builds every call against the configured base
//!    URL and attaches `Authorization: Bearer <token>` for non-auth endpoints
//!    when a token is present.
//! 3. **Reconcile:** workflows only mutate their local lists from confirmed
//!    responses and turn failures into [`Notice`] values for the console.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in the feature workflows. Callers must never log token
//! material.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub(crate) mod de;
pub mod errors;
pub mod loadable;
pub mod notice;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::{Ack, ApiClient};
pub use config::AppConfig;
pub use errors::AppError;
pub use loadable::{Lifecycle, Loadable, Ticket};
pub use notice::{Notice, NoticeKind};
