//! Read-only administrator views: dashboard totals and the user directory.

pub mod client;
pub mod types;

pub use types::{DashboardStats, UserSummary};
