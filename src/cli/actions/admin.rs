//! Administrator overview views.

use super::request_error;
use crate::{
    app_lib::{ApiClient, Loadable},
    cli::output::{OutputFormat, render_rows, render_single},
    features::admin::{DashboardStats, UserSummary, client},
};
use anyhow::Result;
use tabled::Tabled;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Total Users")]
    total_users: u64,
    #[tabled(rename = "Total Transactions")]
    total_transactions: u64,
    #[tabled(rename = "Fraud Incidents")]
    fraud_incidents: u64,
}

impl From<&DashboardStats> for StatsRow {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_transactions: stats.total_transactions,
            fraud_incidents: stats.fraud_incidents,
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&UserSummary> for UserRow {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.user_id,
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            role: user.role.clone(),
        }
    }
}

/// # Errors
/// Returns the request failure.
pub async fn dashboard(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let state = Loadable::from_result(client::dashboard_stats(api).await);
    if let Some(err) = state.failure() {
        return Err(request_error(err));
    }
    if let Some(stats) = state.value() {
        println!("{}", render_single(StatsRow::from(stats), stats, format)?);
    }
    Ok(())
}

/// # Errors
/// Returns the request failure.
pub async fn users(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let state = Loadable::from_result(client::list_users(api).await);
    if let Some(err) = state.failure() {
        return Err(request_error(err));
    }
    let users = state.value().map_or(&[][..], Vec::as_slice);
    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    println!("{}", render_rows(rows, users, format, "No users found.")?);
    Ok(())
}
