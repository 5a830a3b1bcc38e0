//! Response types for the admin overview endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub fraud_incidents: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}
