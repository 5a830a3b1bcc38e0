//! Client wrappers for the admin overview endpoints.

use super::types::{DashboardStats, UserSummary};
use crate::app_lib::{ApiClient, AppError};

/// Fetches the headline counters for the admin dashboard.
pub async fn dashboard_stats(api: &ApiClient) -> Result<DashboardStats, AppError> {
    api.get_json("/admin/dashboard", "Failed to fetch dashboard stats")
        .await
}

/// Lists every registered user.
pub async fn list_users(api: &ApiClient) -> Result<Vec<UserSummary>, AppError> {
    api.get_json("/admin/users", "Failed to fetch users").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::AppConfig;
    use crate::features::auth::{MemoryCredentialStore, Role, SessionContext};
    use secrecy::SecretString;
    use serde_json::json;
    use std::{net::TcpListener, sync::Arc};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn fetches_dashboard_and_users() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/dashboard"))
            .and(header("authorization", "Bearer admin-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_users": 12,
                "total_transactions": 340,
                "fraud_incidents": 5
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"msg": "Admins only"})))
            .mount(&server)
            .await;

        let session = SessionContext::restore(Arc::new(MemoryCredentialStore::default()));
        session.login(SecretString::from("admin-jwt".to_string()), Role::Admin)?;
        let config = AppConfig::load(Some(server.uri().as_str()), Some("/tmp/unused.json"))?;
        let api = ApiClient::new(&config, session)?;

        let stats = dashboard_stats(&api).await?;
        assert_eq!(stats.fraud_incidents, 5);

        let err = list_users(&api).await.err();
        assert_eq!(err.map(|err| err.message().to_string()), Some("Admins only".to_string()));
        Ok(())
    }
}
