//! Account list with the deposit and withdraw dialog.
//!
//! Balances are never adjusted locally: every successful mutation is
//! followed by a reload so the view shows what the server decided.

use super::{
    client,
    types::{Account, MovementKind},
};
use crate::app_lib::{ApiClient, AppError, Lifecycle, Loadable, Notice, Ticket};
use tracing::{debug, info, warn};

const INVALID_AMOUNT: &str = "Enter a valid amount";

/// Parses operator input into a finite amount strictly above zero.
///
/// # Errors
/// Returns `AppError::Validation` for anything else, including `"0"`,
/// negative values and non-numeric text.
pub fn parse_amount(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or_else(|| AppError::Validation(INVALID_AMOUNT.to_string()))
}

/// An open deposit or withdraw edit scoped to one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountDialog {
    pub account_id: i64,
    pub kind: MovementKind,
    pub amount: String,
}

#[derive(Debug, Default)]
pub struct FundsWorkflow {
    accounts: Loadable<Vec<Account>>,
    dialog: Option<AmountDialog>,
    lifecycle: Lifecycle,
}

impl FundsWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &Loadable<Vec<Account>> {
        &self.accounts
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        self.accounts.value().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.accounts.error()
    }

    #[must_use]
    pub const fn dialog(&self) -> Option<&AmountDialog> {
        self.dialog.as_ref()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = client::list_accounts(api).await;
        self.finish_load(ticket, result);
    }

    /// Same as `load`; kept as the name views call after a mutation.
    pub async fn refresh(&mut self, api: &ApiClient) {
        self.load(api).await;
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.accounts = Loadable::Loading;
        self.lifecycle.advance()
    }

    /// Stores the fetch result. Returns false when the completion was stale.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Account>, AppError>) -> bool {
        if !self.lifecycle.accepts(ticket) {
            debug!("ignoring stale account load");
            return false;
        }
        self.accounts = match result {
            Ok(accounts) => {
                info!(count = accounts.len(), "accounts loaded");
                Loadable::Loaded(accounts)
            }
            Err(err) => {
                warn!(error = %err, "failed to load accounts");
                Loadable::Failed(err)
            }
        };
        true
    }

    /// Opens a new account and reloads on success. A failure leaves the
    /// list untouched.
    pub async fn create_account(&mut self, api: &ApiClient) -> Notice {
        match client::create_account(api).await {
            Ok(_) => {
                info!("account created");
                self.refresh(api).await;
                Notice::success("Account created.")
            }
            Err(err) => {
                warn!(error = %err, "account creation failed");
                Notice::error(err.message())
            }
        }
    }

    /// Starts an edit for one account, discarding any previous dialog and
    /// the amount typed into it.
    pub fn open_dialog(&mut self, account_id: i64, kind: MovementKind) {
        self.dialog = Some(AmountDialog {
            account_id,
            kind,
            amount: String::new(),
        });
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.amount = amount.into();
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Validates and submits the open dialog. On success the dialog closes
    /// and the list reloads; on failure the dialog stays open with the
    /// entered amount.
    pub async fn confirm(&mut self, api: &ApiClient) -> Notice {
        let Some(dialog) = self.dialog.clone() else {
            return Notice::error("Choose an account and an operation first.");
        };
        let amount = match parse_amount(&dialog.amount) {
            Ok(amount) => amount,
            Err(err) => return Notice::error(err.message()),
        };

        match client::move_funds(api, dialog.account_id, dialog.kind, amount).await {
            Ok(_) => {
                info!(account_id = dialog.account_id, kind = %dialog.kind, "funds moved");
                self.close_dialog();
                self.refresh(api).await;
                Notice::success(success_message(dialog.kind, dialog.account_id, amount))
            }
            Err(err) => {
                warn!(
                    account_id = dialog.account_id,
                    kind = %dialog.kind,
                    error = %err,
                    "funds movement failed"
                );
                Notice::error(err.message())
            }
        }
    }

    pub fn teardown(&mut self) {
        self.lifecycle.teardown();
    }
}

fn success_message(kind: MovementKind, account_id: i64, amount: f64) -> String {
    match kind {
        MovementKind::Deposit => format!("Deposited ${amount:.2} into #{account_id}."),
        MovementKind::Withdraw => format!("Withdrew ${amount:.2} from #{account_id}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::AppConfig;
    use crate::features::auth::{MemoryCredentialStore, Role, SessionContext};
    use secrecy::SecretString;
    use serde_json::json;
    use std::{net::TcpListener, sync::Arc};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn user_client(server: &MockServer) -> anyhow::Result<ApiClient> {
        let session = SessionContext::restore(Arc::new(MemoryCredentialStore::default()));
        session.login(SecretString::from("user-jwt".to_string()), Role::User)?;
        let config = AppConfig::load(Some(server.uri().as_str()), Some("/tmp/unused.json"))?;
        Ok(ApiClient::new(&config, session)?)
    }

    fn account_json(balance: &str) -> serde_json::Value {
        json!([{
            "account_id": 3,
            "account_number": "ACC-3",
            "balance": balance,
            "account_status": "active",
            "risk_level": "low"
        }])
    }

    #[test]
    fn parse_amount_accepts_only_positive_finite_numbers() {
        assert_eq!(parse_amount("12.50").ok(), Some(12.5));
        assert_eq!(parse_amount(" 7 ").ok(), Some(7.0));
        for raw in ["0", "-5", "abc", "", "NaN", "inf", "1e400"] {
            assert!(
                matches!(parse_amount(raw), Err(AppError::Validation(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn open_dialog_resets_amount() {
        let mut workflow = FundsWorkflow::new();
        workflow.open_dialog(3, MovementKind::Deposit);
        workflow.set_amount("40");
        workflow.open_dialog(4, MovementKind::Withdraw);

        let dialog = workflow.dialog().cloned();
        assert_eq!(
            dialog,
            Some(AmountDialog {
                account_id: 4,
                kind: MovementKind::Withdraw,
                amount: String::new(),
            })
        );
        workflow.close_dialog();
        assert!(workflow.dialog().is_none());
    }

    #[tokio::test]
    async fn invalid_amounts_send_no_request() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/accounts/3/deposit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let api = user_client(&server)?;
        let mut workflow = FundsWorkflow::new();
        for raw in ["0", "-5", "abc"] {
            workflow.open_dialog(3, MovementKind::Deposit);
            workflow.set_amount(raw);
            let notice = workflow.confirm(&api).await;
            assert_eq!(notice, Notice::error(INVALID_AMOUNT));
            assert!(workflow.dialog().is_some());
        }
        Ok(())
    }

    #[tokio::test]
    async fn confirm_posts_amount_and_reloads() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/accounts/3/deposit"))
            .and(body_json(json!({"amount": 12.5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"account_id": 3})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_json("112.50")))
            .expect(1)
            .mount(&server)
            .await;

        let api = user_client(&server)?;
        let mut workflow = FundsWorkflow::new();
        workflow.open_dialog(3, MovementKind::Deposit);
        workflow.set_amount("12.50");
        let notice = workflow.confirm(&api).await;

        assert_eq!(notice, Notice::success("Deposited $12.50 into #3."));
        assert!(workflow.dialog().is_none());
        assert_eq!(workflow.accounts().first().map(|account| account.balance), Some(112.5));
        Ok(())
    }

    #[tokio::test]
    async fn failed_withdrawal_keeps_dialog_open() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/accounts/3/withdraw"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_json("5.00")))
            .expect(0)
            .mount(&server)
            .await;

        let api = user_client(&server)?;
        let mut workflow = FundsWorkflow::new();
        workflow.open_dialog(3, MovementKind::Withdraw);
        workflow.set_amount("50");
        let notice = workflow.confirm(&api).await;

        assert_eq!(notice, Notice::error("Withdrawal failed"));
        assert_eq!(workflow.dialog().map(|dialog| dialog.amount.as_str()), Some("50"));
        Ok(())
    }

    #[tokio::test]
    async fn create_account_reloads_only_on_success() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/accounts"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let api = user_client(&server)?;
        let mut workflow = FundsWorkflow::new();
        let ticket = workflow.begin_load();
        workflow.finish_load(ticket, Ok(Vec::new()));

        let notice = workflow.create_account(&api).await;
        assert_eq!(notice, Notice::error("Failed to create account"));
        assert_eq!(workflow.state(), &Loadable::Loaded(Vec::new()));
        Ok(())
    }

    #[test]
    fn load_failure_is_reported() {
        let mut workflow = FundsWorkflow::new();
        let ticket = workflow.begin_load();
        workflow.finish_load(
            ticket,
            Err(AppError::Network("Unable to reach the server".to_string())),
        );
        assert!(workflow.accounts().is_empty());
        assert_eq!(workflow.load_error(), Some("Unable to reach the server"));
    }
}
