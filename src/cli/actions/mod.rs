pub mod accounts;
pub mod admin;
pub mod auth;
pub mod fraud_logs;
pub mod rules;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    app_lib::{ApiClient, AppError},
    cli::globals::GlobalArgs,
    features::auth::{Navigation, navigate},
    routes::Route,
};
use anyhow::{Result, anyhow};
use tracing::info;

#[derive(Debug)]
pub enum Action {
    Login(auth::LoginArgs),
    Signup(auth::SignupArgs),
    Logout,
    Whoami,
    Open { path: String },
    Dashboard,
    Users,
    FraudLogs(fraud_logs::FraudLogsCommand),
    Rules(rules::RulesCommand),
    Accounts(accounts::AccountsCommand),
    Transactions,
    Transfer(accounts::TransferArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }

    /// View the action runs in, or `None` for session commands that need no
    /// gate.
    #[must_use]
    pub const fn route(&self) -> Option<Route> {
        match self {
            Self::Login(_) | Self::Logout | Self::Whoami | Self::Open { .. } => None,
            Self::Signup(_) => Some(Route::Signup),
            Self::Dashboard => Some(Route::AdminDashboard),
            Self::Users => Some(Route::AdminUsers),
            Self::FraudLogs(_) => Some(Route::AdminFraudLogs),
            Self::Rules(_) => Some(Route::AdminFraudRules),
            Self::Accounts(_) => Some(Route::UserAccounts),
            Self::Transactions => Some(Route::UserTransactions),
            Self::Transfer(_) => Some(Route::UserTransfer),
        }
    }
}

/// Where a gated navigation ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Render,
    Home(Route),
}

/// Runs the role gate for `route` against the stored session.
///
/// # Errors
/// Returns sign-in guidance when nobody is signed in.
pub(crate) fn enter(api: &ApiClient, route: Route) -> Result<Entry> {
    match navigate(&api.session().current(), route) {
        Navigation::Render => Ok(Entry::Render),
        Navigation::RedirectToLogin => Err(not_signed_in()),
        Navigation::RedirectToHome(home) => {
            info!(requested = %route, home = %home, "redirecting to home view");
            Ok(Entry::Home(home))
        }
    }
}

fn not_signed_in() -> anyhow::Error {
    anyhow!("Not signed in. Run `fraudesk login <username>` first.")
}

/// Converts a request failure for the CLI edge. A rejected credential is
/// reported like a missing one.
pub(crate) fn request_error(err: &AppError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow!(
            "{} Your session was rejected; run `fraudesk login <username>` again.",
            err.message()
        )
    } else {
        anyhow!("{}", err.message())
    }
}
