use super::{Action, Entry, accounts, admin, auth, enter, fraud_logs, rules};
use crate::{app_lib::ApiClient, cli::globals::GlobalArgs, cli::output::OutputFormat, routes::Route};
use anyhow::Result;

pub(super) async fn execute(action: Action, globals: GlobalArgs) -> Result<()> {
    let api = globals.connect()?;
    let format = globals.format;

    if let Some(route) = action.route() {
        if let Entry::Home(home) = enter(&api, route)? {
            return render_view(&api, home, format).await;
        }
    }

    match action {
        Action::Login(args) => {
            let home = auth::login(&api, args).await?;
            render_view(&api, home, format).await
        }
        Action::Signup(args) => auth::signup(&api, args).await,
        Action::Logout => auth::logout(&api),
        Action::Whoami => auth::whoami(&api, format),
        Action::Open { path } => {
            let route = auth::resolve(&path)?;
            match enter(&api, route)? {
                Entry::Render => render_view(&api, route, format).await,
                Entry::Home(home) => render_view(&api, home, format).await,
            }
        }
        Action::Dashboard => admin::dashboard(&api, format).await,
        Action::Users => admin::users(&api, format).await,
        Action::FraudLogs(command) => fraud_logs::run(&api, command, format).await,
        Action::Rules(command) => rules::run(&api, command, format).await,
        Action::Accounts(command) => accounts::run(&api, command, format).await,
        Action::Transactions => accounts::transactions(&api, format).await,
        Action::Transfer(args) => accounts::transfer(&api, args).await,
    }
}

/// Default rendering of a view reached by navigation.
pub(super) async fn render_view(api: &ApiClient, route: Route, format: OutputFormat) -> Result<()> {
    match route {
        Route::Login | Route::Signup | Route::UserTransfer => {
            println!("{}: {}", route.title(), auth::usage_hint(route));
            Ok(())
        }
        Route::AdminDashboard => admin::dashboard(api, format).await,
        Route::AdminUsers => admin::users(api, format).await,
        Route::AdminFraudLogs => {
            fraud_logs::run(api, fraud_logs::FraudLogsCommand::List, format).await
        }
        Route::AdminFraudRules => rules::run(api, rules::RulesCommand::List, format).await,
        Route::UserAccounts => {
            accounts::run(api, accounts::AccountsCommand::List, format).await
        }
        Route::UserTransactions => accounts::transactions(api, format).await,
    }
}
