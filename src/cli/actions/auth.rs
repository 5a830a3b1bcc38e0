//! Session commands: sign in, sign up, sign out and navigation by path.

use super::request_error;
use crate::{
    app_lib::{ApiClient, AppError, Notice},
    cli::output::{OutputFormat, print_notice, render_single},
    features::auth::client::{self, SignupForm},
    routes::Route,
};
use anyhow::{Context, Result, anyhow};
use dialoguer::Password;
use secrecy::SecretString;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug)]
pub struct LoginArgs {
    pub username: String,
    pub password: Option<SecretString>,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub username: String,
    pub email: String,
    pub password: Option<SecretString>,
}

#[derive(Clone, Serialize, Tabled)]
struct WhoamiRow {
    signed_in: bool,
    #[tabled(display_with = "display_option")]
    role: Option<String>,
    #[tabled(display_with = "display_option")]
    home: Option<String>,
}

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn password_or_prompt(password: Option<SecretString>) -> Result<SecretString> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map(SecretString::from)
            .context("failed to read password"),
    }
}

/// Signs in and returns the home view for the actor's role.
///
/// # Errors
/// Returns the server's rejection or a validation message.
pub async fn login(api: &ApiClient, args: LoginArgs) -> Result<Route> {
    let password = password_or_prompt(args.password)?;
    let home = client::authenticate(api, &args.username, &password)
        .await
        .map_err(|err| anyhow!("{}", err.message()))?;
    if let Some(role) = api.session().role() {
        print_notice(&Notice::success(format!("Signed in as {role}.")));
    }
    Ok(home)
}

/// Creates a customer login. The operator signs in separately afterwards.
///
/// # Errors
/// Returns a validation message or the request failure.
pub async fn signup(api: &ApiClient, args: SignupArgs) -> Result<()> {
    let form = SignupForm {
        username: args.username,
        email: args.email,
        password: password_or_prompt(args.password)?,
    };
    client::signup(api, &form)
        .await
        .map_err(|err| request_error(&err))?;
    print_notice(&Notice::success("Account created! Please log in."));
    Ok(())
}

/// # Errors
/// Returns an error if the stored session cannot be removed.
pub fn logout(api: &ApiClient) -> Result<()> {
    api.session()
        .logout()
        .map_err(|err| anyhow!("{}", err.message()))?;
    print_notice(&Notice::success("Signed out."));
    Ok(())
}

/// Prints the stored session's role. The token is never shown.
///
/// # Errors
/// Returns an error if JSON output cannot be encoded.
pub fn whoami(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let role = api.session().role();
    let row = WhoamiRow {
        signed_in: role.is_some(),
        role: role.map(|role| role.to_string()),
        home: role.map(|role| Route::home(role).path().to_string()),
    };
    println!("{}", render_single(row.clone(), &row, format)?);
    Ok(())
}

/// # Errors
/// Returns an error for paths outside the navigation table.
pub fn resolve(path: &str) -> Result<Route> {
    path.parse::<Route>()
        .map_err(|err: AppError| anyhow!("{}", err.message()))
}

/// How to act on views that are forms rather than listings.
#[must_use]
pub const fn usage_hint(route: Route) -> &'static str {
    match route {
        Route::Login => "run `fraudesk login <username>`",
        Route::Signup => "run `fraudesk signup <username> <email>`",
        Route::UserTransfer => "run `fraudesk transfer <source> <destination> <amount>`",
        _ => "run `fraudesk open <path>`",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_known_paths_only() {
        assert_eq!(resolve("/admin/fraud-logs/").ok(), Some(Route::AdminFraudLogs));
        let err = resolve("/admin/secrets").err();
        assert!(err.is_some_and(|err| err.to_string().contains("Unknown page")));
    }

    #[test]
    fn display_option_uses_dash() {
        assert_eq!(display_option(&None), "-");
        assert_eq!(display_option(&Some("admin".to_string())), "admin");
    }
}
