//! Client wrappers for the backend's auth endpoints. These calls never carry
//! the bearer token and must never log the password or the returned token.

use super::types::{LoginRequest, LoginResponse, Role, SignupRequest};
use crate::{app_lib::{ApiClient, AppError}, routes::Route};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;

/// Posts credentials to `/auth/login` and returns the raw response.
///
/// # Errors
/// Returns the classified request failure; the server's `msg` is preferred.
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<LoginResponse, AppError> {
    let request = LoginRequest {
        username,
        password: password.expose_secret(),
    };
    api.post_public_json("/auth/login", &request, "Login failed")
        .await
}

/// Signs in and stores the credential, returning the home route for the
/// actor's role.
///
/// # Errors
/// Returns `AppError::Validation` for blank input (no request is sent), the
/// request failure, `AppError::Parse` for an unknown role, or
/// `AppError::Storage` if the session cannot be persisted.
#[instrument(skip(api, password))]
pub async fn authenticate(
    api: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<Route, AppError> {
    let username = username.trim();
    if username.is_empty() || password.expose_secret().trim().is_empty() {
        return Err(AppError::Validation(
            "Username and password are required.".to_string(),
        ));
    }

    let response = login(api, username, password).await?;
    let role = response.role.parse::<Role>()?;
    if response.access_token.trim().is_empty() {
        return Err(AppError::Parse("Login response carried no token.".to_string()));
    }

    api.session()
        .login(SecretString::from(response.access_token), role)?;
    Ok(Route::home(role))
}

/// Signup input as typed by the operator.
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl SignupForm {
    /// # Errors
    /// Returns `AppError::Validation` when a field is blank or the email is malformed.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.expose_secret().is_empty()
        {
            return Err(AppError::Validation(
                "Username, email and password are required.".to_string(),
            ));
        }
        if !valid_email(self.email.trim()) {
            return Err(AppError::Validation("Enter a valid email address.".to_string()));
        }
        Ok(())
    }
}

/// Creates an account with `/auth/signup`. The caller sends the operator to
/// the login view afterwards; signup does not sign in.
///
/// # Errors
/// Returns `AppError::Validation` without sending a request for bad input, or
/// the request failure.
#[instrument(skip_all)]
pub async fn signup(api: &ApiClient, form: &SignupForm) -> Result<Value, AppError> {
    form.validate()?;
    let request = SignupRequest {
        username: form.username.trim(),
        email: form.email.trim(),
        password: form.password.expose_secret(),
    };
    api.post_public_json("/auth/signup", &request, "Signup failed")
        .await
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}
