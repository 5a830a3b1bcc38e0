//! Console configuration for the API endpoint and the session file. Values
//! come from CLI flags or their `FRAUDESK_*` environment fallbacks; empty
//! values fall back to the defaults below. Configuration values are public;
//! do not store secrets here.

use super::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// API base used when nothing is configured, matching the backend's dev server.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
/// Default request timeout applied by the API client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SESSION_DIR: &str = "fraudesk";
const SESSION_FILE: &str = "session.json";

/// Resolved console configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Builds the config from optional overrides, validating the API URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the API URL is not an absolute http(s) URL
    /// or no session path can be derived.
    pub fn load(api_base_url: Option<&str>, session_path: Option<&str>) -> Result<Self, AppError> {
        let api_base_url = api_base_url
            .and_then(normalize_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        validate_base_url(&api_base_url)?;

        let session_path = match session_path.and_then(normalize_value) {
            Some(path) => PathBuf::from(path),
            None => default_session_path()?,
        };

        Ok(Self {
            api_base_url,
            session_path,
            request_timeout: DEFAULT_TIMEOUT,
        })
    }
}

/// `<config dir>/fraudesk/session.json`, e.g. `~/.config/fraudesk/session.json`.
///
/// # Errors
/// Returns `AppError::Config` when the platform has no config directory.
pub fn default_session_path() -> Result<PathBuf, AppError> {
    dirs::config_dir()
        .map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
        .ok_or_else(|| {
            AppError::Config(
                "Unable to determine a config directory; set FRAUDESK_SESSION_FILE.".to_string(),
            )
        })
}

fn validate_base_url(raw: &str) -> Result<(), AppError> {
    let url = Url::parse(raw)
        .map_err(|err| AppError::Config(format!("Invalid API URL {raw}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Config(format!(
            "Invalid API URL {raw}: unsupported scheme {scheme}"
        ))),
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
