use crate::{
    app_lib::{ApiClient, AppConfig},
    cli::output::OutputFormat,
    features::auth::{FileCredentialStore, SessionContext},
};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Options every action needs, resolved once from flags and environment.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub format: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(
        api_url: Option<String>,
        session_file: Option<String>,
        format: OutputFormat,
    ) -> Self {
        Self {
            api_url,
            session_file,
            format,
        }
    }

    /// # Errors
    /// Returns an error if the API URL is invalid or no session path exists.
    pub fn config(&self) -> Result<AppConfig> {
        AppConfig::load(self.api_url.as_deref(), self.session_file.as_deref())
            .context("invalid console configuration")
    }

    /// Restores the stored session and builds a client bound to it.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn connect(&self) -> Result<ApiClient> {
        let config = self.config()?;
        let store = Arc::new(FileCredentialStore::new(config.session_path.clone()));
        let session = SessionContext::restore(store);
        ApiClient::new(&config, session).context("failed to build API client")
    }
}
