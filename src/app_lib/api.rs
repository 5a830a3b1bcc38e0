//! HTTP helpers for the backend's JSON API with a consistent timeout and
//! error policy. Feature clients call these helpers so request setup, bearer
//! attachment and failure classification live in one place. The client reads
//! the current credential at call time and never stores or logs it.

use super::{config::AppConfig, errors::AppError};
use crate::features::auth::SessionContext;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{Instrument, debug, info_span};
use ulid::Ulid;

/// Maximum number of error body characters surfaced to the console.
const MAX_ERROR_CHARS: usize = 200;
/// Fields the backend uses to carry a human-readable error.
const ERROR_FIELDS: [&str; 3] = ["msg", "message", "error"];
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Fields an acknowledgement may carry its human-readable message in.
const ACK_FIELDS: [&str; 2] = ["message", "msg"];

/// Acknowledgement body returned by mutating endpoints. Any JSON value is a
/// valid acknowledgement; only an optional string message is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    /// Picks `message`, then `msg`, when it is a non-blank string.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let message = ACK_FIELDS
            .iter()
            .filter_map(|field| value.get(field).and_then(Value::as_str))
            .map(str::trim)
            .find(|message| !message.is_empty())
            .map(str::to_string);
        Self { message }
    }
}

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

/// Whether a call carries the session's bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

/// Stateless request layer parameterized by the session at call time.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig, session: SessionContext) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    /// The session whose token is attached to requests.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetches JSON with the session's bearer token.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, AppError> {
        let request = self.http.get(self.url(path));
        let response = self.send("GET", path, request, Auth::Bearer).await?;
        handle_json_response(response, fallback).await
    }

    /// Posts a JSON body with the session's bearer token and parses the reply.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, AppError> {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send("POST", path, request, Auth::Bearer).await?;
        handle_json_response(response, fallback).await
    }

    /// Posts without a body, used for create-account and resolve calls.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, AppError> {
        let request = self
            .http
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response = self.send("POST", path, request, Auth::Bearer).await?;
        handle_json_response(response, fallback).await
    }

    /// Posts JSON to an auth endpoint; never attaches the bearer token.
    pub(crate) async fn post_public_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, AppError> {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send("POST", path, request, Auth::Public).await?;
        handle_json_response(response, fallback).await
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<Response, AppError> {
        let request_id = Ulid::new().to_string();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.as_str());

        let session = self.session.current();
        let authorized = match (auth, session.token()) {
            (Auth::Bearer, Some(token)) => {
                request = request.bearer_auth(token.expose_secret());
                true
            }
            _ => false,
        };

        let span = info_span!(
            "api.request",
            http.method = method,
            path = %path,
            request_id = %request_id,
            authorized
        );

        async move {
            let response = request.send().await.map_err(map_request_error)?;
            debug!(status = response.status().as_u16(), "response received");
            Ok::<Response, AppError>(response)
        }
        .instrument(span)
        .await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into console-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with the server's message
/// when it sent one, else the per-operation fallback.
async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: server_message(&body).unwrap_or_else(|| fallback.to_string()),
        })
    }
}

/// Extracts `msg`, `message` or `error` from a JSON error body, trimmed and
/// truncated for display.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ERROR_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(|message| message.chars().take(MAX_ERROR_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::{Ack, ApiClient, build_url_with_base, server_message};
    use crate::app_lib::{AppConfig, AppError};
    use crate::features::auth::{MemoryCredentialStore, Role, SessionContext};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use std::{net::TcpListener, sync::Arc};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer, session: SessionContext) -> ApiClient {
        let config = AppConfig::load(Some(server.uri().as_str()), Some("/tmp/unused-session.json"))
            .expect("config");
        ApiClient::new(&config, session).expect("client")
    }

    fn anonymous() -> SessionContext {
        SessionContext::restore(Arc::new(MemoryCredentialStore::default()))
    }

    #[test]
    fn build_url_joins_slashes() {
        assert_eq!(
            build_url_with_base("http://127.0.0.1:5000/api/", "/admin/fraud-logs"),
            "http://127.0.0.1:5000/api/admin/fraud-logs"
        );
        assert_eq!(
            build_url_with_base("http://127.0.0.1:5000/api", "user/accounts"),
            "http://127.0.0.1:5000/api/user/accounts"
        );
        assert_eq!(build_url_with_base("  ", "/auth/login"), "/auth/login");
    }

    #[test]
    fn server_message_prefers_known_fields() {
        assert_eq!(
            server_message(r#"{"msg":"Bad username or password"}"#),
            Some("Bad username or password".to_string())
        );
        assert_eq!(
            server_message(r#"{"message":" Insufficient funds "}"#),
            Some("Insufficient funds".to_string())
        );
        assert_eq!(
            server_message(r#"{"error":"Account is blocked"}"#),
            Some("Account is blocked".to_string())
        );
        assert_eq!(server_message(r#"{"msg":"   "}"#), None);
        assert_eq!(server_message("<html>Internal Server Error</html>"), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn ack_accepts_any_json_body() -> anyhow::Result<()> {
        let message = |raw: &str| -> anyhow::Result<Option<String>> {
            Ok(serde_json::from_str::<Ack>(raw)?.message)
        };
        assert_eq!(message("true")?, None);
        assert_eq!(message(r#""ok""#)?, None);
        assert_eq!(message("null")?, None);
        assert_eq!(message(r#"{"message":1}"#)?, None);
        assert_eq!(message(r#"{"message":"b","msg":"a"}"#)?, Some("b".to_string()));
        assert_eq!(message(r#"{"message":" ","msg":"a"}"#)?, Some("a".to_string()));
        assert_eq!(
            message(r#"{"msg":"Transfer successful"}"#)?,
            Some("Transfer successful".to_string())
        );
        assert!(serde_json::from_str::<Ack>("not json").is_err());
        Ok(())
    }

    #[test]
    fn server_message_truncates_long_bodies() {
        let long = "x".repeat(500);
        let body = json!({ "msg": long }).to_string();
        assert_eq!(server_message(&body).map(|m| m.len()), Some(200));
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_signed_in() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/accounts"))
            .and(header("Authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let session = anonymous();
        session.login(SecretString::from("user-token".to_string()), Role::User)?;
        let client = client_for(&server, session);

        let accounts: Vec<Value> = client.get_json("/user/accounts", "Failed").await?;
        assert!(accounts.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn omits_authorization_without_token() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/fraud-logs"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "msg": "Missing Authorization Header"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, anonymous());
        let result: Result<Vec<Value>, AppError> =
            client.get_json("/admin/fraud-logs", "Failed to fetch fraud logs").await;

        let err = result.err().ok_or_else(|| anyhow::anyhow!("expected error"))?;
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Missing Authorization Header");

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].headers.get("x-request-id").is_some());
        Ok(())
    }

    #[tokio::test]
    async fn public_calls_never_carry_the_token() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let session = anonymous();
        session.login(SecretString::from("stale-token".to_string()), Role::Admin)?;
        let client = client_for(&server, session);

        let _: Value = client
            .post_public_json("/auth/login", &json!({"username": "a"}), "Login failed")
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn falls_back_to_operation_message() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/transfer"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = client_for(&server, anonymous());
        let result: Result<Value, AppError> = client
            .post_json("/user/transfer", &json!({"amount": 1}), "Transfer failed")
            .await;

        match result {
            Err(AppError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Transfer failed");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn unparseable_success_body_is_a_parse_error() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, anonymous());
        let result: Result<Vec<Value>, AppError> =
            client.get_json("/admin/users", "Failed to fetch users").await;
        assert!(matches!(result, Err(AppError::Parse(_))));
        Ok(())
    }
}
