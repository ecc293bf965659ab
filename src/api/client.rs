//! Dokploy API client with consistent status mapping.
use std::fmt;
use std::time::Duration;

use serde_json::{Value, json};

use super::settings::ClientSettings;
use super::transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};
use crate::constants::{DEFAULT_TIMEOUT, Endpoints};
use crate::error::{ApiError, ConfigError};

const CONTENT_TYPE_JSON: &str = "application/json";

fn user_agent() -> String {
    let version =
        option_env!("DOKPLOY_CI_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    format!("dokploy-ci/{version}")
}

/// Header used to present the API token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `x-api-key: <token>`, for API keys generated in the Dokploy UI.
    #[default]
    ApiKey,
    /// `Authorization: Bearer <token>`, for session tokens.
    Bearer,
}

impl AuthScheme {
    fn header(self, token: &str) -> (String, String) {
        match self {
            Self::ApiKey => ("x-api-key".to_string(), token.to_string()),
            Self::Bearer => ("Authorization".to_string(), format!("Bearer {token}")),
        }
    }
}

/// Per-call overrides for [`DokployClient::get`] and [`DokployClient::post`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use dokploy_ci::api::RequestOptions;
///
/// let opts = RequestOptions::new().timeout(Duration::from_secs(60)).no_raise();
/// assert!(!opts.raise_on_error);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the client's default timeout.
    pub timeout: Option<Duration>,
    /// Return non-2xx responses instead of failing with [`ApiError::Status`].
    ///
    /// 401 and 404 are always errors.
    pub raise_on_error: bool,
}

impl RequestOptions {
    /// Client timeout, raise on any error status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            raise_on_error: true,
        }
    }

    /// Use `timeout` instead of the client default.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Hand non-2xx bodies back to the caller (except 401 and 404).
    #[must_use]
    pub const fn no_raise(mut self) -> Self {
        self.raise_on_error = false;
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A response that passed status classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON; an empty body decodes to `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ApiError> {
        if self.body.is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::InvalidResponse {
            message: format!("Invalid JSON in response: {e}"),
            body: Some(self.body.clone()),
        })
    }

    /// Decode a body the caller asked to inspect regardless of status.
    ///
    /// Non-JSON error pages come back as a JSON string.
    fn into_value(self) -> Result<Value, ApiError> {
        if self.is_success() {
            return self.json();
        }
        match self.json() {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(self.body)),
        }
    }
}

/// Map a raw response onto the error taxonomy.
///
/// 401 and 404 always fail; other non-2xx statuses fail only when
/// `raise_on_error` is set.
fn classify(response: HttpResponse, raise_on_error: bool) -> Result<ApiResponse, ApiError> {
    match response.status {
        401 => Err(ApiError::Auth {
            message: "Authentication failed - invalid or expired token".to_string(),
            status: Some(401),
            body: Some(response.body),
        }),
        404 => Err(ApiError::NotFound {
            body: response.body,
        }),
        status if raise_on_error && !response.is_success() => Err(ApiError::Status {
            status,
            body: response.body,
        }),
        status => Ok(ApiResponse {
            status,
            body: response.body,
        }),
    }
}

/// Blocking HTTP client for the Dokploy API.
///
/// Holds only immutable connection settings; no retries are attempted.
///
/// ```no_run
/// use dokploy_ci::api::{DokployClient, RequestOptions};
///
/// let client = DokployClient::from_env()?;
/// let _projects = client.get("/api/project.all", &[], RequestOptions::default())?;
/// # Ok::<(), dokploy_ci::Error>(())
/// ```
pub struct DokployClient {
    url: String,
    token: String,
    timeout: Duration,
    auth_scheme: AuthScheme,
    transport: Box<dyn Transport>,
}

impl DokployClient {
    /// Create a client for the instance at `url`.
    ///
    /// A single trailing slash is stripped from `url`. `timeout` defaults to
    /// 30 seconds.
    #[must_use]
    pub fn new(url: &str, token: &str, timeout: Option<Duration>) -> Self {
        Self {
            url: url.strip_suffix('/').unwrap_or(url).to_string(),
            token: token.to_string(),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            auth_scheme: AuthScheme::default(),
            transport: Box::new(UreqTransport::new()),
        }
    }

    /// Create a client from resolved settings.
    #[must_use]
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(&settings.url, &settings.token, Some(settings.timeout))
    }

    /// Create a client from `DOKPLOY_URL`, `DOKPLOY_TOKEN` and `DOKPLOY_TIMEOUT`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_settings(&ClientSettings::from_env()?))
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    /// Select which header carries the token.
    #[must_use]
    pub const fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Normalized instance URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Default per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Header convention in use.
    #[must_use]
    pub const fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }

    fn base_headers() -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
            ("User-Agent".to_string(), user_agent()),
        ]
    }

    fn authed_headers(&self) -> Vec<(String, String)> {
        let mut headers = Self::base_headers();
        headers.push(self.auth_scheme.header(&self.token));
        headers
    }

    fn send(&self, request: &HttpRequest, context: &str) -> Result<HttpResponse, ApiError> {
        tracing::debug!("{} {}", request.method, request.url);
        let response = self
            .transport
            .execute(request)
            .map_err(|source| ApiError::Transport {
                message: context.to_string(),
                source,
            })?;
        tracing::debug!("{} {} -> {}", request.method, request.url, response.status);
        Ok(response)
    }

    /// Issue an authenticated request and classify its status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] on 401 and [`ApiError::NotFound`] on 404
    /// regardless of `options`, [`ApiError::Status`] on other non-2xx
    /// statuses when `options.raise_on_error` is set, and
    /// [`ApiError::Transport`] when no response was received.
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: format!("{}{endpoint}", self.url),
            headers: self.authed_headers(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: body.map(Value::to_string),
            timeout: options.timeout.unwrap_or(self.timeout),
        };
        let response = self.send(&request, "Request failed")?;
        classify(response, options.raise_on_error)
    }

    /// `GET` an endpoint and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request); additionally returns
    /// [`ApiError::InvalidResponse`] if a 2xx body is not valid JSON.
    pub fn get(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.request(Method::Get, endpoint, params, None, options)?
            .into_value()
    }

    /// `POST` a JSON body to an endpoint and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub fn post(
        &self,
        endpoint: &str,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.request(Method::Post, endpoint, &[], body, options)?
            .into_value()
    }

    /// Sign in with email and password and return the session token.
    ///
    /// Does not send the client's own token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] for rejected credentials,
    /// [`ApiError::Status`] for any other non-2xx status,
    /// [`ApiError::InvalidResponse`] if the body has no `token`, and
    /// [`ApiError::Transport`] when no response was received.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}{}", self.url, Endpoints::AUTH_SIGN_IN),
            headers: Self::base_headers(),
            query: Vec::new(),
            body: Some(json!({ "email": email, "password": password }).to_string()),
            timeout: self.timeout,
        };
        let response = self.send(&request, "Authentication request failed")?;

        if response.status == 401 {
            return Err(ApiError::Auth {
                message: "Invalid email or password".to_string(),
                status: Some(401),
                body: None,
            });
        }
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let body = ApiResponse {
            status: response.status,
            body: response.body,
        };
        body.json()?
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::InvalidResponse {
                message: "No token in authentication response".to_string(),
                body: Some(body.body.clone()),
            })
    }

    /// Check the token against a cheap authenticated listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the token is rejected, or any other
    /// error from [`get`](Self::get).
    pub fn verify_token(&self) -> Result<bool, ApiError> {
        self.get(Endpoints::PROJECT_ALL, &[], RequestOptions::default())?;
        Ok(true)
    }
}

impl fmt::Debug for DokployClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DokployClient")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::transport::MockTransport;

    fn respond(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    fn client_with(mock: MockTransport) -> DokployClient {
        DokployClient::new("https://dokploy.example.com/", "tok", None).with_transport(mock)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_strips_single_trailing_slash() {
        let client = DokployClient::new("https://dokploy.example.com/", "tok", None);
        assert_eq!(client.url(), "https://dokploy.example.com");
        let client = DokployClient::new("https://dokploy.example.com", "tok", None);
        assert_eq!(client.url(), "https://dokploy.example.com");
    }

    #[test]
    fn new_defaults_timeout() {
        let client = DokployClient::new("https://dokploy.example.com", "tok", None);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        let client =
            DokployClient::new("https://dokploy.example.com", "tok", Some(Duration::from_secs(5)));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn debug_redacts_token() {
        let client = DokployClient::new("https://dokploy.example.com", "super-secret", None);
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    // -----------------------------------------------------------------------
    // Request shaping
    // -----------------------------------------------------------------------

    #[test]
    fn get_sends_api_key_and_json_headers() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| {
                req.method == Method::Get
                    && req.url == "https://dokploy.example.com/api/project.all"
                    && req.header("x-api-key") == Some("tok")
                    && req.header("content-type") == Some("application/json")
                    && req.header("authorization").is_none()
                    && req.timeout == DEFAULT_TIMEOUT
            })
            .times(1)
            .returning(|_| Ok(respond(200, "[]")));

        let value = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::default())
            .unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn bearer_scheme_uses_authorization_header() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| {
                req.header("authorization") == Some("Bearer tok") && req.header("x-api-key").is_none()
            })
            .times(1)
            .returning(|_| Ok(respond(200, "{}")));

        client_with(mock)
            .with_auth_scheme(AuthScheme::Bearer)
            .get("/api/project.all", &[], RequestOptions::default())
            .unwrap();
    }

    #[test]
    fn get_passes_query_and_timeout_override() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| {
                req.query == vec![("projectId".to_string(), "p1".to_string())]
                    && req.timeout == Duration::from_secs(60)
            })
            .times(1)
            .returning(|_| Ok(respond(200, r#"{"projectId":"p1"}"#)));

        let value = client_with(mock)
            .get(
                "/api/project.one",
                &[("projectId", "p1")],
                RequestOptions::new().timeout(Duration::from_secs(60)),
            )
            .unwrap();
        assert_eq!(value["projectId"], "p1");
    }

    #[test]
    fn post_serializes_body() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| {
                req.method == Method::Post
                    && req.body.as_deref() == Some(r#"{"name":"shop"}"#)
            })
            .times(1)
            .returning(|_| Ok(respond(200, r#"{"projectId":"p1"}"#)));

        let value = client_with(mock)
            .post(
                "/api/project.create",
                Some(&json!({ "name": "shop" })),
                RequestOptions::default(),
            )
            .unwrap();
        assert_eq!(value, json!({ "projectId": "p1" }));
    }

    #[test]
    fn empty_body_decodes_to_empty_object() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(200, "")));
        let value = client_with(mock)
            .post("/api/application.deploy", None, RequestOptions::default())
            .unwrap();
        assert_eq!(value, json!({}));
    }

    // -----------------------------------------------------------------------
    // Status mapping
    // -----------------------------------------------------------------------

    #[test]
    fn unauthorized_is_auth_error_even_without_raise() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(401, "unauthorized")));
        let err = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::new().no_raise())
            .unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.body(), Some("unauthorized"));
    }

    #[test]
    fn not_found_is_not_found_error_even_without_raise() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(404, "missing")));
        let err = client_with(mock)
            .post("/api/compose.deploy", None, RequestOptions::new().no_raise())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn server_error_raises_by_default() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(500, "boom")));
        let err = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn server_error_returned_when_not_raising() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(400, r#"{"message":"bad input"}"#)));
        let value = client_with(mock)
            .post("/api/domain.create", None, RequestOptions::new().no_raise())
            .unwrap();
        assert_eq!(value["message"], "bad input");
    }

    #[test]
    fn non_json_error_body_returned_as_string() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(502, "Bad Gateway")));
        let value = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::new().no_raise())
            .unwrap();
        assert_eq!(value, json!("Bad Gateway"));
    }

    #[test]
    fn raw_request_exposes_status() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(409, "conflict")));
        let response = client_with(mock)
            .request(
                Method::Post,
                "/api/project.create",
                &[],
                None,
                RequestOptions::new().no_raise(),
            )
            .unwrap();
        assert_eq!(response.status, 409);
        assert!(!response.is_success());
        assert_eq!(response.body, "conflict");
    }

    #[test]
    fn invalid_success_json_is_invalid_response() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(200, "<html>")));
        let err = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn transport_failure_is_wrapped() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Err("connection refused".into()));
        let err = client_with(mock)
            .get("/api/project.all", &[], RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    // -----------------------------------------------------------------------
    // authenticate / verify_token
    // -----------------------------------------------------------------------

    #[test]
    fn authenticate_returns_token_without_sending_credentials() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| {
                req.url == "https://dokploy.example.com/api/auth/sign-in/email"
                    && req.header("x-api-key").is_none()
                    && req.header("authorization").is_none()
                    && req.body.as_deref()
                        == Some(r#"{"email":"admin@example.com","password":"pw"}"#)
            })
            .times(1)
            .returning(|_| Ok(respond(200, r#"{"token":"session-token","user":{}}"#)));

        let token = client_with(mock)
            .authenticate("admin@example.com", "pw")
            .unwrap();
        assert_eq!(token, "session-token");
    }

    #[test]
    fn authenticate_rejected_credentials() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(401, "")));
        let err = client_with(mock)
            .authenticate("admin@example.com", "wrong")
            .unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn authenticate_other_failure_is_status_error() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(404, "no such route")));
        let err = client_with(mock)
            .authenticate("admin@example.com", "pw")
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn authenticate_missing_token() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(200, r#"{"user":{}}"#)));
        let err = client_with(mock)
            .authenticate("admin@example.com", "pw")
            .unwrap_err();
        assert_eq!(err.to_string(), "No token in authentication response");
    }

    #[test]
    fn authenticate_transport_failure() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Err("timed out".into()));
        let err = client_with(mock)
            .authenticate("admin@example.com", "pw")
            .unwrap_err();
        assert_eq!(err.to_string(), "Authentication request failed: timed out");
    }

    #[test]
    fn verify_token_ok() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| req.url.ends_with("/api/project.all"))
            .returning(|_| Ok(respond(200, "[]")));
        assert!(client_with(mock).verify_token().unwrap());
    }

    #[test]
    fn verify_token_propagates_auth_error() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .returning(|_| Ok(respond(401, "")));
        let err = client_with(mock).verify_token().expect_err("401 must surface");
        assert!(err.is_auth());
    }
}
