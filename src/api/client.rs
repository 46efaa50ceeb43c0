//
//  rollbar-provider
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Rollbar API
//!
//! This module provides the core HTTP client for interacting with the Rollbar
//! REST API. It owns the single underlying `reqwest::Client`, the default
//! headers, the request timeout and the credentials, and it hands out the
//! per-resource services.
//!
//! ## Features
//!
//! - One HTTP verb per call, no retries
//! - Per-request authentication header selected by [`TokenScope`]
//! - Response classification against a fixed set of accepted status codes
//! - JSON serialization/deserialization of request and response bodies
//! - Custom User-Agent and arbitrary extra headers

use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::access_tokens::ProjectAccessTokensService;
use super::common::{ApiError, Response};
use super::invitations::InvitationsService;
use super::notifications::NotificationsService;
use super::projects::ProjectsService;
use super::teams::TeamsService;
use super::users::UsersService;
use crate::auth::{Credentials, TokenScope};

/// Base URL of the public Rollbar API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.rollbar.com/api/1";

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Status codes treated as success by [`check_response`].
pub const ACCEPTED_STATUS_CODES: [u16; 5] = [200, 201, 202, 204, 304];

/// Path segment following `/access_token/`, the secret value of a project access token.
static ACCESS_TOKEN_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/access_token/)[^/?#]+").expect("Invalid regex"));

/// Returns the User-Agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

/// Classifies a normalized response.
///
/// Status codes in [`ACCEPTED_STATUS_CODES`] pass through unchanged. Any
/// other status becomes [`ApiError::Status`], which keeps the response so
/// the caller can still inspect the status and body.
///
/// # Example
///
/// ```rust
/// use rollbar_provider::api::{check_response, Response};
///
/// let response = Response {
///     url: "https://api.rollbar.com/api/1/projects".to_string(),
///     method: "GET".to_string(),
///     status: "403 Forbidden".to_string(),
///     status_code: 403,
///     body: "{}".to_string(),
/// };
///
/// let err = check_response(response).unwrap_err();
/// assert!(err.to_string().starts_with("GET https://api.rollbar.com/api/1/projects: 403"));
/// ```
pub fn check_response(response: Response) -> Result<Response, ApiError> {
    if ACCEPTED_STATUS_CODES.contains(&response.status_code) {
        Ok(response)
    } else {
        Err(ApiError::Status {
            response: Box::new(response),
        })
    }
}

/// Decodes the body of a classified response into `T`.
///
/// An empty body, as sent with `204 No Content` or `304 Not Modified`, is
/// read as `{}` so envelope types come back with every field unset.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not valid JSON for `T`.
pub fn decode_response<T: DeserializeOwned>(response: Response) -> Result<(T, Response), ApiError> {
    let body = if response.body.trim().is_empty() {
        "{}"
    } else {
        response.body.as_str()
    };

    let decoded = serde_json::from_str(body);
    match decoded {
        Ok(value) => Ok((value, response)),
        Err(source) => Err(ApiError::Decode {
            source,
            response: Box::new(response),
        }),
    }
}

/// Masks project access token values embedded in a request URL.
///
/// ```rust
/// use rollbar_provider::api::redact_url;
///
/// assert_eq!(
///     redact_url("https://api.rollbar.com/api/1/project/5/access_token/abc123"),
///     "https://api.rollbar.com/api/1/project/5/access_token/****"
/// );
/// ```
pub fn redact_url(url: &str) -> Cow<'_, str> {
    ACCESS_TOKEN_SEGMENT.replace_all(url, "${1}****")
}

/// The main HTTP client for interacting with the Rollbar API.
///
/// The client is immutable once built: credentials are attached to each
/// request according to the scope the calling service declares, so one
/// instance can be shared freely between tasks.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use rollbar_provider::api::RollbarClient;
///
/// let client = RollbarClient::builder()
///     .account_token("account-token")
///     .project_token("project-token")
///     .header("X-Team", "platform")
///     .build()?;
/// # Ok::<(), rollbar_provider::api::ApiError>(())
/// ```
///
/// # Services
///
/// ```rust,ignore
/// let projects = client.projects().list().await?;
/// let team = client.teams().get(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RollbarClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL every path is appended to, without trailing slash
    base_url: String,
    /// Account and project tokens
    credentials: Credentials,
    /// The User-Agent header value
    user_agent: String,
}

impl RollbarClient {
    /// Creates a client against the public API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `credentials` holds no token at all.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        Self::builder().credentials(credentials).build()
    }

    /// Returns a builder for a customized client.
    pub fn builder() -> RollbarClientBuilder {
        RollbarClientBuilder::default()
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the User-Agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Project access token operations.
    pub fn access_tokens(&self) -> ProjectAccessTokensService<'_> {
        ProjectAccessTokensService::new(self)
    }

    /// Team, team membership and team/project operations.
    pub fn teams(&self) -> TeamsService<'_> {
        TeamsService::new(self)
    }

    /// User operations.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Invitation operations.
    pub fn invitations(&self) -> InvitationsService<'_> {
        InvitationsService::new(self)
    }

    /// Notification (PagerDuty) operations.
    pub fn notifications(&self) -> NotificationsService<'_> {
        NotificationsService::new(self)
    }

    /// Builds a full request URL from a path such as `/project/12`.
    pub fn request_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Makes an HTTP GET request and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is configured for `scope`
    /// - The network request fails
    /// - The response status is not accepted
    /// - The response body cannot be deserialized to type `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        scope: TokenScope,
        path: &str,
    ) -> Result<(T, Response), ApiError> {
        let response = self.execute::<()>(Method::GET, scope, path, None).await?;
        decode_response(response)
    }

    /// Makes an HTTP GET request without decoding the body.
    ///
    /// Used by endpoints that answer with a bare status code.
    pub async fn get_raw(&self, scope: TokenScope, path: &str) -> Result<Response, ApiError> {
        self.execute::<()>(Method::GET, scope, path, None).await
    }

    /// Makes an HTTP POST request with a JSON body and decodes the response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        scope: TokenScope,
        path: &str,
        body: &B,
    ) -> Result<(T, Response), ApiError> {
        let response = self.execute(Method::POST, scope, path, Some(body)).await?;
        decode_response(response)
    }

    /// Makes an HTTP PUT request with an optional JSON body and decodes the response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        scope: TokenScope,
        path: &str,
        body: Option<&B>,
    ) -> Result<(T, Response), ApiError> {
        let response = self.execute(Method::PUT, scope, path, body).await?;
        decode_response(response)
    }

    /// Makes an HTTP PUT request with an optional JSON body without decoding the body.
    pub async fn put_raw<B: Serialize + ?Sized>(
        &self,
        scope: TokenScope,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        self.execute(Method::PUT, scope, path, body).await
    }

    /// Makes an HTTP PATCH request with a JSON body and decodes the response.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        scope: TokenScope,
        path: &str,
        body: &B,
    ) -> Result<(T, Response), ApiError> {
        let response = self.execute(Method::PATCH, scope, path, Some(body)).await?;
        decode_response(response)
    }

    /// Makes an HTTP DELETE request.
    pub async fn delete(&self, scope: TokenScope, path: &str) -> Result<Response, ApiError> {
        self.execute::<()>(Method::DELETE, scope, path, None).await
    }

    /// Sends exactly one request and classifies the response.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        scope: TokenScope,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.request_url(path);
        let mut request = self.http.request(method.clone(), &url);
        request = self.credentials.apply_to_request(scope, request)?;

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("{} {} returned {}", method, redact_url(&url), status);

        let decoded_url = match urlencoding::decode(&url) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => url.clone(),
        };

        check_response(Response {
            url: decoded_url,
            method: method.to_string(),
            status: status.to_string(),
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Builder for [`RollbarClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use rollbar_provider::api::RollbarClient;
///
/// let client = RollbarClient::builder()
///     .base_url("http://localhost:8080/api/1")
///     .account_token("account-token")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok::<(), rollbar_provider::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RollbarClientBuilder {
    base_url: String,
    credentials: Credentials,
    headers: HashMap<String, String>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl Default for RollbarClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            credentials: Credentials::default(),
            headers: HashMap::new(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RollbarClientBuilder {
    /// Overrides the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces both tokens at once.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the account access token.
    pub fn account_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_account_token(token);
        self
    }

    /// Sets the project access token.
    pub fn project_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_project_token(token);
        self
    }

    /// Adds one header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a set of headers sent with every request.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Overrides the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when no token is configured, a token
    /// contains whitespace or a custom header is not a valid HTTP header, and
    /// [`ApiError::Transport`] when the HTTP client cannot be created.
    pub fn build(self) -> Result<RollbarClient, ApiError> {
        if self.credentials.is_empty() {
            return Err(ApiError::Config(
                "please set an account access token and/or a project access token".to_string(),
            ));
        }
        self.credentials.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Config(format!("invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Config(format!("invalid value for header {}: {}", name, e)))?;
            default_headers.insert(name, value);
        }

        let user_agent = self.user_agent.unwrap_or_else(default_user_agent);

        let http = Client::builder()
            .user_agent(user_agent.clone())
            .default_headers(default_headers)
            .timeout(self.timeout)
            .build()?;

        Ok(RollbarClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credentials: self.credentials,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Envelope;

    fn response(code: u16) -> Response {
        Response {
            url: "https://api.rollbar.com/api/1/teams".to_string(),
            method: "POST".to_string(),
            status: code.to_string(),
            status_code: code,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn test_accepted_status_codes_pass() {
        for code in ACCEPTED_STATUS_CODES {
            let checked = check_response(response(code)).unwrap();
            assert_eq!(checked.status_code, code);
        }
    }

    #[test]
    fn test_every_other_status_code_fails() {
        for code in 100..600u16 {
            if ACCEPTED_STATUS_CODES.contains(&code) {
                continue;
            }
            let err = check_response(response(code)).unwrap_err();
            let message = err.to_string();
            assert!(message.contains("POST"), "{}", message);
            assert!(message.contains("https://api.rollbar.com/api/1/teams"), "{}", message);
            assert!(message.contains(&code.to_string()), "{}", message);
            assert_eq!(err.status_code(), Some(code));
        }
    }

    #[test]
    fn test_decode_failure_keeps_response() {
        let err = decode_response::<serde_json::Value>(response(200)).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(err.response().map(|r| r.body.as_str()), Some("boom"));
    }

    #[test]
    fn test_empty_body_decodes_as_empty_envelope() {
        for code in [204, 304] {
            let mut empty = response(code);
            empty.body = String::new();
            let (envelope, kept) =
                decode_response::<Envelope<serde_json::Value>>(empty).unwrap();
            assert_eq!(envelope.result, None);
            assert_eq!(envelope.error_count, None);
            assert_eq!(kept.status_code, code);
        }
    }

    #[test]
    fn test_redact_url_masks_access_token() {
        assert_eq!(
            redact_url("http://localhost/api/1/project/5/access_token/SECRET"),
            "http://localhost/api/1/project/5/access_token/****"
        );
        assert_eq!(
            redact_url("http://localhost/api/1/project/5/access_tokens"),
            "http://localhost/api/1/project/5/access_tokens"
        );
        assert_eq!(
            redact_url("http://localhost/api/1/team/1/project/2"),
            "http://localhost/api/1/team/1/project/2"
        );
    }

    #[test]
    fn test_build_rejects_token_with_whitespace() {
        let err = RollbarClient::builder()
            .account_token("acct")
            .project_token("proj token")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(!err.to_string().contains("proj token"));
    }

    #[test]
    fn test_build_requires_a_token() {
        let err = RollbarClient::builder().build().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_build_rejects_invalid_header() {
        let err = RollbarClient::builder()
            .account_token("acct")
            .header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_base_url_and_user_agent_defaults() {
        let client = RollbarClient::builder()
            .base_url("http://localhost:9999/api/1/")
            .account_token("acct")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/api/1");
        assert_eq!(client.request_url("/projects"), "http://localhost:9999/api/1/projects");
        assert_eq!(client.user_agent(), default_user_agent());
    }
}
