//
//  rollbar-provider
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Rollbar authenticates every API call with a single custom header,
//! `x-rollbar-access-token`, carrying one of two kinds of tokens:
//!
//! - **Account access tokens**: manage projects, teams, users, invitations
//!   and project access tokens.
//! - **Project access tokens**: scoped to one project, required by the
//!   notification (PagerDuty) endpoints.
//!
//! Each API service declares the [`TokenScope`] it needs. The matching token
//! is attached to the individual request by [`Credentials::apply_to_request`];
//! nothing is ever stored as a mutable default header on the shared HTTP
//! client, so a single [`RollbarClient`](crate::api::RollbarClient) can be
//! used concurrently for calls of both scopes.
//!
//! ## Example
//!
//! ```rust
//! use rollbar_provider::auth::{Credentials, TokenScope};
//!
//! let credentials = Credentials::new()
//!     .with_account_token("account-token")
//!     .with_project_token("project-token");
//!
//! assert!(credentials.token(TokenScope::Account).is_some());
//! assert!(credentials.token(TokenScope::Project).is_some());
//! ```

use std::fmt;

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Name of the header Rollbar reads the access token from.
pub const ROLLBAR_AUTH_HEADER: &str = "x-rollbar-access-token";

/// The kind of token an API call must be authenticated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    /// Account-level access token.
    Account,
    /// Project-level access token.
    Project,
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// An access token string.
///
/// The `Debug` implementation never prints the secret, so tokens can travel
/// inside structs that end up in `tracing` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value for use in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The pair of tokens a client may authenticate with.
///
/// Either token may be absent; calls that need a missing token fail locally
/// with [`ApiError::MissingToken`] before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    account: Option<AccessToken>,
    project: Option<AccessToken>,
}

impl Credentials {
    /// Creates an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account access token. Blank values are ignored.
    pub fn with_account_token(mut self, token: impl Into<String>) -> Self {
        self.account = non_blank(token.into());
        self
    }

    /// Sets the project access token. Blank values are ignored.
    pub fn with_project_token(mut self, token: impl Into<String>) -> Self {
        self.project = non_blank(token.into());
        self
    }

    /// Returns the token configured for `scope`, if any.
    pub fn token(&self, scope: TokenScope) -> Option<&AccessToken> {
        match scope {
            TokenScope::Account => self.account.as_ref(),
            TokenScope::Project => self.project.as_ref(),
        }
    }

    /// Returns `true` when neither token is configured.
    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.project.is_none()
    }

    /// Checks that every configured token is usable as a header value.
    ///
    /// This does not check whether Rollbar accepts the tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] naming the scope of a token that contains
    /// whitespace. The token itself is never part of the message.
    pub fn validate(&self) -> Result<(), ApiError> {
        for scope in [TokenScope::Account, TokenScope::Project] {
            if let Some(token) = self.token(scope) {
                if token.expose().chars().any(char::is_whitespace) {
                    return Err(ApiError::Config(format!(
                        "the {} access token must not contain whitespace",
                        scope
                    )));
                }
            }
        }
        Ok(())
    }

    /// Attaches the token for `scope` to a single request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when no token is configured for
    /// the requested scope.
    pub fn apply_to_request(
        &self,
        scope: TokenScope,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self.token(scope).ok_or(ApiError::MissingToken(scope))?;
        Ok(request.header(ROLLBAR_AUTH_HEADER, token.expose()))
    }
}

fn non_blank(token: String) -> Option<AccessToken> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(AccessToken::new(trimmed))
    }
}
