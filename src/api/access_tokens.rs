//
//  rollbar-provider
//  api/access_tokens.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Project Access Token API
//!
//! Project access tokens are what SDKs use to report items to a project.
//! The API is incomplete in two ways that shape this module:
//!
//! 1. There is no endpoint for a single token. [`ProjectAccessTokensService::get`]
//!    lists the project's tokens and scans for the requested one.
//! 2. There is no delete endpoint. A token is retired by rate limiting it to
//!    one call per 30 days, see [`UpdateAccessTokenRequest::invalidating`].
//!
//! ## API Endpoints
//!
//! ```text
//! GET   /project/{project_id}/access_tokens
//! POST  /project/{project_id}/access_tokens
//! PATCH /project/{project_id}/access_token/{access_token}
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! let request = UpdateAccessTokenRequest {
//!     rate_limit_window_size: Some(60),
//!     rate_limit_window_count: Some(500),
//! };
//! client.access_tokens().update(12, "abc123", &request).await?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Envelope, ListEnvelope, Response};
use crate::auth::TokenScope;

/// Rate limit window sizes (in seconds) accepted when creating a token.
pub const VALID_RATE_LIMIT_WINDOW_SIZES: [i64; 8] =
    [0, 60, 300, 1800, 3600, 86400, 604800, 2592000];

/// Window size used to retire a token: 30 days.
pub const INVALIDATED_WINDOW_SIZE: i64 = 2592000;

/// Call count used to retire a token.
pub const INVALIDATED_WINDOW_COUNT: i64 = 1;

/// Represents a project access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAccessToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    /// The token itself. This is the only stable key a token has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `enabled` or `disabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_count: Option<i64>,

    #[serde(
        rename = "cur_rate_limit_window_start",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_rate_limit_window_start: Option<i64>,

    #[serde(
        rename = "cur_rate_limit_window_count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_rate_limit_window_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

impl ProjectAccessToken {
    /// Returns `true` when the token's status is `enabled`.
    pub fn is_enabled(&self) -> bool {
        self.status.as_deref() == Some(AccessTokenStatus::Enabled.as_str())
    }
}

/// Permission scopes a project access token can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTokenScope {
    Read,
    Write,
    PostServerItem,
    PostClientItem,
}

impl AccessTokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::PostServerItem => "post_server_item",
            Self::PostClientItem => "post_client_item",
        }
    }
}

impl fmt::Display for AccessTokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTokenScope {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "post_server_item" => Ok(Self::PostServerItem),
            "post_client_item" => Ok(Self::PostClientItem),
            other => Err(ApiError::InvalidRequest(format!(
                "unsupported access token scope {:?}",
                other
            ))),
        }
    }
}

/// Status of a project access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTokenStatus {
    Enabled,
    Disabled,
}

impl AccessTokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for AccessTokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTokenStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            other => Err(ApiError::InvalidRequest(format!(
                "unsupported access token status {:?}",
                other
            ))),
        }
    }
}

/// Request body for creating a project access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAccessTokenRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<AccessTokenScope>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccessTokenStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_count: Option<i64>,
}

impl CreateAccessTokenRequest {
    /// Checks the rate limit window size against
    /// [`VALID_RATE_LIMIT_WINDOW_SIZES`].
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.rate_limit_window_size {
            Some(size) if !VALID_RATE_LIMIT_WINDOW_SIZES.contains(&size) => {
                Err(ApiError::InvalidRequest(format!(
                    "rate_limit_window_size {} is not one of {:?}",
                    size, VALID_RATE_LIMIT_WINDOW_SIZES
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Request body for changing a token's rate limit.
///
/// Rollbar rejects the call unless both fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateAccessTokenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_window_count: Option<i64>,
}

impl UpdateAccessTokenRequest {
    /// The rate limit that stands in for deleting a token.
    pub fn invalidating() -> Self {
        Self {
            rate_limit_window_size: Some(INVALIDATED_WINDOW_SIZE),
            rate_limit_window_count: Some(INVALIDATED_WINDOW_COUNT),
        }
    }

    /// Checks that both rate limit fields are set and at least 1.
    pub fn validate(&self) -> Result<(), ApiError> {
        let (Some(size), Some(count)) = (self.rate_limit_window_size, self.rate_limit_window_count)
        else {
            return Err(ApiError::InvalidRequest(
                "both rate_limit_window_size and rate_limit_window_count must be set".to_string(),
            ));
        };

        for (field, value) in [
            ("rate_limit_window_size", size),
            ("rate_limit_window_count", count),
        ] {
            if value < 1 {
                return Err(ApiError::InvalidRequest(format!(
                    "{} must be at least 1, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Finds the token whose value is exactly `access_token`.
pub fn find_token<'t>(
    tokens: &'t [ProjectAccessToken],
    access_token: &str,
) -> Option<&'t ProjectAccessToken> {
    tokens
        .iter()
        .find(|t| t.access_token.as_deref() == Some(access_token))
}

/// Project access token operations. Obtained through
/// [`RollbarClient::access_tokens`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectAccessTokensService<'a> {
    client: &'a RollbarClient,
}

impl<'a> ProjectAccessTokensService<'a> {
    const SCOPE: TokenScope = TokenScope::Account;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Lists all access tokens of a project.
    pub async fn list(
        &self,
        project_id: u64,
    ) -> Result<(ListEnvelope<ProjectAccessToken>, Response), ApiError> {
        self.client
            .get(
                Self::SCOPE,
                &format!("/project/{}/access_tokens", project_id),
            )
            .await
    }

    /// Gets one access token of a project by its value.
    ///
    /// The response returned is the one of the underlying listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no token matches.
    pub async fn get(
        &self,
        project_id: u64,
        access_token: &str,
    ) -> Result<(ProjectAccessToken, Response), ApiError> {
        let (envelope, response) = self.list(project_id).await?;

        match find_token(envelope.items(), access_token) {
            Some(token) => Ok((token.clone(), response)),
            None => Err(ApiError::NotFound(format!(
                "access token not found in project {}",
                project_id
            ))),
        }
    }

    /// Creates an access token.
    ///
    /// The request is validated before anything is sent.
    pub async fn create(
        &self,
        project_id: u64,
        request: &CreateAccessTokenRequest,
    ) -> Result<(Envelope<ProjectAccessToken>, Response), ApiError> {
        request.validate()?;
        self.client
            .post(
                Self::SCOPE,
                &format!("/project/{}/access_tokens", project_id),
                request,
            )
            .await
    }

    /// Updates the rate limit of an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] without making a request when
    /// either rate limit field is missing.
    pub async fn update(
        &self,
        project_id: u64,
        access_token: &str,
        request: &UpdateAccessTokenRequest,
    ) -> Result<(Envelope<ProjectAccessToken>, Response), ApiError> {
        request.validate()?;
        let path = format!(
            "/project/{}/access_token/{}",
            project_id,
            urlencoding::encode(access_token)
        );
        self.client.patch(Self::SCOPE, &path, request).await
    }
}
