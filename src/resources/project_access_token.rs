//
//  rollbar-provider
//  resources/project_access_token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Project Access Token Resource
//!
//! Rollbar gives project access tokens no identifier other than the token
//! value, which is a secret. The resource therefore gets a synthetic ID and
//! keeps the token value in its state to find the remote token again.
//!
//! Deleting is not supported by the API either. [`delete`] rate limits the
//! token to one call per 30 days instead; the token itself has to be removed
//! in the Rollbar UI.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{require_result, ResourceId};
use crate::api::access_tokens::{
    AccessTokenScope, AccessTokenStatus, CreateAccessTokenRequest, ProjectAccessToken,
    UpdateAccessTokenRequest,
};
use crate::api::RollbarClient;
use crate::util::{parse_composite_id, parse_numeric_id};

/// Desired configuration of a new token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAccessTokenConfig {
    pub project_id: u64,
    pub name: String,
    pub scopes: Vec<AccessTokenScope>,
    pub status: AccessTokenStatus,
    pub rate_limit_window_size: Option<i64>,
    pub rate_limit_window_count: Option<i64>,
}

/// Stored state of a project access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAccessTokenState {
    pub id: ResourceId,
    pub project_id: u64,
    pub name: Option<String>,
    pub scopes: Vec<String>,
    pub status: Option<String>,
    pub rate_limit_window_size: Option<i64>,
    pub rate_limit_window_count: Option<i64>,
    pub cur_rate_limit_window_count: Option<i64>,
    pub date_created: Option<i64>,
    pub access_token: String,
}

impl fmt::Debug for ProjectAccessTokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectAccessTokenState")
            .field("id", &self.id)
            .field("project_id", &self.project_id)
            .field("name", &self.name)
            .field("scopes", &self.scopes)
            .field("status", &self.status)
            .field("rate_limit_window_size", &self.rate_limit_window_size)
            .field("rate_limit_window_count", &self.rate_limit_window_count)
            .field("cur_rate_limit_window_count", &self.cur_rate_limit_window_count)
            .field("date_created", &self.date_created)
            .field("access_token", &"****")
            .finish()
    }
}

impl ProjectAccessTokenState {
    fn from_token(id: ResourceId, project_id: u64, access_token: &str, token: ProjectAccessToken) -> Self {
        Self {
            id,
            project_id: token.project_id.unwrap_or(project_id),
            name: token.name,
            scopes: token.scopes,
            status: token.status,
            rate_limit_window_size: token.rate_limit_window_size,
            rate_limit_window_count: token.rate_limit_window_count,
            cur_rate_limit_window_count: token.current_rate_limit_window_count,
            date_created: token.date_created,
            access_token: token
                .access_token
                .unwrap_or_else(|| access_token.to_string()),
        }
    }
}

/// Creates a token and reads it back.
///
/// The rate limit window size is checked against the values Rollbar accepts
/// on creation before anything is sent.
pub async fn create(
    client: &RollbarClient,
    config: &ProjectAccessTokenConfig,
) -> Result<ProjectAccessTokenState> {
    let request = CreateAccessTokenRequest {
        name: config.name.clone(),
        scopes: config.scopes.clone(),
        status: Some(config.status),
        rate_limit_window_size: config.rate_limit_window_size,
        rate_limit_window_count: config.rate_limit_window_count,
    };
    request.validate()?;

    tracing::debug!(
        "Creating project access token {} in project {}",
        config.name,
        config.project_id
    );

    let (envelope, _) = client
        .access_tokens()
        .create(config.project_id, &request)
        .await
        .with_context(|| format!("Failed to create project access token {}", config.name))?;
    let access_token = require_result(envelope, "project access token")?
        .access_token
        .context("Rollbar returned no token value for the new project access token")?;

    tracing::debug!("Created project access token {}", config.name);

    read(client, ResourceId::synthetic(), config.project_id, &access_token).await
}

/// Reads a token by its value.
pub async fn read(
    client: &RollbarClient,
    id: ResourceId,
    project_id: u64,
    access_token: &str,
) -> Result<ProjectAccessTokenState> {
    let (token, _) = client
        .access_tokens()
        .get(project_id, access_token)
        .await
        .with_context(|| format!("Failed to read project access token {}", id))?;

    Ok(ProjectAccessTokenState::from_token(
        id,
        project_id,
        access_token,
        token,
    ))
}

/// Changes the rate limit of a token and reads it back.
///
/// Rollbar requires both values and each must be at least 1; anything else
/// fails before any request.
pub async fn update(
    client: &RollbarClient,
    state: &ProjectAccessTokenState,
    rate_limit_window_size: Option<i64>,
    rate_limit_window_count: Option<i64>,
) -> Result<ProjectAccessTokenState> {
    let request = UpdateAccessTokenRequest {
        rate_limit_window_size,
        rate_limit_window_count,
    };

    let (envelope, _) = client
        .access_tokens()
        .update(state.project_id, &state.access_token, &request)
        .await
        .with_context(|| format!("Failed to update project access token {}", state.id))?;

    tracing::debug!(
        "Updated project access token {}",
        envelope
            .result
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or_default()
    );

    read(client, state.id.clone(), state.project_id, &state.access_token).await
}

/// Retires a token by rate limiting it to one call per 30 days.
pub async fn delete(client: &RollbarClient, state: &ProjectAccessTokenState) -> Result<()> {
    tracing::debug!("Invalidating project access token {}", state.id);

    client
        .access_tokens()
        .update(
            state.project_id,
            &state.access_token,
            &UpdateAccessTokenRequest::invalidating(),
        )
        .await
        .with_context(|| format!("Failed to invalidate project access token {}", state.id))?;

    tracing::warn!(
        "Project access token {} is rate limited but still exists; remove it in the Rollbar UI",
        state.id
    );
    Ok(())
}

/// Imports a token from `project_id:access_token`.
pub async fn import(client: &RollbarClient, import_id: &str) -> Result<ProjectAccessTokenState> {
    let parts = parse_composite_id(import_id, 2)?;
    let project_id = parse_numeric_id(parts[0])?;
    read(client, ResourceId::synthetic(), project_id, parts[1]).await
}

/// Data source: the enabled tokens of a project, keyed by name.
pub async fn enabled_tokens(
    client: &RollbarClient,
    project_id: u64,
) -> Result<BTreeMap<String, String>> {
    let (envelope, _) = client
        .access_tokens()
        .list(project_id)
        .await
        .with_context(|| format!("Failed to list access tokens of project {}", project_id))?;

    Ok(enabled_token_map(envelope.into_items()))
}

fn enabled_token_map(tokens: Vec<ProjectAccessToken>) -> BTreeMap<String, String> {
    tokens
        .into_iter()
        .filter(ProjectAccessToken::is_enabled)
        .filter_map(|t| Some((t.name?, t.access_token?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str, value: &str, status: &str) -> ProjectAccessToken {
        ProjectAccessToken {
            name: Some(name.to_string()),
            access_token: Some(value.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_enabled_token_map_skips_disabled() {
        let map = enabled_token_map(vec![
            token("read", "r1", "enabled"),
            token("write", "w1", "disabled"),
            token("post_server_item", "p1", "enabled"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("read").map(String::as_str), Some("r1"));
        assert!(!map.contains_key("write"));
    }

    #[test]
    fn test_state_debug_hides_token() {
        let state = ProjectAccessTokenState::from_token(
            ResourceId::Synthetic("1".to_string()),
            5,
            "secret-value",
            ProjectAccessToken::default(),
        );
        assert_eq!(state.access_token, "secret-value");
        assert_eq!(state.project_id, 5);
        assert!(!format!("{:?}", state).contains("secret-value"));
    }
}
