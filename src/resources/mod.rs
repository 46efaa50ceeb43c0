//
//  rollbar-provider
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Resource Layer
//!
//! Lifecycle functions (create, read, update, delete, import) and data
//! sources for every resource the provider manages. Each function takes a
//! [`RollbarClient`](crate::api::RollbarClient), performs the API calls the
//! lifecycle step needs and returns typed state.
//!
//! ## Resources
//!
//! | Module | Resource | Identifier |
//! |--------|----------|------------|
//! | [`project`] | Project | Rollbar project ID |
//! | [`team`] | Team | Rollbar team ID |
//! | [`user`] | User (data source only) | Rollbar user ID |
//! | [`project_access_token`] | Project access token | synthetic |
//! | [`team_user`] | Team membership or invitation | `team_id:email:status` |
//! | [`team_project`] | Team project assignment | `team_id:project_id` |
//! | [`pagerduty`] | PagerDuty integration and rules | synthetic |
//!
//! ## Identifiers
//!
//! Some resources have no identifier on the Rollbar side at all. Those get a
//! random [`ResourceId::Synthetic`] identifier when created, and the remote
//! object is found again through other attributes.
//!
//! ## Errors
//!
//! Functions return `anyhow::Result`. The underlying
//! [`ApiError`](crate::api::ApiError) is kept as the error source, so callers
//! can still `downcast_ref` it to inspect the status code.

use std::fmt;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, Envelope};
use crate::util::generate_random_resource_id;

pub mod pagerduty;
pub mod project;
pub mod project_access_token;
pub mod team;
pub mod team_project;
pub mod team_user;
pub mod user;

/// Pattern project and team names must match.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][0-9A-Za-z,.\-_]{1,31}$").expect("Invalid regex"));

/// Identity of a resource in local state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResourceId {
    /// Derived from identifiers Rollbar assigned.
    Remote(String),
    /// Generated locally because Rollbar has no identifier for the resource.
    Synthetic(String),
}

impl ResourceId {
    /// A remote identifier from a numeric Rollbar ID.
    pub fn remote(id: impl ToString) -> Self {
        Self::Remote(id.to_string())
    }

    /// A freshly generated synthetic identifier.
    pub fn synthetic() -> Self {
        Self::Synthetic(generate_random_resource_id())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote(id) | Self::Synthetic(id) => id,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a project or team name.
///
/// Names start with a letter, contain only letters, digits, `,`, `.`, `-`
/// and `_`, and are 2 to 32 characters long.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(format!(
            "invalid name {:?}: must start with a letter and can only contain letters, numbers, \
             underscores, hyphens, and periods. Max length 32 characters",
            name
        )))
    }
}

/// Unwraps the payload of an envelope Rollbar answered with.
pub(crate) fn require_result<T>(envelope: Envelope<T>, what: &str) -> Result<T> {
    envelope
        .into_result()
        .ok_or_else(|| anyhow!("Rollbar returned no {} in its response", what))
}
