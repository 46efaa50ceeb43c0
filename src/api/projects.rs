//
//  rollbar-provider
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Project API
//!
//! Types and operations for Rollbar projects.
//!
//! ## API Endpoints
//!
//! ```text
//! GET    /projects
//! POST   /projects
//! GET    /project/{id}
//! DELETE /project/{id}
//! ```
//!
//! ## Notes
//!
//! - Projects cannot be updated through the API; changing a project means
//!   deleting it and creating a new one.
//! - Deleted projects stay in the listing with an empty name until Rollbar
//!   purges them. [`ProjectsService::list`] hides them,
//!   [`ProjectsService::list_all`] does not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Envelope, ListEnvelope, Response};
use crate::auth::TokenScope;
use crate::util::timestamp_to_datetime;

/// Represents a Rollbar project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique numeric identifier assigned by Rollbar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The account the project belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    /// Project status, e.g. `"enabled"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Creation time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,

    /// Last modification time as a Unix timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<i64>,

    /// Project name. Empty for soft-deleted projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Project settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_data: Option<ProjectSettings>,
}

impl Project {
    /// Returns `false` for projects Rollbar has soft-deleted.
    ///
    /// A deleted project is still listed, but without a name.
    pub fn is_active(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Returns the creation time, if known.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.date_created.and_then(timestamp_to_datetime)
    }
}

/// A project's settings data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Fingerprinting versions per platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_versions: Option<FingerprintVersions>,

    /// Migration flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrations: Option<ProjectMigrations>,
}

/// Fingerprint versions in a project's settings data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintVersions {
    #[serde(
        rename = "browser.browser-js",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub browser_browser_js: Option<i64>,

    #[serde(
        rename = "android.android",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub android_android: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unminify_react_errors: Option<i64>,
}

/// Migration flags in a project's settings data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMigrations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_source_maps: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_custom_fingerprinting_override: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognize_direct_recursion: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_missing_jquery: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_calculate_symbol_ranges: Option<i64>,
}

/// Request body for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRequest {
    /// Name of the new project.
    pub name: String,
}

/// Keeps only the projects that have not been soft-deleted.
pub fn active_projects(projects: Vec<Project>) -> Vec<Project> {
    projects.into_iter().filter(Project::is_active).collect()
}

/// Project operations. Obtained through [`RollbarClient::projects`].
///
/// Every call uses the account access token.
#[derive(Debug, Clone, Copy)]
pub struct ProjectsService<'a> {
    client: &'a RollbarClient,
}

impl<'a> ProjectsService<'a> {
    const SCOPE: TokenScope = TokenScope::Account;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Lists all projects that have not been deleted.
    pub async fn list(&self) -> Result<(ListEnvelope<Project>, Response), ApiError> {
        let (mut envelope, response) = self.list_all().await?;
        envelope.result = envelope.result.map(active_projects);
        Ok((envelope, response))
    }

    /// Lists all projects, including soft-deleted ones.
    pub async fn list_all(&self) -> Result<(ListEnvelope<Project>, Response), ApiError> {
        self.client.get(Self::SCOPE, "/projects").await
    }

    /// Gets a single project.
    pub async fn get(&self, id: u64) -> Result<(Envelope<Project>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/project/{}", id))
            .await
    }

    /// Creates a project.
    pub async fn create(
        &self,
        request: &ProjectRequest,
    ) -> Result<(Envelope<Project>, Response), ApiError> {
        self.client.post(Self::SCOPE, "/projects", request).await
    }

    /// Deletes a project.
    pub async fn delete(&self, id: u64) -> Result<Response, ApiError> {
        self.client
            .delete(Self::SCOPE, &format!("/project/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Project {
        Project {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_active_projects_drops_deleted() {
        let projects = vec![named(""), named("a"), named(""), named("b")];
        let names: Vec<_> = active_projects(projects)
            .into_iter()
            .filter_map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_project_without_name_is_inactive() {
        assert!(!Project::default().is_active());
    }

    #[test]
    fn test_project_envelope_round_trip() {
        let json = r#"{
            "err": 0,
            "result": {
                "id": 12,
                "account_id": 3,
                "status": "enabled",
                "date_created": 1700000000,
                "date_modified": 1700000100,
                "name": "backend",
                "settings_data": {
                    "fingerprint_versions": {"browser.browser-js": 2, "android.android": 1},
                    "migrations": {"enable_source_maps": 1}
                }
            }
        }"#;
        let envelope: Envelope<Project> = serde_json::from_str(json).unwrap();
        let project = envelope.result.clone().unwrap();
        assert_eq!(project.id, Some(12));
        assert_eq!(
            project
                .settings_data
                .as_ref()
                .and_then(|s| s.fingerprint_versions.as_ref())
                .and_then(|f| f.browser_browser_js),
            Some(2)
        );
        assert!(project.created_at().is_some());

        let encoded = serde_json::to_string(&envelope).unwrap();
        let decoded: Envelope<Project> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, envelope);
    }
}
