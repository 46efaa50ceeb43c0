//
//  rollbar-provider
//  api/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Team API
//!
//! Teams group users and grant them access to projects. Besides the team
//! itself, this module covers the two relations hanging off a team:
//!
//! - **team ↔ user**: membership, added directly or through an invitation
//! - **team ↔ project**: project assignment
//!
//! ## API Endpoints
//!
//! ```text
//! GET/POST          /teams
//! GET/DELETE        /team/{team_id}
//! GET               /team/{team_id}/users
//! GET/PUT/DELETE    /team/{team_id}/user/{user_id}
//! GET/POST          /team/{team_id}/invites
//! GET               /team/{team_id}/projects
//! GET/PUT/DELETE    /team/{team_id}/project/{project_id}
//! ```
//!
//! ## Notes
//!
//! - Teams cannot be updated in place.
//! - The membership and assignment checks answer with a bare status code;
//!   see [`Membership`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Envelope, ListEnvelope, Membership, Response};
use super::invitations::{Invitation, InvitationResponse};
use super::users::User;
use crate::auth::TokenScope;

/// Represents a team in Rollbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// One of `standard`, `light` or `view`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
}

/// The access level a team grants its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Standard,
    Light,
    View,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Light => "light",
            Self::View => "view",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "light" => Ok(Self::Light),
            "view" => Ok(Self::View),
            other => Err(ApiError::InvalidRequest(format!(
                "unsupported access level {:?}, expected one of standard, light, view",
                other
            ))),
        }
    }
}

/// Request body for creating a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRequest {
    pub name: String,
    pub access_level: AccessLevel,
}

/// A team and project relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProjectAssoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

/// Request body for inviting an email address to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamInviteRequest {
    pub email: String,
}

/// Team operations. Obtained through [`RollbarClient::teams`].
///
/// Every call uses the account access token.
#[derive(Debug, Clone, Copy)]
pub struct TeamsService<'a> {
    client: &'a RollbarClient,
}

impl<'a> TeamsService<'a> {
    const SCOPE: TokenScope = TokenScope::Account;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Lists all teams.
    pub async fn list(&self) -> Result<(ListEnvelope<Team>, Response), ApiError> {
        self.client.get(Self::SCOPE, "/teams").await
    }

    /// Creates a team.
    pub async fn create(
        &self,
        request: &TeamRequest,
    ) -> Result<(Envelope<Team>, Response), ApiError> {
        self.client.post(Self::SCOPE, "/teams", request).await
    }

    /// Gets a single team.
    pub async fn get(&self, team_id: u64) -> Result<(Envelope<Team>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/team/{}", team_id))
            .await
    }

    /// Deletes a team.
    pub async fn delete(&self, team_id: u64) -> Result<Response, ApiError> {
        self.client
            .delete(Self::SCOPE, &format!("/team/{}", team_id))
            .await
    }

    /// Lists the users of a team.
    pub async fn list_users(
        &self,
        team_id: u64,
    ) -> Result<(ListEnvelope<User>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/team/{}/users", team_id))
            .await
    }

    /// Checks whether a user is a member of a team.
    ///
    /// Rollbar answers with a success status when the user belongs to the
    /// team and an error status otherwise.
    pub async fn is_user_member(&self, team_id: u64, user_id: u64) -> Result<Membership, ApiError> {
        let path = format!("/team/{}/user/{}", team_id, user_id);
        membership(self.client.get_raw(Self::SCOPE, &path).await)
    }

    /// Assigns a user to a team.
    pub async fn add_user(&self, team_id: u64, user_id: u64) -> Result<Response, ApiError> {
        self.client
            .put_raw::<()>(
                Self::SCOPE,
                &format!("/team/{}/user/{}", team_id, user_id),
                None,
            )
            .await
    }

    /// Removes a user from a team.
    pub async fn remove_user(&self, team_id: u64, user_id: u64) -> Result<Response, ApiError> {
        self.client
            .delete(Self::SCOPE, &format!("/team/{}/user/{}", team_id, user_id))
            .await
    }

    /// Invites an email address to a team.
    ///
    /// If the address belongs to an existing Rollbar user, they are added
    /// to the team immediately and the response only carries a message.
    /// Otherwise an invitation is created and returned. Use
    /// [`InvitationResponse::outcome`] to tell the two apart.
    pub async fn invite_user(
        &self,
        team_id: u64,
        request: &TeamInviteRequest,
    ) -> Result<(InvitationResponse, Response), ApiError> {
        self.client
            .post(Self::SCOPE, &format!("/team/{}/invites", team_id), request)
            .await
    }

    /// Lists the invitations of a team.
    pub async fn list_invitations(
        &self,
        team_id: u64,
    ) -> Result<(ListEnvelope<Invitation>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/team/{}/invites", team_id))
            .await
    }

    /// Lists the projects assigned to a team.
    pub async fn list_projects(
        &self,
        team_id: u64,
    ) -> Result<(ListEnvelope<TeamProjectAssoc>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/team/{}/projects", team_id))
            .await
    }

    /// Assigns a project to a team.
    pub async fn assign_project(
        &self,
        team_id: u64,
        project_id: u64,
    ) -> Result<(Envelope<TeamProjectAssoc>, Response), ApiError> {
        self.client
            .put::<_, ()>(
                Self::SCOPE,
                &format!("/team/{}/project/{}", team_id, project_id),
                None,
            )
            .await
    }

    /// Checks whether a project is assigned to a team.
    pub async fn has_project(&self, team_id: u64, project_id: u64) -> Result<Membership, ApiError> {
        let path = format!("/team/{}/project/{}", team_id, project_id);
        membership(self.client.get_raw(Self::SCOPE, &path).await)
    }

    /// Removes a project from a team.
    pub async fn remove_project(&self, team_id: u64, project_id: u64) -> Result<Response, ApiError> {
        self.client
            .delete(
                Self::SCOPE,
                &format!("/team/{}/project/{}", team_id, project_id),
            )
            .await
    }
}

/// Turns the result of a status-code-only check into a [`Membership`].
fn membership(result: Result<Response, ApiError>) -> Result<Membership, ApiError> {
    match result {
        Ok(response) => Ok(Membership::Present(response)),
        Err(ApiError::Status { response }) => Ok(Membership::Absent(*response)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_parse() {
        assert_eq!("light".parse::<AccessLevel>().unwrap(), AccessLevel::Light);
        assert!("admin".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn test_team_request_serialization() {
        let request = TeamRequest {
            name: "ops".to_string(),
            access_level: AccessLevel::View,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"name": "ops", "access_level": "view"})
        );
    }

    #[test]
    fn test_membership_from_status_error() {
        let response = Response {
            url: "u".to_string(),
            method: "GET".to_string(),
            status: "404 Not Found".to_string(),
            status_code: 404,
            body: String::new(),
        };
        let absent = membership(Err(ApiError::Status {
            response: Box::new(response.clone()),
        }))
        .unwrap();
        assert_eq!(absent, Membership::Absent(response));

        let failed = membership(Err(ApiError::InvalidRequest("x".to_string())));
        assert!(failed.is_err());
    }
}
