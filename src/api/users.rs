//
//  rollbar-provider
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar User API
//!
//! Users are read-only: they join an account by accepting a team invitation.
//!
//! ```text
//! GET /users
//! GET /user/{id}
//! GET /user/{id}/teams
//! GET /user/{id}/projects
//! ```

use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Envelope, ListEnvelope, Response};
use super::projects::Project;
use super::teams::Team;
use crate::auth::TokenScope;

/// Represents a user in Rollbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Returns `true` if the user's email matches `email`, ignoring case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email))
    }
}

/// User operations. Obtained through [`RollbarClient::users`].
#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    client: &'a RollbarClient,
}

impl<'a> UsersService<'a> {
    const SCOPE: TokenScope = TokenScope::Account;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Lists all users of the account.
    pub async fn list(&self) -> Result<(ListEnvelope<User>, Response), ApiError> {
        self.client.get(Self::SCOPE, "/users").await
    }

    /// Gets a single user.
    pub async fn get(&self, user_id: u64) -> Result<(Envelope<User>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/user/{}", user_id))
            .await
    }

    /// Lists the teams a user belongs to.
    pub async fn list_teams(
        &self,
        user_id: u64,
    ) -> Result<(ListEnvelope<Team>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/user/{}/teams", user_id))
            .await
    }

    /// Lists the projects a user can access.
    pub async fn list_projects(
        &self,
        user_id: u64,
    ) -> Result<(ListEnvelope<Project>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/user/{}/projects", user_id))
            .await
    }
}
