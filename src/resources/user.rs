//
//  rollbar-provider
//  resources/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User data source and email lookup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::require_result;
use crate::api::users::User;
use crate::api::RollbarClient;

/// State of the user data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub id: u64,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Reads a user by ID.
pub async fn read(client: &RollbarClient, id: u64) -> Result<UserState> {
    let (envelope, _) = client
        .users()
        .get(id)
        .await
        .with_context(|| format!("Failed to read user {}", id))?;
    let user = require_result(envelope, "user")?;

    Ok(UserState {
        id: user.id.unwrap_or(id),
        username: user.username,
        email: user.email,
    })
}

/// Finds the account user with the given email address.
///
/// Rollbar has no lookup by email, so this scans the full user list.
pub async fn find_by_email(client: &RollbarClient, email: &str) -> Result<Option<User>> {
    let (envelope, _) = client
        .users()
        .list()
        .await
        .context("Failed to list users")?;

    Ok(envelope.into_items().into_iter().find(|u| u.has_email(email)))
}
