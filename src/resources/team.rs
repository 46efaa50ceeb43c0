//
//  rollbar-provider
//  resources/team.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Team resource and the team-by-id data source.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{require_result, validate_name, ResourceId};
use crate::api::teams::{AccessLevel, Team, TeamRequest};
use crate::api::RollbarClient;
use crate::util::parse_numeric_id;

/// Stored state of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub id: u64,
    pub name: String,
    pub access_level: Option<String>,
    pub account_id: Option<u64>,
}

impl TeamState {
    fn from_team(id: u64, team: Team) -> Self {
        Self {
            id: team.id.unwrap_or(id),
            name: team.name.unwrap_or_default(),
            access_level: team.access_level,
            account_id: team.account_id,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        ResourceId::remote(self.id)
    }
}

/// Creates a team and reads it back.
pub async fn create(
    client: &RollbarClient,
    name: &str,
    access_level: AccessLevel,
) -> Result<TeamState> {
    validate_name(name)?;

    tracing::debug!("Creating new team {} with access level {}", name, access_level);

    let request = TeamRequest {
        name: name.to_string(),
        access_level,
    };
    let (envelope, _) = client
        .teams()
        .create(&request)
        .await
        .with_context(|| format!("Failed to create team {}", name))?;
    let id = require_result(envelope, "team")?
        .id
        .with_context(|| format!("Rollbar returned no ID for new team {}", name))?;

    tracing::debug!("Created new team {} with id {}", name, id);

    read(client, id).await
}

/// Reads a team.
///
/// This is also the team data source.
pub async fn read(client: &RollbarClient, id: u64) -> Result<TeamState> {
    let (envelope, _) = client
        .teams()
        .get(id)
        .await
        .with_context(|| format!("Failed to read team {}", id))?;
    Ok(TeamState::from_team(id, require_result(envelope, "team")?))
}

/// Deletes a team.
pub async fn delete(client: &RollbarClient, id: u64) -> Result<()> {
    tracing::debug!("Deleting team {}", id);

    client
        .teams()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete team {}", id))?;

    tracing::debug!("Deleted team {}", id);
    Ok(())
}

/// Imports an existing team by its numeric ID.
pub async fn import(client: &RollbarClient, id: &str) -> Result<TeamState> {
    read(client, parse_numeric_id(id)?).await
}
