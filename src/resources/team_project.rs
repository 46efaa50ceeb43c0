//
//  rollbar-provider
//  resources/team_project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Team project association resource, identified as `team_id:project_id`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::ResourceId;
use crate::api::RollbarClient;
use crate::util::{parse_composite_id, parse_numeric_id};

/// Stored state of a team project association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProjectState {
    pub id: ResourceId,
    pub team_id: u64,
    pub project_id: u64,
}

impl TeamProjectState {
    fn new(team_id: u64, project_id: u64) -> Self {
        Self {
            id: ResourceId::Remote(format!("{}:{}", team_id, project_id)),
            team_id,
            project_id,
        }
    }
}

/// Assigns a project to a team and verifies the assignment.
pub async fn create(client: &RollbarClient, team_id: u64, project_id: u64) -> Result<TeamProjectState> {
    tracing::debug!("Assigning project {} to team {}", project_id, team_id);

    let (envelope, _) = client
        .teams()
        .assign_project(team_id, project_id)
        .await
        .context("Unable to associate project to team")?;

    let assoc = envelope.into_result().unwrap_or_default();
    read(
        client,
        assoc.team_id.unwrap_or(team_id),
        assoc.project_id.unwrap_or(project_id),
    )
    .await
}

/// Verifies that the project is still assigned to the team.
///
/// # Errors
///
/// Fails when Rollbar reports the project is not on the team, and when the
/// check itself could not be made.
pub async fn read(client: &RollbarClient, team_id: u64, project_id: u64) -> Result<TeamProjectState> {
    let membership = client
        .teams()
        .has_project(team_id, project_id)
        .await
        .context("Unable to verify team project association")?;

    if !membership.is_present() {
        bail!("Could not find project {} on team {}", project_id, team_id);
    }

    Ok(TeamProjectState::new(team_id, project_id))
}

/// Removes the project from the team.
pub async fn delete(client: &RollbarClient, id: &ResourceId) -> Result<()> {
    let (team_id, project_id) = parse_id(id.as_str())?;

    tracing::debug!("Removing project {} from team {}", project_id, team_id);

    client
        .teams()
        .remove_project(team_id, project_id)
        .await
        .context("Unable to disassociate project from team")?;
    Ok(())
}

/// Imports an existing assignment from `team_id:project_id`.
pub async fn import(client: &RollbarClient, import_id: &str) -> Result<TeamProjectState> {
    let (team_id, project_id) = parse_id(import_id)?;
    read(client, team_id, project_id).await
}

fn parse_id(id: &str) -> Result<(u64, u64)> {
    let parts = parse_composite_id(id, 2)?;
    Ok((parse_numeric_id(parts[0])?, parse_numeric_id(parts[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("3:9").unwrap(), (3, 9));
        assert!(parse_id("3").is_err());
        assert!(parse_id("3:x").is_err());
    }

    #[test]
    fn test_state_id() {
        assert_eq!(TeamProjectState::new(3, 9).id.as_str(), "3:9");
    }
}
