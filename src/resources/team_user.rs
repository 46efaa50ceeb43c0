//
//  rollbar-provider
//  resources/team_user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Team User Association Resource
//!
//! Puts an email address on a team. Rollbar decides how:
//!
//! - an address that belongs to an existing user is **added** right away
//! - any other address is **invited** and joins once the invitation is
//!   accepted
//!
//! The outcome becomes part of the identifier, `team_id:email:status`, and
//! decides how the association is read and deleted later.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::{require_result, user, ResourceId};
use crate::api::invitations::InviteOutcome;
use crate::api::teams::TeamInviteRequest;
use crate::api::{ApiError, RollbarClient};
use crate::util::{parse_composite_id, parse_numeric_id};

/// How the email address ended up on the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationStatus {
    Added,
    Invited,
}

impl AssociationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Invited => "invited",
        }
    }
}

impl fmt::Display for AssociationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssociationStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added" => Ok(Self::Added),
            "invited" => Ok(Self::Invited),
            other => Err(ApiError::InvalidRequest(format!(
                "unknown team user status {:?}",
                other
            ))),
        }
    }
}

/// Stored state of a team user association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamUserState {
    pub id: ResourceId,
    pub team_id: u64,
    pub email: String,
    pub status: AssociationStatus,
    /// Known once the address belongs to a Rollbar user.
    pub user_id: Option<u64>,
    pub invitation_id: Option<u64>,
    /// `pending`, `accepted`, ... for invited addresses.
    pub invitation_status: Option<String>,
}

/// Builds the `team_id:email:status` identifier.
pub fn association_id(team_id: u64, email: &str, status: AssociationStatus) -> ResourceId {
    ResourceId::Remote(format!("{}:{}:{}", team_id, email, status))
}

/// Invites `email` to a team and reads the association back.
pub async fn create(client: &RollbarClient, team_id: u64, email: &str) -> Result<TeamUserState> {
    tracing::debug!("Inviting or adding {} to team {}", email, team_id);

    let request = TeamInviteRequest {
        email: email.to_string(),
    };
    let (response, _) = client
        .teams()
        .invite_user(team_id, &request)
        .await
        .with_context(|| format!("Unable to invite/add {} to team {}", email, team_id))?;

    let (status, invitation_id) = match response.outcome() {
        InviteOutcome::Added => (AssociationStatus::Added, None),
        InviteOutcome::Invited(invitation) => (AssociationStatus::Invited, invitation.id),
        InviteOutcome::Unexpected => bail!(
            "Invited/added {} to team {} but the API response is not expected: \
             error count {:?}, message {:?}",
            email,
            team_id,
            response.error_count,
            response.message
        ),
    };

    tracing::info!("{} {} to team {}", status, email, team_id);

    read(client, &association_id(team_id, email, status), invitation_id).await
}

/// Refreshes an association.
///
/// Added users get their user ID looked up by email. Invitations get their
/// status refreshed, and once accepted the user ID as well.
pub async fn read(
    client: &RollbarClient,
    id: &ResourceId,
    invitation_id: Option<u64>,
) -> Result<TeamUserState> {
    let parts = parse_composite_id(id.as_str(), 3)?;
    let team_id = parse_numeric_id(parts[0])?;
    let email = parts[1].to_string();
    let status: AssociationStatus = parts[2].parse()?;

    let mut state = TeamUserState {
        id: id.clone(),
        team_id,
        email,
        status,
        user_id: None,
        invitation_id,
        invitation_status: None,
    };

    if status == AssociationStatus::Invited {
        let invite_id = invitation_id
            .ok_or_else(|| anyhow!("Association {} has no invitation ID", id))?;
        let (envelope, _) = client
            .invitations()
            .get(invite_id)
            .await
            .with_context(|| format!("Unable to retrieve invitation {}", invite_id))?;
        state.invitation_status = require_result(envelope, "invitation")?.status;
    }

    let accepted = state.invitation_status.as_deref() == Some("accepted");
    if status == AssociationStatus::Added || accepted {
        let found = user::find_by_email(client, &state.email)
            .await
            .with_context(|| format!("Cannot determine if {} exists in Rollbar", state.email))?;
        state.user_id = found.and_then(|u| u.id);
        if state.user_id.is_none() {
            tracing::warn!("No Rollbar user found with email {}", state.email);
        }
    }

    Ok(state)
}

/// Removes the address from the team.
///
/// A pending invitation is cancelled. Failing to cancel is only logged,
/// since a later invitation to the same address replaces the pending one.
pub async fn delete(client: &RollbarClient, state: &TeamUserState) -> Result<()> {
    match state.status {
        AssociationStatus::Invited => {
            let Some(invite_id) = state.invitation_id else {
                tracing::warn!("Association {} has no invitation to cancel", state.id);
                return Ok(());
            };

            tracing::debug!("Cancelling invitation {}", invite_id);
            match client.invitations().cancel(invite_id).await {
                Ok(_) => tracing::debug!("Cancelled invitation {}", invite_id),
                Err(e) => tracing::warn!("Could not cancel invitation {}: {}", invite_id, e),
            }
        }
        AssociationStatus::Added => {
            let user_id = state.user_id.ok_or_else(|| {
                anyhow!(
                    "Could not remove {} from team {}: user ID unknown",
                    state.email,
                    state.team_id
                )
            })?;

            tracing::debug!("Removing {} from team {}", state.email, state.team_id);
            client
                .teams()
                .remove_user(state.team_id, user_id)
                .await
                .with_context(|| {
                    format!("Could not remove {} from team {}", state.email, state.team_id)
                })?;
            tracing::debug!("Removed {} from team {}", state.email, state.team_id);
        }
    }

    Ok(())
}

/// Imports an existing membership from `team_id:email`.
///
/// Only users already on the team can be imported; pending invitations
/// cannot.
pub async fn import(client: &RollbarClient, import_id: &str) -> Result<TeamUserState> {
    let parts = parse_composite_id(import_id, 2)?;
    let team_id = parse_numeric_id(parts[0])?;
    let email = parts[1];

    let user_id = user::find_by_email(client, email)
        .await?
        .and_then(|u| u.id)
        .ok_or_else(|| anyhow!("Did not find an existing Rollbar user with email {}", email))?;

    let membership = client
        .teams()
        .is_user_member(team_id, user_id)
        .await
        .with_context(|| format!("Unable to check membership of {} in team {}", email, team_id))?;
    if !membership.is_present() {
        bail!(
            "Cannot import: user {} has not been added to team {}",
            user_id,
            team_id
        );
    }

    Ok(TeamUserState {
        id: association_id(team_id, email, AssociationStatus::Added),
        team_id,
        email: email.to_string(),
        status: AssociationStatus::Added,
        user_id: Some(user_id),
        invitation_id: None,
        invitation_status: None,
    })
}
