//
//  rollbar-provider
//  api/invitations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Invitation API
//!
//! Invitations are created through
//! [`TeamsService::invite_user`](super::teams::TeamsService::invite_user)
//! and tracked here until they are accepted or cancelled.
//!
//! ## API Endpoints
//!
//! ```text
//! GET    /invite/{id}
//! DELETE /invite/{id}
//! ```
//!
//! ## The invite response
//!
//! Inviting an email address has two possible outcomes, and Rollbar signals
//! which one happened only through the shape of the body:
//!
//! ```json
//! {"err": 0, "message": "The given email address has been added to the team"}
//! {"err": 0, "result": {"id": 9, "to_email": "a@b.c", "status": "pending"}}
//! ```
//!
//! [`InvitationResponse::outcome`] turns this into an [`InviteOutcome`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Envelope, Response};
use crate::auth::TokenScope;

/// Message Rollbar returns when the invited address already has an account.
static ADDED_MESSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"given email address has been added").expect("Invalid regex")
});

/// Represents an invitation to a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_email: Option<String>,

    /// `pending`, `accepted`, `rejected` or `canceled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_redeemed: Option<i64>,
}

impl Invitation {
    /// Returns `true` once the invitee has accepted.
    pub fn is_accepted(&self) -> bool {
        self.status.as_deref() == Some("accepted")
    }
}

/// Body returned by `POST /team/{id}/invites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationResponse {
    #[serde(rename = "err", default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Invitation>,
}

/// What happened when an email address was invited to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// The address belongs to an existing user, who was added directly.
    Added,
    /// An invitation was sent.
    Invited(Invitation),
    /// Neither a known message nor an invitation came back.
    Unexpected,
}

impl InviteOutcome {
    /// The status recorded for a team/user association.
    pub fn status(&self) -> Option<&'static str> {
        match self {
            Self::Added => Some("added"),
            Self::Invited(_) => Some("invited"),
            Self::Unexpected => None,
        }
    }
}

impl InvitationResponse {
    /// Classifies the response.
    ///
    /// A populated `result` wins over the message.
    pub fn outcome(&self) -> InviteOutcome {
        if let Some(invitation) = &self.result {
            return InviteOutcome::Invited(invitation.clone());
        }

        match &self.message {
            Some(message) if ADDED_MESSAGE_RE.is_match(message) => InviteOutcome::Added,
            _ => InviteOutcome::Unexpected,
        }
    }
}

/// Invitation operations. Obtained through [`RollbarClient::invitations`].
#[derive(Debug, Clone, Copy)]
pub struct InvitationsService<'a> {
    client: &'a RollbarClient,
}

impl<'a> InvitationsService<'a> {
    const SCOPE: TokenScope = TokenScope::Account;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Gets a single invitation.
    pub async fn get(&self, invite_id: u64) -> Result<(Envelope<Invitation>, Response), ApiError> {
        self.client
            .get(Self::SCOPE, &format!("/invite/{}", invite_id))
            .await
    }

    /// Cancels a pending invitation.
    pub async fn cancel(&self, invite_id: u64) -> Result<Response, ApiError> {
        self.client
            .delete(Self::SCOPE, &format!("/invite/{}", invite_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_added() {
        let response: InvitationResponse = serde_json::from_str(
            r#"{"err": 0, "message": "The given email address has been added to the team"}"#,
        )
        .unwrap();
        assert_eq!(response.outcome(), InviteOutcome::Added);
        assert_eq!(response.outcome().status(), Some("added"));
    }

    #[test]
    fn test_outcome_invited() {
        let response: InvitationResponse = serde_json::from_str(
            r#"{"err": 0, "result": {"id": 9, "team_id": 4, "to_email": "a@b.c", "status": "pending"}}"#,
        )
        .unwrap();
        match response.outcome() {
            InviteOutcome::Invited(invitation) => {
                assert_eq!(invitation.id, Some(9));
                assert!(!invitation.is_accepted());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_outcome_unexpected() {
        let response: InvitationResponse =
            serde_json::from_str(r#"{"err": 0, "message": "something else"}"#).unwrap();
        assert_eq!(response.outcome(), InviteOutcome::Unexpected);
        assert_eq!(InvitationResponse::default().outcome(), InviteOutcome::Unexpected);
    }
}
