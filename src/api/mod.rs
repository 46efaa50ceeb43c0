//
//  rollbar-provider
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Rollbar REST API
//! (`https://api.rollbar.com/api/1`).
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client, response classification and JSON decoding
//! - [`common`]: Shared types (errors, normalized responses, envelopes)
//! - one module per resource family, each exposing a service borrowed from
//!   the client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rollbar_provider::api::RollbarClient;
//!
//! # async fn run() -> Result<(), rollbar_provider::api::ApiError> {
//! let client = RollbarClient::builder()
//!     .account_token("account-token")
//!     .build()?;
//!
//! let (projects, _response) = client.projects().list().await?;
//! for project in projects.items() {
//!     println!("{:?}", project.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Status errors keep the normalized
//! [`Response`], so the status code and body stay available to the caller.

/// Core HTTP client wrapper for the Rollbar API.
///
/// Provides the [`RollbarClient`] struct which handles:
/// - Per-request authentication header selection
/// - Request/response serialization
/// - Status code classification
pub mod client;

/// Types shared by every service.
pub mod common;

/// Project access tokens.
pub mod access_tokens;

/// Team invitations.
pub mod invitations;

/// PagerDuty integration and notification rules.
pub mod notifications;

/// Projects.
pub mod projects;

/// Teams, team members and team projects.
pub mod teams;

/// Users.
pub mod users;

pub use client::{check_response, decode_response, redact_url, RollbarClient, RollbarClientBuilder};

pub use common::{ApiError, Envelope, ListEnvelope, Membership, Response};
