//
//  rollbar-provider
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for the Rollbar REST API
//!
//! This module provides the types shared by every Rollbar API service:
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Response`] - The normalized view of one HTTP exchange
//! - [`Envelope`] / [`ListEnvelope`] - The `{"err": .., "result": ..}` wrapper
//!   Rollbar puts around every payload
//! - [`Membership`] - Outcome of the status-code-only existence checks
//!
//! # Example
//!
//! ```rust
//! use rollbar_provider::api::common::{ApiError, Envelope};
//!
//! let json = r#"{"err": 0, "result": {"id": 7}}"#;
//! let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
//! assert_eq!(envelope.error_count, Some(0));
//! assert!(envelope.result.is_some());
//!
//! fn describe(err: &ApiError) -> String {
//!     match err.status_code() {
//!         Some(code) => format!("rollbar answered {}", code),
//!         None => err.to_string(),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::TokenScope;

/// Unified error type for all Rollbar API operations.
///
/// | Variant | Meaning | Network round-trip |
/// |---------|---------|--------------------|
/// | `Transport` | DNS, TLS, connection or timeout failure | attempted, no response |
/// | `Status` | Response status outside the accepted set | yes, response attached |
/// | `Decode` | A success body that is not the expected JSON | yes, response attached |
/// | `InvalidRequest` | A request invariant was violated locally | no |
/// | `NotFound` | A lookup-by-scan found nothing | yes (the listing) |
/// | `MissingToken` | No token configured for the required scope | no |
/// | `Config` | The client could not be constructed | no |
///
/// Nothing in this crate retries on any of these; the caller decides.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues. No response is available.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status code outside the accepted set.
    ///
    /// The message embeds the method, the decoded URL, the status code and
    /// the raw body. The full normalized response is kept for inspection.
    #[error(
        "{} {}: {} {}",
        .response.method,
        .response.url,
        .response.status_code,
        .response.body
    )]
    Status {
        /// The normalized response that failed classification.
        response: Box<Response>,
    },

    /// A successful response carried a body that could not be decoded.
    #[error("Failed to decode response of {} {}: {source}", .response.method, .response.url)]
    Decode {
        /// The underlying JSON error.
        source: serde_json::Error,
        /// The response whose body failed to decode.
        response: Box<Response>,
    },

    /// A request invariant was violated before any network call was made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource could not be found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The call requires a token that was not configured.
    #[error("No {0} access token configured")]
    MissingToken(TokenScope),

    /// The client configuration is invalid.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns the normalized response attached to this error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status { response } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status code attached to this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }

    /// Returns `true` for local lookup misses and for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || self.status_code() == Some(404)
    }
}

/// The normalized view of one HTTP exchange with Rollbar.
///
/// Returned alongside every decoded result, and attached to
/// [`ApiError::Status`] so callers can inspect failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The request URL, percent-decoded.
    pub url: String,
    /// The HTTP method that was used (e.g. `"GET"`).
    pub method: String,
    /// The status line, e.g. `"200 OK"`.
    pub status: String,
    /// The numeric status code.
    pub status_code: u16,
    /// The raw response body.
    pub body: String,
}

/// The envelope Rollbar wraps around every single-item payload.
///
/// ```json
/// {"err": 0, "result": {"id": 1, "name": "backend"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Rollbar's error counter, `0` on success.
    #[serde(rename = "err", default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<i64>,

    /// The payload itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Consumes the envelope and returns its payload.
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

impl<T> Envelope<Vec<T>> {
    /// Returns the listed items, or an empty slice when `result` is absent.
    pub fn items(&self) -> &[T] {
        self.result.as_deref().unwrap_or_default()
    }

    /// Returns `true` when the listing contains at least one item.
    pub fn has_results(&self) -> bool {
        !self.items().is_empty()
    }

    /// Consumes the envelope and returns the listed items.
    pub fn into_items(self) -> Vec<T> {
        self.result.unwrap_or_default()
    }
}

/// The envelope around list payloads: `{"err": 0, "result": [..]}`.
pub type ListEnvelope<T> = Envelope<Vec<T>>;

/// Outcome of a relation existence check.
///
/// Rollbar answers "is this user on this team?" and "is this project
/// assigned to this team?" with a bare status code. A success status means
/// the relation exists, an error status means it does not. Transport and
/// local failures are reported as errors instead, so "absent" is never
/// confused with "could not ask".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// The relation exists.
    Present(Response),
    /// The relation does not exist.
    Absent(Response),
}

impl Membership {
    /// Returns `true` when the relation exists.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns the response the decision was based on.
    pub fn response(&self) -> &Response {
        match self {
            Self::Present(r) | Self::Absent(r) => r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16) -> Response {
        Response {
            url: "https://api.rollbar.com/api/1/project/9".to_string(),
            method: "GET".to_string(),
            status: format!("{} Status", code),
            status_code: code,
            body: r#"{"err":1,"message":"nope"}"#.to_string(),
        }
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            response: Box::new(response(404)),
        };
        assert_eq!(
            err.to_string(),
            r#"GET https://api.rollbar.com/api/1/project/9: 404 {"err":1,"message":"nope"}"#
        );
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_local_errors_have_no_response() {
        let err = ApiError::InvalidRequest("bad".to_string());
        assert!(err.response().is_none());
        assert!(!err.is_not_found());
        assert!(ApiError::NotFound("token".to_string()).is_not_found());
    }

    #[test]
    fn test_list_envelope_without_result() {
        let envelope: ListEnvelope<u64> = serde_json::from_str(r#"{"err": 0}"#).unwrap();
        assert!(!envelope.has_results());
        assert!(envelope.items().is_empty());
    }

    #[test]
    fn test_envelope_round_trip_keeps_absent_fields_absent() {
        let envelope: Envelope<serde_json::Value> = Envelope {
            error_count: None,
            result: Some(serde_json::json!({"id": 3})),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"result":{"id":3}}"#);
        let back: Envelope<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn test_membership_accessors() {
        let present = Membership::Present(response(200));
        let absent = Membership::Absent(response(404));
        assert!(present.is_present());
        assert!(!absent.is_present());
        assert_eq!(absent.response().status_code, 404);
    }
}
