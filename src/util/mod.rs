//
//  rollbar-provider
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the API and resource layers.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`timestamp_to_datetime`]
//! - **Identifier Utilities**: [`generate_random_resource_id`], [`parse_composite_id`]
//! - **Logging**: [`init_logging`]
//!
//! ## Example
//!
//! ```rust
//! use rollbar_provider::util::parse_composite_id;
//!
//! let parts = parse_composite_id("12:backend", 2).unwrap();
//! assert_eq!(parts, vec!["12", "backend"]);
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::ApiError;

/// Environment variable holding the log filter, e.g. `debug` or
/// `rollbar_provider=trace`.
pub const LOG_ENV_VAR: &str = "ROLLBAR_DEBUG";

/// Separator used in composite resource identifiers.
pub const COMPOSITE_ID_SEPARATOR: char = ':';

/// Converts a Unix timestamp (seconds) into a UTC datetime.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
}

/// Generates an identifier for resources Rollbar does not identify itself.
///
/// The value is a random, non-zero decimal number. It carries no meaning
/// remotely and only has to be stable once stored in local state.
pub fn generate_random_resource_id() -> String {
    let value: u64 = rand::rng().random_range(1..=u64::MAX);
    value.to_string()
}

/// Splits a composite identifier such as `"12:34"` into exactly `parts`
/// segments.
///
/// The last segment keeps any further separators, so `"1:a:b"` split into
/// two parts is `["1", "a:b"]`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] when there are fewer than `parts`
/// segments or any segment is empty.
pub fn parse_composite_id(id: &str, parts: usize) -> Result<Vec<&str>, ApiError> {
    let segments: Vec<&str> = id.splitn(parts, COMPOSITE_ID_SEPARATOR).collect();

    if parts == 0 || segments.len() != parts || segments.iter().any(|s| s.is_empty()) {
        return Err(ApiError::InvalidRequest(format!(
            "invalid ID {:?}: expected {} parts separated by {:?}",
            id, parts, COMPOSITE_ID_SEPARATOR
        )));
    }

    Ok(segments)
}

/// Parses one segment of a composite identifier as a numeric ID.
pub fn parse_numeric_id(segment: &str) -> Result<u64, ApiError> {
    segment
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("{:?} is not a numeric ID", segment)))
}

/// Installs a `tracing` subscriber writing to stderr.
///
/// The filter is read from [`LOG_ENV_VAR`] and defaults to `warn`. Calling
/// this more than once is harmless: only the first subscriber is kept.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
