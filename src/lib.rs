//
//  rollbar-provider
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Provider Library
//!
//! Manage Rollbar projects, teams, project access tokens and PagerDuty
//! notifications as declarative resources.
//!
//! ## Overview
//!
//! The crate is built in two layers:
//!
//! - an async REST client for the Rollbar API that picks the right access
//!   token for every call and classifies each response
//! - a resource layer with create/read/update/delete/import functions and
//!   typed state for each resource, built on that client
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and per-resource services
//! - [`auth`]: Access tokens and token scopes
//! - [`config`]: Provider configuration from file and environment
//! - [`resources`]: Resource lifecycle functions and data sources
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rollbar_provider::config::ProviderConfig;
//! use rollbar_provider::resources::project;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ProviderConfig::load()?;
//! let client = config.build_client()?;
//!
//! let state = project::create(&client, "backend").await?;
//! println!("created project {}", state.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Token Scopes
//!
//! | Resource | Token |
//! |----------|-------|
//! | Projects, teams, users, invitations | Account |
//! | Project access tokens | Account |
//! | PagerDuty integration and rules | Project |

/// API client for Rollbar.
///
/// Handles authentication, request building, response classification and
/// JSON decoding for every endpoint the resources need.
pub mod api;

/// Access tokens and token scopes.
pub mod auth;

/// Provider configuration.
///
/// Settings are read from a TOML file stored in a platform-specific
/// location and can be overridden through environment variables:
/// - Linux: `~/.config/rollbar-provider/config.toml`
/// - macOS: `~/Library/Application Support/rollbar-provider/config.toml`
/// - Windows: `%APPDATA%\rollbar-provider\config.toml`
pub mod config;

/// Resource lifecycle functions and data sources.
pub mod resources;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main API client.
pub use api::RollbarClient;

/// Re-export of the provider configuration.
///
/// # Example
///
/// ```rust,no_run
/// use rollbar_provider::ProviderConfig;
///
/// let config = ProviderConfig::load().expect("Failed to load config");
/// let client = config.build_client().expect("Failed to build client");
/// ```
pub use config::ProviderConfig;

/// Application name, used for the default User-Agent and the
/// configuration directory.
pub const APP_NAME: &str = "rollbar-provider";

/// Library version, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use rollbar_provider::VERSION;
///
/// println!("rollbar-provider {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
