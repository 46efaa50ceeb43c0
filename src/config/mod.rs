//
//  rollbar-provider
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module holds the provider configuration: the access tokens, extra
//! request headers, and the knobs of the HTTP client. It is the one place a
//! [`RollbarClient`] is built from.
//!
//! ## Sources
//!
//! Settings are merged from, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. a TOML file in the platform-specific configuration directory
//! 3. environment variables
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `ROLLBAR_ACCOUNT_ACCESS_TOKEN` | `account_access_token` |
//! | `ROLLBAR_PROJECT_ACCESS_TOKEN` | `project_access_token` |
//! | `ROLLBAR_API_HEADERS` | `headers`, as a JSON object |
//! | `ROLLBAR_API_BASE_URL` | `base_url` |
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/rollbar-provider/config.toml`
//! - **macOS**: `~/Library/Application Support/rollbar-provider/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\rollbar-provider\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! account_access_token = "..."
//! project_access_token = "..."
//! timeout_secs = 60
//! post_create_pd_integration_delete_default_rules = true
//!
//! [headers]
//! X-Team = "platform"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rollbar_provider::config::ProviderConfig;
//!
//! let config = ProviderConfig::load()?;
//! let client = config.build_client()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::RollbarClient;
use crate::auth::Credentials;

/// Environment variable for the account access token.
pub const ACCOUNT_TOKEN_ENV: &str = "ROLLBAR_ACCOUNT_ACCESS_TOKEN";

/// Environment variable for the project access token.
pub const PROJECT_TOKEN_ENV: &str = "ROLLBAR_PROJECT_ACCESS_TOKEN";

/// Environment variable for extra headers, as a JSON object of strings.
pub const HEADERS_ENV: &str = "ROLLBAR_API_HEADERS";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "ROLLBAR_API_BASE_URL";

/// Provider configuration.
///
/// # Examples
///
/// ```rust
/// use rollbar_provider::config::ProviderConfig;
///
/// let config: ProviderConfig = toml::from_str(r#"
///     account_access_token = "acct"
///     timeout_secs = 30
/// "#).unwrap();
///
/// assert_eq!(config.timeout_secs, Some(30));
/// assert!(!config.post_create_pd_integration_delete_default_rules);
/// ```
///
/// # Notes
///
/// - All fields use `#[serde(default)]`, so an empty file is valid
/// - `Debug` output never contains the tokens
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Token for account-level endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_access_token: Option<String>,

    /// Token for project-level endpoints (PagerDuty notifications).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_access_token: Option<String>,

    /// Extra headers sent with every request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Overrides the API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Overrides the User-Agent header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Delete the rules PagerDuty installs by default right after the
    /// integration is configured.
    #[serde(default)]
    pub post_create_pd_integration_delete_default_rules: bool,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| "****");
        f.debug_struct("ProviderConfig")
            .field("account_access_token", &redact(&self.account_access_token))
            .field("project_access_token", &redact(&self.project_access_token))
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "post_create_pd_integration_delete_default_rules",
                &self.post_create_pd_integration_delete_default_rules,
            )
            .finish()
    }
}

impl ProviderConfig {
    /// Loads the configuration file, if any, then applies the environment.
    ///
    /// A missing configuration file is not an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if config_exists(&path) {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Builds a configuration from the environment alone.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Reads a configuration file without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_config_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration as TOML to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies the process environment on top of the current values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Empty values are ignored. Headers from [`HEADERS_ENV`] are merged
    /// into the configured headers and win on conflicts.
    ///
    /// # Errors
    ///
    /// Returns an error when [`HEADERS_ENV`] is not a JSON object of strings.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = get(ACCOUNT_TOKEN_ENV) {
            self.account_access_token = Some(token);
        }
        if let Some(token) = get(PROJECT_TOKEN_ENV) {
            self.project_access_token = Some(token);
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = Some(base_url);
        }
        if let Some(raw) = get(HEADERS_ENV) {
            let headers: HashMap<String, String> = serde_json::from_str(&raw)
                .with_context(|| format!("{} must be a JSON object of strings", HEADERS_ENV))?;
            self.headers.extend(headers);
        }

        Ok(())
    }

    /// Returns the credentials described by this configuration.
    pub fn credentials(&self) -> Credentials {
        let mut credentials = Credentials::new();
        if let Some(token) = &self.account_access_token {
            credentials = credentials.with_account_token(token.as_str());
        }
        if let Some(token) = &self.project_access_token {
            credentials = credentials.with_project_token(token.as_str());
        }
        credentials
    }

    /// Builds the API client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither token is configured
    /// - `base_url` is not an absolute URL
    /// - A header name or value is invalid
    pub fn build_client(&self) -> Result<RollbarClient> {
        let mut builder = RollbarClient::builder()
            .credentials(self.credentials())
            .headers(self.headers.clone());

        if let Some(base_url) = &self.base_url {
            Url::parse(base_url).with_context(|| format!("Invalid base URL {:?}", base_url))?;
            builder = builder.base_url(base_url.as_str());
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to create Rollbar client")?;
        tracing::debug!("Rollbar client ready for {}", client.base_url());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| pairs.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ProviderConfig {
            account_access_token: Some("from-file".to_string()),
            ..Default::default()
        };
        config
            .apply_env_with(env(&[
                (ACCOUNT_TOKEN_ENV, "from-env"),
                (PROJECT_TOKEN_ENV, ""),
                (HEADERS_ENV, r#"{"X-Team": "platform"}"#),
            ]))
            .unwrap();

        assert_eq!(config.account_access_token.as_deref(), Some("from-env"));
        assert!(config.project_access_token.is_none());
        assert_eq!(config.headers.get("X-Team").map(String::as_str), Some("platform"));
    }

    #[test]
    fn test_invalid_headers_env() {
        let mut config = ProviderConfig::default();
        let result = config.apply_env_with(env(&[(HEADERS_ENV, "[1, 2]")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_client_requires_a_token() {
        assert!(ProviderConfig::default().build_client().is_err());
    }

    #[test]
    fn test_build_client_rejects_relative_base_url() {
        let config = ProviderConfig {
            account_access_token: Some("acct".to_string()),
            base_url: Some("api/1".to_string()),
            ..Default::default()
        };
        assert!(config.build_client().is_err());
    }

    #[test]
    fn test_build_client_applies_settings() {
        let config = ProviderConfig {
            project_access_token: Some("proj".to_string()),
            base_url: Some("http://localhost:1234/api/1".to_string()),
            user_agent: Some("custom/1.0".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let client = config.build_client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/api/1");
        assert_eq!(client.user_agent(), "custom/1.0");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = ProviderConfig {
            account_access_token: Some("secret-token".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("secret-token"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ProviderConfig {
            account_access_token: Some("acct".to_string()),
            headers: HashMap::from([("X-Team".to_string(), "platform".to_string())]),
            timeout_secs: Some(60),
            post_create_pd_integration_delete_default_rules: true,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(ProviderConfig::load_from(&path).unwrap(), config);
    }
}
