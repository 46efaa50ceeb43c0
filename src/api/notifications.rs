//
//  rollbar-provider
//  api/notifications.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Rollbar Notification API (PagerDuty)
//!
//! Configures the PagerDuty integration of the project the project access
//! token belongs to. Both endpoints are write-only: there is no way to read
//! the current integration or rule set back, and every call overwrites what
//! is stored remotely.
//!
//! ```text
//! PUT /notifications/pagerduty
//! PUT /notifications/pagerduty/rules
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::RollbarClient;
use super::common::{ApiError, Response};
use crate::auth::TokenScope;

/// Length of a PagerDuty service integration key.
pub const PAGERDUTY_SERVICE_KEY_LEN: usize = 32;

/// Checks that `service_key` has the length PagerDuty issues.
pub fn validate_service_key(service_key: &str) -> Result<(), ApiError> {
    if service_key.chars().count() != PAGERDUTY_SERVICE_KEY_LEN {
        return Err(ApiError::InvalidRequest(format!(
            "PagerDuty service key must be {} characters long",
            PAGERDUTY_SERVICE_KEY_LEN
        )));
    }
    Ok(())
}

/// Request body for configuring the PagerDuty integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyIntegrationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_key: String,
}

/// Events a PagerDuty notification rule can fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagerDutyTrigger {
    NewItem,
    OccurrenceRate,
    ResolvedItem,
    ReactivatedItem,
    ExpRepeatItem,
}

impl PagerDutyTrigger {
    pub const ALL: [PagerDutyTrigger; 5] = [
        Self::NewItem,
        Self::OccurrenceRate,
        Self::ResolvedItem,
        Self::ReactivatedItem,
        Self::ExpRepeatItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewItem => "new_item",
            Self::OccurrenceRate => "occurrence_rate",
            Self::ResolvedItem => "resolved_item",
            Self::ReactivatedItem => "reactivated_item",
            Self::ExpRepeatItem => "exp_repeat_item",
        }
    }
}

impl fmt::Display for PagerDutyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PagerDutyTrigger {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ApiError::InvalidRequest(format!("unsupported trigger {:?}", s)))
    }
}

/// Item attributes a rule filter can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagerDutyFilterType {
    Environment,
    Level,
    Title,
    Filename,
    Context,
    Method,
    Framework,
    Path,
    Rate,
    UniqueOccurrences,
}

impl PagerDutyFilterType {
    pub const ALL: [PagerDutyFilterType; 10] = [
        Self::Environment,
        Self::Level,
        Self::Title,
        Self::Filename,
        Self::Context,
        Self::Method,
        Self::Framework,
        Self::Path,
        Self::Rate,
        Self::UniqueOccurrences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Level => "level",
            Self::Title => "title",
            Self::Filename => "filename",
            Self::Context => "context",
            Self::Method => "method",
            Self::Framework => "framework",
            Self::Path => "path",
            Self::Rate => "rate",
            Self::UniqueOccurrences => "unique_occurrences",
        }
    }
}

impl fmt::Display for PagerDutyFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PagerDutyFilterType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ApiError::InvalidRequest(format!("unsupported filter type {:?}", s)))
    }
}

/// One filter of a notification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyRuleFilter {
    #[serde(rename = "type")]
    pub filter_type: PagerDutyFilterType,

    /// Comparison, e.g. `eq`, `gte`, `within`.
    pub operation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Only meaningful for `path` filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Window in seconds for `rate` filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyRuleConfig {
    /// Overrides the integration's service key for this rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
}

/// A PagerDuty notification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyRule {
    pub trigger: PagerDutyTrigger,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<PagerDutyRuleFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PagerDutyRuleConfig>,
}

impl PagerDutyRule {
    /// Checks the rule's service key override, if any.
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.config.as_ref().and_then(|c| c.service_key.as_deref()) {
            Some(key) => validate_service_key(key),
            None => Ok(()),
        }
    }
}

/// Notification operations. Obtained through [`RollbarClient::notifications`].
///
/// Every call uses the project access token.
#[derive(Debug, Clone, Copy)]
pub struct NotificationsService<'a> {
    client: &'a RollbarClient,
}

impl<'a> NotificationsService<'a> {
    const SCOPE: TokenScope = TokenScope::Project;

    pub(crate) fn new(client: &'a RollbarClient) -> Self {
        Self { client }
    }

    /// Creates or modifies the PagerDuty integration.
    pub async fn configure_pagerduty_integration(
        &self,
        request: &PagerDutyIntegrationRequest,
    ) -> Result<Response, ApiError> {
        self.client
            .put_raw(Self::SCOPE, "/notifications/pagerduty", Some(request))
            .await
    }

    /// Replaces the PagerDuty notification rules.
    ///
    /// The returned flag is `true` only when Rollbar answered `200`; other
    /// accepted statuses succeed with `false`.
    pub async fn modify_pagerduty_rules(
        &self,
        rules: &[PagerDutyRule],
    ) -> Result<(bool, Response), ApiError> {
        for rule in rules {
            rule.validate()?;
        }

        let response = self
            .client
            .put_raw(Self::SCOPE, "/notifications/pagerduty/rules", Some(rules))
            .await?;
        Ok((response.status_code == 200, response))
    }

    /// Removes every PagerDuty notification rule.
    pub async fn delete_all_pagerduty_rules(&self) -> Result<(bool, Response), ApiError> {
        self.modify_pagerduty_rules(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_and_filter_parsing() {
        assert_eq!(
            "exp_repeat_item".parse::<PagerDutyTrigger>().unwrap(),
            PagerDutyTrigger::ExpRepeatItem
        );
        assert!("old_item".parse::<PagerDutyTrigger>().is_err());
        assert_eq!(
            "unique_occurrences".parse::<PagerDutyFilterType>().unwrap(),
            PagerDutyFilterType::UniqueOccurrences
        );
        assert!("severity".parse::<PagerDutyFilterType>().is_err());
    }

    #[test]
    fn test_service_key_length() {
        assert!(validate_service_key(&"a".repeat(32)).is_ok());
        assert!(validate_service_key(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_rule_serialization() {
        let rule = PagerDutyRule {
            trigger: PagerDutyTrigger::NewItem,
            filters: vec![PagerDutyRuleFilter {
                filter_type: PagerDutyFilterType::Environment,
                operation: "eq".to_string(),
                value: Some("production".to_string()),
                path: None,
                period: None,
                count: None,
            }],
            config: None,
        };
        assert_eq!(
            serde_json::to_value(vec![rule]).unwrap(),
            serde_json::json!([{
                "trigger": "new_item",
                "filters": [{"type": "environment", "operation": "eq", "value": "production"}]
            }])
        );
    }

    #[test]
    fn test_integration_request_omits_unset_enabled() {
        let request = PagerDutyIntegrationRequest {
            enabled: None,
            service_key: "k".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"service_key":"k"}"#
        );
    }
}
