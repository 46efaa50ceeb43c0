//
//  rollbar-provider
//  resources/pagerduty.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # PagerDuty Integration and Notification Rule Resources
//!
//! Both resources act on the project the configured project access token
//! belongs to. Rollbar cannot report the current integration or rule set,
//! so reads return the stored state unchanged and neither resource can be
//! imported.

use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::ResourceId;
use crate::api::notifications::{validate_service_key, PagerDutyIntegrationRequest, PagerDutyRule};
use crate::api::RollbarClient;

/// Stored state of the PagerDuty integration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyIntegrationState {
    pub id: ResourceId,
    pub service_key: String,
    pub enabled: bool,
}

impl fmt::Debug for PagerDutyIntegrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerDutyIntegrationState")
            .field("id", &self.id)
            .field("service_key", &"****")
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Configures the integration.
///
/// With `delete_default_rules`, the rules PagerDuty sets up on a fresh
/// integration are removed right after.
pub async fn create_integration(
    client: &RollbarClient,
    service_key: &str,
    enabled: bool,
    delete_default_rules: bool,
) -> Result<PagerDutyIntegrationState> {
    validate_service_key(service_key)?;

    let request = PagerDutyIntegrationRequest {
        enabled: Some(enabled),
        service_key: service_key.to_string(),
    };

    tracing::debug!("Configuring PagerDuty integration (enabled: {})", enabled);
    client
        .notifications()
        .configure_pagerduty_integration(&request)
        .await
        .context("Failed to configure PagerDuty integration")?;
    tracing::debug!("Configured PagerDuty integration");

    if delete_default_rules {
        tracing::debug!("Deleting default PagerDuty notification rules");
        client
            .notifications()
            .delete_all_pagerduty_rules()
            .await
            .context("Failed to delete default PagerDuty notification rules")?;
    }

    Ok(PagerDutyIntegrationState {
        id: ResourceId::synthetic(),
        service_key: service_key.to_string(),
        enabled,
    })
}

/// Returns the stored integration state.
pub fn read_integration(state: &PagerDutyIntegrationState) -> PagerDutyIntegrationState {
    state.clone()
}

/// Disables the integration.
///
/// Rollbar has no way to remove it; that has to be done in the UI.
pub async fn delete_integration(
    client: &RollbarClient,
    state: &PagerDutyIntegrationState,
) -> Result<()> {
    let request = PagerDutyIntegrationRequest {
        enabled: Some(false),
        service_key: state.service_key.clone(),
    };

    tracing::debug!("Disabling PagerDuty integration {}", state.id);
    client
        .notifications()
        .configure_pagerduty_integration(&request)
        .await
        .context("Failed to disable PagerDuty integration")?;
    tracing::debug!("Disabled PagerDuty integration {}", state.id);
    Ok(())
}

/// Always fails: the integration cannot be read from Rollbar.
pub fn import_integration(_id: &str) -> Result<PagerDutyIntegrationState> {
    bail!("Not possible to import PagerDuty integration due to API limitations")
}

/// Stored state of the PagerDuty notification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyRulesState {
    pub id: ResourceId,
    pub rules: Vec<PagerDutyRule>,
}

/// Installs the rule set. There is no separate create call.
pub async fn create_rules(
    client: &RollbarClient,
    rules: Vec<PagerDutyRule>,
) -> Result<PagerDutyRulesState> {
    put_rules(client, &rules).await?;
    Ok(PagerDutyRulesState {
        id: ResourceId::synthetic(),
        rules,
    })
}

/// Returns the stored rule set.
pub fn read_rules(state: &PagerDutyRulesState) -> PagerDutyRulesState {
    state.clone()
}

/// Replaces the rule set.
pub async fn update_rules(
    client: &RollbarClient,
    state: &PagerDutyRulesState,
    rules: Vec<PagerDutyRule>,
) -> Result<PagerDutyRulesState> {
    put_rules(client, &rules).await?;
    Ok(PagerDutyRulesState {
        id: state.id.clone(),
        rules,
    })
}

/// Removes every rule.
pub async fn delete_rules(client: &RollbarClient) -> Result<()> {
    tracing::debug!("Deleting all PagerDuty notification rules");

    let (deleted, _) = client
        .notifications()
        .delete_all_pagerduty_rules()
        .await
        .context("Failed to delete PagerDuty notification rules")?;

    tracing::debug!("Were all PagerDuty notification rules deleted: {}", deleted);
    Ok(())
}

/// Always fails: the rules cannot be read from Rollbar.
pub fn import_rules(_id: &str) -> Result<PagerDutyRulesState> {
    bail!("Not possible to import PagerDuty notification rules due to API limitations")
}

async fn put_rules(client: &RollbarClient, rules: &[PagerDutyRule]) -> Result<()> {
    tracing::debug!("Modifying {} PagerDuty notification rule(s)", rules.len());

    let (modified, _) = client
        .notifications()
        .modify_pagerduty_rules(rules)
        .await
        .context("Failed to modify PagerDuty notification rules")?;

    tracing::debug!("Was modifying PagerDuty notification rules successful: {}", modified);
    Ok(())
}
