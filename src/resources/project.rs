//
//  rollbar-provider
//  resources/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project resource and the project-by-name data source.
//!
//! Projects cannot be changed once created: a new name means a new project.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{require_result, validate_name, ResourceId};
use crate::api::projects::{Project, ProjectRequest};
use crate::api::RollbarClient;
use crate::util::parse_numeric_id;

/// Stored state of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub id: u64,
    pub name: String,
    pub status: Option<String>,
    pub account_id: Option<u64>,
}

impl ProjectState {
    fn from_project(id: u64, project: Project) -> Self {
        Self {
            id: project.id.unwrap_or(id),
            name: project.name.unwrap_or_default(),
            status: project.status,
            account_id: project.account_id,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        ResourceId::remote(self.id)
    }
}

/// Creates a project and reads it back.
pub async fn create(client: &RollbarClient, name: &str) -> Result<ProjectState> {
    validate_name(name)?;

    tracing::debug!("Creating new project {}", name);

    let request = ProjectRequest {
        name: name.to_string(),
    };
    let (envelope, _) = client
        .projects()
        .create(&request)
        .await
        .with_context(|| format!("Failed to create project {}", name))?;
    let created = require_result(envelope, "project")?;
    let id = created
        .id
        .with_context(|| format!("Rollbar returned no ID for new project {}", name))?;

    tracing::debug!("Created new project {} with id {}", name, id);

    read(client, id).await
}

/// Reads a project.
pub async fn read(client: &RollbarClient, id: u64) -> Result<ProjectState> {
    let (envelope, _) = client
        .projects()
        .get(id)
        .await
        .with_context(|| format!("Failed to read project {}", id))?;
    let project = require_result(envelope, "project")?;
    Ok(ProjectState::from_project(id, project))
}

/// Deletes a project.
pub async fn delete(client: &RollbarClient, id: u64) -> Result<()> {
    tracing::debug!("Deleting project {}", id);

    client
        .projects()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete project {}", id))?;

    tracing::debug!("Deleted project {}", id);
    Ok(())
}

/// Imports an existing project by its numeric ID.
pub async fn import(client: &RollbarClient, id: &str) -> Result<ProjectState> {
    let id = parse_numeric_id(id)?;
    read(client, id).await
}

/// Finds a project by exact name.
///
/// Deleted projects are never matched. Returns `None` when no project has
/// the name.
pub async fn find_by_name(client: &RollbarClient, name: &str) -> Result<Option<ProjectState>> {
    let (envelope, _) = client
        .projects()
        .list()
        .await
        .context("Failed to list projects")?;

    Ok(envelope
        .into_items()
        .into_iter()
        .find(|p| p.name.as_deref() == Some(name))
        .and_then(|p| p.id.map(|id| ProjectState::from_project(id, p))))
}
