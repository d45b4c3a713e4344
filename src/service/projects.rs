// src/service/projects.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{NewProject, Project, ProjectPatch};
use crate::errors::{PlanError, Result};
use crate::guard::{MutationGuard, Scope};
use crate::store::{EntityResolver, EntityStore, SiblingReader};
use crate::types::NodeId;

/// Create, read, update and delete projects.
pub struct ProjectService<P, T> {
    projects: P,
    guard: Arc<MutationGuard<P, T>>,
}

impl<P, T> ProjectService<P, T>
where
    P: EntityStore<Project>,
    T: SiblingReader + EntityResolver,
{
    pub fn new(projects: P, guard: Arc<MutationGuard<P, T>>) -> Self {
        Self { projects, guard }
    }

    pub fn guard(&self) -> &Arc<MutationGuard<P, T>> {
        &self.guard
    }

    pub async fn create(&self, input: NewProject) -> Result<Project> {
        input.validate()?;

        let scope = Scope::Projects {
            goal: input.goal_id,
        };
        let _permit = self.guard.lock(&scope).await;

        self.guard
            .validate_for_create(&scope, &input.dependencies)
            .await
            .inspect_err(|err| warn!(error = %err, "project create rejected"))?;

        let project = input.into_project(NodeId::new_v4(), Utc::now());
        self.projects.insert(project.clone()).await?;

        info!(id = %project.id, title = %project.title, "project created");
        Ok(project)
    }

    pub async fn get(&self, id: NodeId) -> Result<Project> {
        self.projects
            .get(id)
            .await?
            .ok_or(PlanError::NotFound { entity: "Project", id })
    }

    /// All projects, newest first.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.projects.list().await
    }

    /// Apply `patch`. The dependency graph is only revalidated when the patch
    /// carries a dependency list.
    pub async fn update(&self, id: NodeId, patch: ProjectPatch) -> Result<Project> {
        patch.validate()?;

        let scope = self.scope_of(id).await?;
        let _permit = self.guard.lock(&scope).await;
        let current = self.get(id).await?;

        if let Some(dependencies) = &patch.dependencies {
            self.guard
                .validate_for_update(&scope, id, dependencies)
                .await
                .inspect_err(|err| warn!(%id, error = %err, "project update rejected"))?;
        }

        let updated = patch.apply(&current, Utc::now());
        if !self.projects.replace(updated.clone()).await? {
            return Err(PlanError::NotFound { entity: "Project", id });
        }

        debug!(%id, "project updated");
        Ok(updated)
    }

    /// Remove a project. Its tasks and any dependants keep their references.
    pub async fn delete(&self, id: NodeId) -> Result<()> {
        let scope = self.scope_of(id).await?;
        let _permit = self.guard.lock(&scope).await;

        if !self.projects.remove(id).await? {
            return Err(PlanError::NotFound { entity: "Project", id });
        }

        info!(%id, "project deleted");
        Ok(())
    }

    async fn scope_of(&self, id: NodeId) -> Result<Scope> {
        let project = self.get(id).await?;
        Ok(Scope::Projects {
            goal: project.goal_id,
        })
    }
}
