// src/service/tasks.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{NewTask, Project, Task, TaskPatch};
use crate::errors::{PlanError, Result};
use crate::guard::{MutationGuard, Scope};
use crate::store::EntityStore;
use crate::types::NodeId;

/// Create, read, update and delete tasks.
///
/// Each project's tasks form their own scope, so mutations in different
/// projects never wait on each other.
pub struct TaskService<P, T> {
    tasks: T,
    projects: P,
    guard: Arc<MutationGuard<P, T>>,
}

impl<P, T> TaskService<P, T>
where
    P: EntityStore<Project>,
    T: EntityStore<Task>,
{
    pub fn new(tasks: T, projects: P, guard: Arc<MutationGuard<P, T>>) -> Self {
        Self {
            tasks,
            projects,
            guard,
        }
    }

    /// Create a task in an existing project.
    pub async fn create(&self, input: NewTask) -> Result<Task> {
        input.validate()?;

        let project = input.project_id;
        if self.projects.get(project).await?.is_none() {
            return Err(PlanError::NotFound {
                entity: "Project",
                id: project,
            });
        }

        let scope = Scope::Tasks { project };
        let _permit = self.guard.lock(&scope).await;

        self.guard
            .validate_for_create(&scope, &input.dependencies)
            .await
            .inspect_err(|err| warn!(%project, error = %err, "task create rejected"))?;

        let task = input.into_task(NodeId::new_v4(), Utc::now());
        self.tasks.insert(task.clone()).await?;

        info!(id = %task.id, %project, title = %task.title, "task created");
        Ok(task)
    }

    pub async fn get(&self, id: NodeId) -> Result<Task> {
        self.tasks
            .get(id)
            .await?
            .ok_or(PlanError::NotFound { entity: "Task", id })
    }

    /// All tasks, newest first.
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.tasks.list().await
    }

    /// Tasks of one project, in storage order.
    pub async fn list_by_project(&self, project: NodeId) -> Result<Vec<Task>> {
        self.tasks.list_owned_by(project.0).await
    }

    /// Apply `patch`. A task never changes project, so its scope is known
    /// before the permit is taken.
    pub async fn update(&self, id: NodeId, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;

        let scope = Scope::Tasks {
            project: self.get(id).await?.project_id,
        };
        let _permit = self.guard.lock(&scope).await;
        let current = self.get(id).await?;

        if let Some(dependencies) = &patch.dependencies {
            self.guard
                .validate_for_update(&scope, id, dependencies)
                .await
                .inspect_err(|err| warn!(%id, error = %err, "task update rejected"))?;
        }

        let updated = patch.apply(&current, Utc::now());
        if !self.tasks.replace(updated.clone()).await? {
            return Err(PlanError::NotFound { entity: "Task", id });
        }

        debug!(%id, project = %updated.project_id, "task updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: NodeId) -> Result<()> {
        let scope = Scope::Tasks {
            project: self.get(id).await?.project_id,
        };
        let _permit = self.guard.lock(&scope).await;

        if !self.tasks.remove(id).await? {
            return Err(PlanError::NotFound { entity: "Task", id });
        }

        info!(%id, "task deleted");
        Ok(())
    }
}
