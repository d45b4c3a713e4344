// src/domain/task.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Risk, ScopedEntity, Status, validate_title};
use crate::errors::Result;
use crate::types::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskSize {
    XS,
    S,
    M,
    L,
    XL,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskEnergy {
    Deep,
    Focus,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskContinuity {
    Chain,
    Linked,
    Puzzle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskClarity {
    Clear,
    Cloudy,
    Unknown,
}

/// Smallest planning unit. Belongs to exactly one project and may only
/// depend on tasks of that same project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: NodeId,
    pub project_id: NodeId,
    pub title: String,
    pub status: Status,
    pub dependencies: Vec<NodeId>,
    pub size: TaskSize,
    pub energy: TaskEnergy,
    pub continuity: TaskContinuity,
    pub clarity: TaskClarity,
    pub risk: Risk,
    pub context: String,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl ScopedEntity for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> NodeId {
        self.id
    }

    fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    fn scope_owner(&self) -> Option<Uuid> {
        Some(self.project_id.0)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub project_id: NodeId,
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub dependencies: Vec<NodeId>,
    pub size: TaskSize,
    pub energy: TaskEnergy,
    pub continuity: TaskContinuity,
    pub clarity: TaskClarity,
    pub risk: Risk,
    #[serde(default)]
    pub context: String,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }

    pub fn into_task(self, id: NodeId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            project_id: self.project_id,
            title: self.title,
            status: self.status,
            dependencies: self.dependencies,
            size: self.size,
            energy: self.energy,
            continuity: self.continuity,
            clarity: self.clarity,
            risk: self.risk,
            context: self.context,
            date_created: now,
            date_updated: now,
        }
    }
}

/// Partial update; the parent project cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub dependencies: Option<Vec<NodeId>>,
    pub size: Option<TaskSize>,
    pub energy: Option<TaskEnergy>,
    pub continuity: Option<TaskContinuity>,
    pub clarity: Option<TaskClarity>,
    pub risk: Option<Risk>,
    pub context: Option<String>,
}

impl TaskPatch {
    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    pub fn apply(self, current: &Task, now: DateTime<Utc>) -> Task {
        Task {
            id: current.id,
            project_id: current.project_id,
            title: self.title.unwrap_or_else(|| current.title.clone()),
            status: self.status.unwrap_or(current.status),
            dependencies: self
                .dependencies
                .unwrap_or_else(|| current.dependencies.clone()),
            size: self.size.unwrap_or(current.size),
            energy: self.energy.unwrap_or(current.energy),
            continuity: self.continuity.unwrap_or(current.continuity),
            clarity: self.clarity.unwrap_or(current.clarity),
            risk: self.risk.unwrap_or(current.risk),
            context: self.context.unwrap_or_else(|| current.context.clone()),
            date_created: current.date_created,
            date_updated: now,
        }
    }
}
