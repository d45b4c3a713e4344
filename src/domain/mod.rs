// src/domain/mod.rs

//! Planning entities that participate in dependency graphs.
//!
//! Projects form one graph across the whole store; tasks form one graph per
//! parent project. Goals and milestones live elsewhere and only appear here
//! as opaque [`GoalId`](crate::types::GoalId) references.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PlanError, Result};
use crate::types::NodeId;

pub mod project;
pub mod task;

pub use project::{NewProject, Project, ProjectPatch, ProjectPriority};
pub use task::{NewTask, Task, TaskClarity, TaskContinuity, TaskEnergy, TaskPatch, TaskSize};

pub const MAX_TITLE_LENGTH: usize = 255;

/// Workflow status shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
    Blocked,
}

/// Traffic-light risk used by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Green,
    Yellow,
    Red,
}

/// An entity that owns a dependency list inside some scope.
///
/// The scope owner is the parent project for tasks and the goal (if any)
/// for projects.
pub trait ScopedEntity: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn id(&self) -> NodeId;
    fn dependencies(&self) -> &[NodeId];
    fn scope_owner(&self) -> Option<Uuid>;
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;
}

/// Titles must be 1..=255 characters and not blank.
pub fn validate_title(title: &str) -> Result<()> {
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PlanError::InvalidInput(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    if title.trim().is_empty() {
        return Err(PlanError::InvalidInput(
            "Title cannot be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}
