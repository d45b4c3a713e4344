// src/domain/project.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Risk, ScopedEntity, Status, validate_title};
use crate::errors::Result;
use crate::types::{GoalId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectPriority {
    P0,
    P1,
    P2,
    P3,
}

/// A work container, standalone or linked to a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: NodeId,
    pub goal_id: Option<GoalId>,
    pub title: String,
    pub status: Status,
    pub priority: ProjectPriority,
    pub scope: String,
    pub risk: Risk,
    pub tags: Vec<String>,
    /// Projects this one depends on.
    pub dependencies: Vec<NodeId>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl ScopedEntity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> NodeId {
        self.id
    }

    fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    fn scope_owner(&self) -> Option<Uuid> {
        self.goal_id.map(|goal| goal.0)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub goal_id: Option<GoalId>,
    pub title: String,
    #[serde(default)]
    pub status: Status,
    pub priority: ProjectPriority,
    #[serde(default)]
    pub scope: String,
    pub risk: Risk,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<NodeId>,
}

impl NewProject {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }

    pub fn into_project(self, id: NodeId, now: DateTime<Utc>) -> Project {
        Project {
            id,
            goal_id: self.goal_id,
            title: self.title,
            status: self.status,
            priority: self.priority,
            scope: self.scope,
            risk: self.risk,
            tags: self.tags,
            dependencies: self.dependencies,
            date_created: now,
            date_updated: now,
        }
    }
}

/// Partial update; `None` fields keep their current value.
///
/// `dependencies: Some(vec![])` clears the list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<ProjectPriority>,
    pub scope: Option<String>,
    pub risk: Option<Risk>,
    pub tags: Option<Vec<String>>,
    pub dependencies: Option<Vec<NodeId>>,
}

impl ProjectPatch {
    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    pub fn apply(self, current: &Project, now: DateTime<Utc>) -> Project {
        Project {
            id: current.id,
            goal_id: current.goal_id,
            title: self.title.unwrap_or_else(|| current.title.clone()),
            status: self.status.unwrap_or(current.status),
            priority: self.priority.unwrap_or(current.priority),
            scope: self.scope.unwrap_or_else(|| current.scope.clone()),
            risk: self.risk.unwrap_or(current.risk),
            tags: self.tags.unwrap_or_else(|| current.tags.clone()),
            dependencies: self
                .dependencies
                .unwrap_or_else(|| current.dependencies.clone()),
            date_created: current.date_created,
            date_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        NewProject {
            goal_id: None,
            title: "Website".to_string(),
            status: Status::Todo,
            priority: ProjectPriority::P1,
            scope: "launch page".to_string(),
            risk: Risk::Green,
            tags: vec!["web".to_string()],
            dependencies: vec![],
        }
        .into_project(NodeId::new_v4(), Utc::now())
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let project = sample();
        let dep = NodeId::new_v4();
        let later = project.date_created + chrono::Duration::seconds(5);

        let updated = ProjectPatch {
            status: Some(Status::Doing),
            dependencies: Some(vec![dep]),
            ..ProjectPatch::default()
        }
        .apply(&project, later);

        assert_eq!(updated.title, "Website");
        assert_eq!(updated.status, Status::Doing);
        assert_eq!(updated.dependencies, vec![dep]);
        assert_eq!(updated.date_created, project.date_created);
        assert_eq!(updated.date_updated, later);
    }

    #[test]
    fn patch_with_blank_title_is_rejected() {
        let patch = ProjectPatch {
            title: Some("  ".to_string()),
            ..ProjectPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn goal_is_the_scope_owner() {
        let mut project = sample();
        assert_eq!(project.scope_owner(), None);

        let goal = GoalId::new_v4();
        project.goal_id = Some(goal);
        assert_eq!(project.scope_owner(), Some(goal.0));
    }
}
