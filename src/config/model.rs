// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{
    ProjectPriority, Risk, Status, TaskClarity, TaskContinuity, TaskEnergy, TaskSize,
};
use crate::guard::GuardConfig;

/// Plan file exactly as deserialized, before any structural checks.
///
/// ```toml
/// [guard]
/// project_scoping = "goal"
///
/// [project.website]
/// title = "Website"
/// goal = "launch"
/// priority = "P1"
/// risk = "green"
/// dependencies = ["hosting"]
///
/// [task.design]
/// project = "website"
/// title = "Design"
/// size = "M"
/// energy = "Focus"
/// continuity = "chain"
/// clarity = "clear"
/// risk = "green"
/// ```
///
/// Section keys are local labels. Ids are only assigned when the plan is
/// seeded.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPlanFile {
    #[serde(default)]
    pub guard: GuardConfig,

    /// All projects from `[project.<name>]`.
    #[serde(default)]
    pub project: BTreeMap<String, ProjectEntry>,

    /// All tasks from `[task.<name>]`.
    #[serde(default)]
    pub task: BTreeMap<String, TaskEntry>,
}

/// A plan that passed structural validation.
///
/// Only constructed through `TryFrom<RawPlanFile>`, so every name it
/// mentions is declared.
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub guard: GuardConfig,
    pub project: BTreeMap<String, ProjectEntry>,
    pub task: BTreeMap<String, TaskEntry>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(
        guard: GuardConfig,
        project: BTreeMap<String, ProjectEntry>,
        task: BTreeMap<String, TaskEntry>,
    ) -> Self {
        Self {
            guard,
            project,
            task,
        }
    }

    /// Tasks of one project, in label order.
    pub fn tasks_of<'a>(&'a self, project: &'a str) -> impl Iterator<Item = (&'a str, &'a TaskEntry)> {
        self.task
            .iter()
            .filter(move |(_, task)| task.project == project)
            .map(|(name, task)| (name.as_str(), task))
    }
}

/// `[project.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub title: String,

    /// Goal label. Projects sharing a label share a goal; projects without
    /// one are standalone.
    #[serde(default)]
    pub goal: Option<String>,

    #[serde(default)]
    pub status: Status,

    pub priority: ProjectPriority,

    #[serde(default)]
    pub scope: String,

    pub risk: Risk,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Labels of other projects.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskEntry {
    /// Label of the owning project.
    pub project: String,

    pub title: String,

    #[serde(default)]
    pub status: Status,

    pub size: TaskSize,
    pub energy: TaskEnergy,
    pub continuity: TaskContinuity,
    pub clarity: TaskClarity,
    pub risk: Risk,

    #[serde(default)]
    pub context: String,

    /// Labels of other tasks.
    #[serde(default)]
    pub dependencies: Vec<String>,
}
