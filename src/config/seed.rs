// src/config/seed.rs

//! Assign ids to a validated plan and build its entities.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::model::PlanFile;
use crate::domain::{NewProject, NewTask, Project, Task};
use crate::types::{GoalId, NodeId};

/// Entities of a plan, plus the label each generated id came from.
#[derive(Debug, Clone)]
pub struct SeededPlan {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    project_ids: BTreeMap<String, NodeId>,
    labels: HashMap<Uuid, String>,
}

impl SeededPlan {
    pub fn from_plan(plan: &PlanFile, now: DateTime<Utc>) -> Self {
        let project_ids: BTreeMap<String, NodeId> = plan
            .project
            .keys()
            .map(|name| (name.clone(), NodeId::new_v4()))
            .collect();
        let task_ids: BTreeMap<String, NodeId> = plan
            .task
            .keys()
            .map(|name| (name.clone(), NodeId::new_v4()))
            .collect();

        let mut goal_ids: BTreeMap<String, GoalId> = BTreeMap::new();
        for goal in plan.project.values().filter_map(|p| p.goal.as_ref()) {
            goal_ids
                .entry(goal.clone())
                .or_insert_with(GoalId::new_v4);
        }

        let resolve = |ids: &BTreeMap<String, NodeId>, names: &[String]| -> Vec<NodeId> {
            names.iter().filter_map(|name| ids.get(name).copied()).collect()
        };

        let mut projects = Vec::with_capacity(plan.project.len());
        for (name, entry) in plan.project.iter() {
            let Some(&id) = project_ids.get(name) else {
                continue;
            };
            let new = NewProject {
                goal_id: entry.goal.as_ref().and_then(|g| goal_ids.get(g).copied()),
                title: entry.title.clone(),
                status: entry.status,
                priority: entry.priority,
                scope: entry.scope.clone(),
                risk: entry.risk,
                tags: entry.tags.clone(),
                dependencies: resolve(&project_ids, &entry.dependencies),
            };
            projects.push(new.into_project(id, now));
        }

        let mut tasks = Vec::with_capacity(plan.task.len());
        for (name, entry) in plan.task.iter() {
            let (Some(&id), Some(&project_id)) =
                (task_ids.get(name), project_ids.get(&entry.project))
            else {
                continue;
            };
            let new = NewTask {
                project_id,
                title: entry.title.clone(),
                status: entry.status,
                dependencies: resolve(&task_ids, &entry.dependencies),
                size: entry.size,
                energy: entry.energy,
                continuity: entry.continuity,
                clarity: entry.clarity,
                risk: entry.risk,
                context: entry.context.clone(),
            };
            tasks.push(new.into_task(id, now));
        }

        let labels = project_ids
            .iter()
            .chain(task_ids.iter())
            .map(|(name, id)| (id.0, name.clone()))
            .chain(goal_ids.iter().map(|(name, id)| (id.0, name.clone())))
            .collect();

        Self {
            projects,
            tasks,
            project_ids,
            labels,
        }
    }

    /// Id assigned to the project labelled `name`.
    pub fn project_id(&self, name: &str) -> Option<NodeId> {
        self.project_ids.get(name).copied()
    }

    /// Label an id was generated for.
    pub fn label(&self, id: Uuid) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    /// Replace every generated id in `message` with its label.
    pub fn relabel(&self, message: &str) -> String {
        let mut out = message.to_string();
        for (id, label) in &self.labels {
            let id = id.to_string();
            if out.contains(&id) {
                out = out.replace(&id, label);
            }
        }
        out
    }
}
