#![allow(dead_code)]

use std::fmt::Write as _;

use planguard::domain::{
    NewProject, NewTask, ProjectPriority, Risk, Status, TaskClarity, TaskContinuity, TaskEnergy,
    TaskSize,
};
use planguard::types::{GoalId, NodeId};

/// Builder for `NewProject` with neutral defaults.
pub struct NewProjectBuilder {
    project: NewProject,
}

impl NewProjectBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            project: NewProject {
                goal_id: None,
                title: title.to_string(),
                status: Status::Todo,
                priority: ProjectPriority::P2,
                scope: String::new(),
                risk: Risk::Green,
                tags: vec![],
                dependencies: vec![],
            },
        }
    }

    pub fn goal(mut self, goal: GoalId) -> Self {
        self.project.goal_id = Some(goal);
        self
    }

    pub fn depends_on(mut self, dep: NodeId) -> Self {
        self.project.dependencies.push(dep);
        self
    }

    pub fn build(self) -> NewProject {
        self.project
    }
}

/// Builder for `NewTask` with neutral defaults.
pub struct NewTaskBuilder {
    task: NewTask,
}

impl NewTaskBuilder {
    pub fn new(project: NodeId, title: &str) -> Self {
        Self {
            task: NewTask {
                project_id: project,
                title: title.to_string(),
                status: Status::Todo,
                dependencies: vec![],
                size: TaskSize::M,
                energy: TaskEnergy::Focus,
                continuity: TaskContinuity::Linked,
                clarity: TaskClarity::Clear,
                risk: Risk::Green,
                context: String::new(),
            },
        }
    }

    pub fn depends_on(mut self, dep: NodeId) -> Self {
        self.task.dependencies.push(dep);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.task.status = status;
        self
    }

    pub fn build(self) -> NewTask {
        self.task
    }
}

/// Builds plan-file TOML text for loader and CLI tests.
#[derive(Default)]
pub struct PlanTomlBuilder {
    scoping: Option<String>,
    projects: Vec<(String, Option<String>, Vec<String>)>,
    tasks: Vec<(String, String, Vec<String>)>,
}

impl PlanTomlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_scoping(mut self, mode: &str) -> Self {
        self.scoping = Some(mode.to_string());
        self
    }

    pub fn project(mut self, name: &str, goal: Option<&str>, deps: &[&str]) -> Self {
        self.projects.push((
            name.to_string(),
            goal.map(str::to_string),
            deps.iter().map(|d| d.to_string()).collect(),
        ));
        self
    }

    pub fn task(mut self, name: &str, project: &str, deps: &[&str]) -> Self {
        self.tasks.push((
            name.to_string(),
            project.to_string(),
            deps.iter().map(|d| d.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();

        if let Some(mode) = self.scoping {
            let _ = writeln!(out, "[guard]\nproject_scoping = \"{mode}\"\n");
        }

        for (name, goal, deps) in self.projects {
            let _ = writeln!(out, "[project.{name}]");
            let _ = writeln!(out, "title = \"Project {name}\"");
            let _ = writeln!(out, "priority = \"P1\"\nrisk = \"green\"");
            if let Some(goal) = goal {
                let _ = writeln!(out, "goal = \"{goal}\"");
            }
            let _ = writeln!(out, "dependencies = {deps:?}\n");
        }

        for (name, project, deps) in self.tasks {
            let _ = writeln!(out, "[task.{name}]");
            let _ = writeln!(out, "project = \"{project}\"");
            let _ = writeln!(out, "title = \"Task {name}\"");
            let _ = writeln!(
                out,
                "size = \"M\"\nenergy = \"Focus\"\ncontinuity = \"chain\"\nclarity = \"clear\"\nrisk = \"green\""
            );
            let _ = writeln!(out, "dependencies = {deps:?}\n");
        }

        out
    }
}
