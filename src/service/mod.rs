// src/service/mod.rs

//! Entity services.
//!
//! Every mutation that can change a dependency list runs the same sequence:
//! validate the input, take the scope permit, ask the guard, write, release.
//! Validation failures are returned unchanged; nothing is written.

pub mod projects;
pub mod tasks;

use std::sync::Arc;

use crate::domain::{Project, Task};
use crate::guard::{GuardConfig, MutationGuard};
use crate::store::EntityStore;

pub use projects::ProjectService;
pub use tasks::TaskService;

/// Both services wired to one shared guard, so they share one lock table.
pub struct PlanServices<P, T> {
    pub projects: ProjectService<P, T>,
    pub tasks: TaskService<P, T>,
}

impl<P, T> PlanServices<P, T>
where
    P: EntityStore<Project> + Clone,
    T: EntityStore<Task> + Clone,
{
    pub fn new(projects: P, tasks: T, config: GuardConfig) -> Self {
        let guard = Arc::new(MutationGuard::new(projects.clone(), tasks.clone(), config));
        Self {
            projects: ProjectService::new(projects.clone(), Arc::clone(&guard)),
            tasks: TaskService::new(tasks, projects, guard),
        }
    }

    pub fn guard(&self) -> &Arc<MutationGuard<P, T>> {
        self.projects.guard()
    }
}
