// src/guard/mod.rs

//! Scoped mutation guard.
//!
//! Before a project or task is created or has its dependency list changed,
//! the guard assembles the dependency graph of the affected scope from the
//! persisted siblings, overlays the proposed change and asks the
//! [`DagValidator`] whether the result is still acyclic.
//!
//! Callers that go on to write must hold the [`ScopePermit`] returned by
//! [`MutationGuard::lock`] from before validation until the write is done.

pub mod builder;
pub mod locks;
pub mod references;

use serde::Deserialize;

use crate::dag::DagValidator;
use crate::errors::Result;
use crate::store::{EntityResolver, SiblingReader, SiblingRecord};
use crate::types::{GoalId, NodeId, ProjectScoping};

pub use builder::{persisted_graph, prepare_create_graph, prepare_update_graph};
pub use locks::{ScopeKey, ScopeLocks, ScopePermit};
pub use references::{
    PROJECTS_SHARE_GOAL, ScopeRule, TASKS_SHARE_PROJECT, check_cross_scope_references,
};

/// `[guard]` section of the plan file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    #[serde(default)]
    pub project_scoping: ProjectScoping,
}

/// The universe of siblings a mutation is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every project. `goal` is the owner used for reference checks when
    /// projects are scoped by goal.
    Projects { goal: Option<GoalId> },
    /// Tasks belonging to `project`.
    Tasks { project: NodeId },
}

impl Scope {
    pub fn lock_key(&self) -> ScopeKey {
        match self {
            Scope::Projects { .. } => ScopeKey::Projects,
            Scope::Tasks { project } => ScopeKey::Tasks(*project),
        }
    }
}

/// A proposed change to one entity's dependency list.
#[derive(Debug, Clone, Copy)]
pub enum Mutation<'a> {
    Create { candidate: &'a [NodeId] },
    Update { target: NodeId, candidate: &'a [NodeId] },
}

/// Guards project and task mutations against dependency cycles and
/// cross-scope references.
///
/// `P` reads projects, `T` reads tasks. The guard never writes.
#[derive(Debug)]
pub struct MutationGuard<P, T> {
    projects: P,
    tasks: T,
    validator: DagValidator,
    locks: ScopeLocks,
    config: GuardConfig,
}

impl<P, T> MutationGuard<P, T>
where
    P: SiblingReader + EntityResolver,
    T: SiblingReader + EntityResolver,
{
    pub fn new(projects: P, tasks: T, config: GuardConfig) -> Self {
        Self {
            projects,
            tasks,
            validator: DagValidator::new(),
            locks: ScopeLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> GuardConfig {
        self.config
    }

    /// Exclusive access to `scope` until the permit is dropped.
    pub async fn lock(&self, scope: &Scope) -> ScopePermit {
        self.locks.acquire(scope.lock_key()).await
    }

    /// Reject the mutation if it would reference an entity outside the scope
    /// or close a dependency cycle.
    pub async fn prepare_and_validate(&self, scope: &Scope, mutation: Mutation<'_>) -> Result<()> {
        match mutation {
            Mutation::Create { candidate } => {
                if candidate.is_empty() {
                    return Ok(());
                }
                self.check_references(scope, candidate).await?;
                let siblings = self.siblings(scope).await?;
                let (graph, _placeholder) = prepare_create_graph(&siblings, candidate);
                self.validator.validate(&graph)
            }
            Mutation::Update { target, candidate } => {
                self.check_references(scope, candidate).await?;
                let siblings = self.siblings(scope).await?;
                let graph = prepare_update_graph(&siblings, target, candidate);
                self.validator.validate(&graph)
            }
        }
    }

    pub async fn validate_for_create(&self, scope: &Scope, candidate: &[NodeId]) -> Result<()> {
        self.prepare_and_validate(scope, Mutation::Create { candidate })
            .await
    }

    pub async fn validate_for_update(
        &self,
        scope: &Scope,
        target: NodeId,
        candidate: &[NodeId],
    ) -> Result<()> {
        self.prepare_and_validate(scope, Mutation::Update { target, candidate })
            .await
    }

    /// Revalidate everything already persisted in `scope`.
    ///
    /// Reference checks follow the same rules as mutations. For a project
    /// scope under goal scoping, each project is checked against its own
    /// goal.
    pub async fn audit_scope(&self, scope: &Scope) -> Result<()> {
        let siblings = self.siblings(scope).await?;

        match scope {
            Scope::Tasks { project } => {
                for sibling in &siblings {
                    check_cross_scope_references(
                        &sibling.dependencies,
                        Some(project.0),
                        &self.tasks,
                        TASKS_SHARE_PROJECT,
                    )
                    .await?;
                }
            }
            Scope::Projects { .. } if self.config.project_scoping == ProjectScoping::Goal => {
                for sibling in &siblings {
                    let owner = self
                        .projects
                        .get_by_id(sibling.id)
                        .await?
                        .and_then(|resolved| resolved.scope_owner);
                    check_cross_scope_references(
                        &sibling.dependencies,
                        owner,
                        &self.projects,
                        PROJECTS_SHARE_GOAL,
                    )
                    .await?;
                }
            }
            Scope::Projects { .. } => {}
        }

        self.validator.validate(&persisted_graph(&siblings))
    }

    async fn check_references(&self, scope: &Scope, candidate: &[NodeId]) -> Result<()> {
        match scope {
            Scope::Tasks { project } => {
                check_cross_scope_references(
                    candidate,
                    Some(project.0),
                    &self.tasks,
                    TASKS_SHARE_PROJECT,
                )
                .await
            }
            Scope::Projects { goal } => match self.config.project_scoping {
                ProjectScoping::Global => Ok(()),
                ProjectScoping::Goal => {
                    check_cross_scope_references(
                        candidate,
                        goal.map(|goal| goal.0),
                        &self.projects,
                        PROJECTS_SHARE_GOAL,
                    )
                    .await
                }
            },
        }
    }

    async fn siblings(&self, scope: &Scope) -> Result<Vec<SiblingRecord>> {
        match scope {
            Scope::Projects { .. } => self.projects.list_all().await,
            Scope::Tasks { project } => self.tasks.list_by_scope_owner(project.0).await,
        }
    }
}
