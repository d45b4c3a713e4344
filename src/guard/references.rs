// src/guard/references.rs

//! Structural scope rule: dependencies must resolve to siblings of the same
//! scope owner. Checked before any graph is built, so a bad reference is
//! reported as such rather than folded into cycle diagnostics.

use uuid::Uuid;

use crate::errors::{PlanError, Result};
use crate::store::EntityResolver;
use crate::types::NodeId;

/// Names used when reporting a broken scope rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRule {
    /// Kind of the referenced entity, e.g. `"task"`.
    pub entity: &'static str,
    /// Label used at the start of the cross-scope message, e.g. `"Task"`.
    pub entity_label: &'static str,
    /// What owns the scope, e.g. `"project"`.
    pub owner: &'static str,
}

pub const TASKS_SHARE_PROJECT: ScopeRule = ScopeRule {
    entity: "task",
    entity_label: "Task",
    owner: "project",
};

pub const PROJECTS_SHARE_GOAL: ScopeRule = ScopeRule {
    entity: "project",
    entity_label: "Project",
    owner: "goal",
};

/// Resolve every id in `candidate` and require its owner to equal `owner`.
///
/// Stops at the first failure, in list order.
pub async fn check_cross_scope_references<R>(
    candidate: &[NodeId],
    owner: Option<Uuid>,
    resolver: &R,
    rule: ScopeRule,
) -> Result<()>
where
    R: EntityResolver + ?Sized,
{
    for &dependency in candidate {
        let Some(resolved) = resolver.get_by_id(dependency).await? else {
            return Err(PlanError::UnresolvedDependency {
                entity: rule.entity,
                id: dependency,
            });
        };

        if resolved.scope_owner != owner {
            return Err(PlanError::CrossScopeDependency {
                entity: rule.entity_label,
                owner: rule.owner,
                dependency,
                expected: owner,
                found: resolved.scope_owner,
            });
        }
    }

    Ok(())
}
