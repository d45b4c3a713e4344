// src/errors.rs

//! Crate-wide error type and helpers.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Cycle detected in dependency graph: {}", .path.as_deref().unwrap_or("unknown"))]
    CycleDetected { path: Option<String> },

    #[error("Dependency {entity} {id} not found")]
    UnresolvedDependency { entity: &'static str, id: NodeId },

    #[error("{entity} dependencies must be within the same {owner}: {dependency} belongs to another {owner}")]
    CrossScopeDependency {
        entity: &'static str,
        owner: &'static str,
        dependency: NodeId,
        expected: Option<uuid::Uuid>,
        found: Option<uuid::Uuid>,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: NodeId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`PlanError`] for outer layers.
///
/// `Validation` and `InvalidInput` are caller mistakes (an HTTP layer would
/// answer 422), `NotFound` is 404, `Infrastructure` is everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidInput,
    NotFound,
    Infrastructure,
}

impl PlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::CycleDetected { .. }
            | PlanError::UnresolvedDependency { .. }
            | PlanError::CrossScopeDependency { .. } => ErrorKind::Validation,
            PlanError::InvalidInput(_) => ErrorKind::InvalidInput,
            PlanError::NotFound { .. } => ErrorKind::NotFound,
            PlanError::ConfigError(_)
            | PlanError::IoError(_)
            | PlanError::TomlError(_)
            | PlanError::Storage(_)
            | PlanError::Other(_) => ErrorKind::Infrastructure,
        }
    }

    /// Whether the caller can recover by supplying a different dependency set.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_falls_back_to_unknown() {
        let err = PlanError::CycleDetected { path: None };
        assert_eq!(err.to_string(), "Cycle detected in dependency graph: unknown");

        let err = PlanError::CycleDetected {
            path: Some("a -> b -> a".to_string()),
        };
        assert_eq!(err.to_string(), "Cycle detected in dependency graph: a -> b -> a");
    }

    #[test]
    fn reference_errors_are_validation_class() {
        let id = NodeId::new_v4();
        let unresolved = PlanError::UnresolvedDependency { entity: "task", id };
        assert!(unresolved.is_validation());
        assert_eq!(unresolved.to_string(), format!("Dependency task {id} not found"));

        let cross = PlanError::CrossScopeDependency {
            entity: "Task",
            owner: "project",
            dependency: id,
            expected: None,
            found: Some(uuid::Uuid::new_v4()),
        };
        assert!(cross.is_validation());
        assert!(
            cross
                .to_string()
                .starts_with("Task dependencies must be within the same project")
        );
        assert!(
            PlanError::CrossScopeDependency {
                entity: "Project",
                owner: "goal",
                dependency: id,
                expected: None,
                found: Some(uuid::Uuid::new_v4()),
            }
            .is_validation()
        );
        assert_eq!(
            PlanError::Storage("down".into()).kind(),
            ErrorKind::Infrastructure
        );
    }
}
