// src/types.rs

//! Identifier newtypes and small shared enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a Project or a Task.
///
/// Identity is only meaningful inside the scope of one validation call; the
/// guard never compares ids across scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

impl From<Uuid> for NodeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Opaque reference to a Goal. Goals themselves live outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub Uuid);

impl GoalId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for GoalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// How project dependencies are scoped.
///
/// - `Global`: a project may depend on any other project, regardless of its
///   goal. No reference check runs; unknown ids are treated as leaves.
/// - `Goal`: every dependency must resolve to an existing project with the
///   same goal (standalone projects may only depend on standalone projects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectScoping {
    #[default]
    Global,
    Goal,
}

impl FromStr for ProjectScoping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(ProjectScoping::Global),
            "goal" => Ok(ProjectScoping::Goal),
            other => Err(format!(
                "invalid project_scoping: {other} (expected \"global\" or \"goal\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_round_trips_through_display() {
        let id = NodeId::new_v4();
        let parsed: NodeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn project_scoping_parses_case_insensitively() {
        assert_eq!("Goal".parse::<ProjectScoping>(), Ok(ProjectScoping::Goal));
        assert_eq!(
            " global ".parse::<ProjectScoping>(),
            Ok(ProjectScoping::Global)
        );
        assert!("project".parse::<ProjectScoping>().is_err());
    }
}
