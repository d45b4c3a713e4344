// src/dag/mod.rs

//! Dependency graphs and cycle detection.
//!
//! - [`graph`] holds the ordered adjacency mapping built per validation call.
//! - [`validator`] decides whether such a mapping is acyclic and, if not,
//!   produces one cycle for diagnostics.

pub mod graph;
pub mod validator;

pub use graph::DependencyGraph;
pub use validator::{DagValidator, render_cycle};
