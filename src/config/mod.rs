// src/config/mod.rs

//! Plan file loading and validation for planguard.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a plan file from disk (`loader.rs`).
//! - Validate structural invariants like known names (`validate.rs`).
//! - Turn a validated plan into entities with real ids (`seed.rs`).

pub mod loader;
pub mod model;
pub mod seed;
pub mod validate;

pub use loader::{default_plan_path, load_and_validate, load_from_path};
pub use model::{PlanFile, ProjectEntry, RawPlanFile, TaskEntry};
pub use seed::SeededPlan;
