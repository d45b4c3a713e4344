// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::Result;

/// Read a plan file and deserialize it into a [`RawPlanFile`].
///
/// This only performs TOML deserialization; it does **not** perform
/// structural validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let plan: RawPlanFile = toml::from_str(&contents)?;
    debug!(
        path = %path.display(),
        projects = plan.project.len(),
        tasks = plan.task.len(),
        "plan file parsed"
    );

    Ok(plan)
}

/// Read a plan file and check that every name it uses is declared.
///
/// Dependency cycles and cross-scope references are not checked here; they
/// are reported by the guard audit once the plan is seeded.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    PlanFile::try_from(raw)
}

/// `Planguard.toml` in the current working directory.
pub fn default_plan_path() -> PathBuf {
    PathBuf::from("Planguard.toml")
}
