// src/config/validate.rs

use crate::config::model::{PlanFile, RawPlanFile};
use crate::domain::validate_title;
use crate::errors::{PlanError, Result};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PlanError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        Ok(PlanFile::new_unchecked(raw.guard, raw.project, raw.task))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_projects(plan)?;
    validate_titles(plan)?;
    validate_task_parents(plan)?;
    validate_dependency_names(plan)?;
    Ok(())
}

fn ensure_has_projects(plan: &RawPlanFile) -> Result<()> {
    if plan.project.is_empty() {
        return Err(PlanError::ConfigError(
            "plan must contain at least one [project.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_titles(plan: &RawPlanFile) -> Result<()> {
    let projects = plan
        .project
        .iter()
        .map(|(name, p)| ("project", name, p.title.as_str()));
    let tasks = plan
        .task
        .iter()
        .map(|(name, t)| ("task", name, t.title.as_str()));

    for (kind, name, title) in projects.chain(tasks) {
        validate_title(title)
            .map_err(|err| PlanError::ConfigError(format!("{kind} '{name}': {err}")))?;
    }
    Ok(())
}

fn validate_task_parents(plan: &RawPlanFile) -> Result<()> {
    for (name, task) in plan.task.iter() {
        if !plan.project.contains_key(&task.project) {
            return Err(PlanError::ConfigError(format!(
                "task '{}' belongs to unknown project '{}'",
                name, task.project
            )));
        }
    }
    Ok(())
}

fn validate_dependency_names(plan: &RawPlanFile) -> Result<()> {
    for (name, project) in plan.project.iter() {
        for dep in project.dependencies.iter() {
            if !plan.project.contains_key(dep) {
                return Err(PlanError::ConfigError(format!(
                    "project '{}' has unknown dependency '{}'",
                    name, dep
                )));
            }
        }
    }

    for (name, task) in plan.task.iter() {
        for dep in task.dependencies.iter() {
            if !plan.task.contains_key(dep) {
                return Err(PlanError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}'",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<PlanFile> {
        let raw: RawPlanFile = toml::from_str(toml_src)?;
        PlanFile::try_from(raw)
    }

    const PROJECT: &str = r#"
        [project.site]
        title = "Site"
        priority = "P1"
        risk = "green"
    "#;

    #[test]
    fn minimal_plan_is_accepted() {
        let plan = parse(PROJECT).unwrap();
        assert_eq!(plan.project.len(), 1);
        assert!(plan.task.is_empty());
    }

    #[test]
    fn empty_plan_is_rejected() {
        let err = parse("").unwrap_err();
        assert!(err.to_string().contains("at least one [project.<name>]"));
    }

    #[test]
    fn task_with_unknown_project_is_rejected() {
        let src = format!(
            r#"{PROJECT}
            [task.t]
            project = "nope"
            title = "T"
            size = "S"
            energy = "Light"
            continuity = "linked"
            clarity = "clear"
            risk = "green"
            "#
        );
        let err = parse(&src).unwrap_err();
        assert!(err.to_string().contains("unknown project 'nope'"));
    }

    #[test]
    fn dependency_on_other_kind_is_rejected() {
        // "site" is a project label, not a task label.
        let src = format!(
            r#"{PROJECT}
            [task.t]
            project = "site"
            title = "T"
            size = "S"
            energy = "Light"
            continuity = "linked"
            clarity = "clear"
            risk = "green"
            dependencies = ["site"]
            "#
        );
        let err = parse(&src).unwrap_err();
        assert!(err.to_string().contains("task 't' has unknown dependency 'site'"));
    }

    #[test]
    fn blank_title_is_a_config_error() {
        let src = PROJECT.replace("\"Site\"", "\"  \"");
        let err = parse(&src).unwrap_err();
        assert!(matches!(err, PlanError::ConfigError(ref msg) if msg.starts_with("project 'site'")));
    }

    #[test]
    fn cycles_are_left_to_the_audit() {
        let src = r#"
            [project.a]
            title = "A"
            priority = "P0"
            risk = "red"
            dependencies = ["b"]

            [project.b]
            title = "B"
            priority = "P0"
            risk = "red"
            dependencies = ["a"]
        "#;
        assert!(parse(src).is_ok());
    }

    #[test]
    fn unknown_status_fails_to_parse() {
        let src = format!("{PROJECT}\nstatus = \"someday\"\n");
        assert!(matches!(parse(&src), Err(PlanError::TomlError(_))));
    }
}
