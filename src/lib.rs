// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod domain;
pub mod errors;
pub mod guard;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{PlanFile, SeededPlan, load_and_validate};
use crate::domain::{Project, Task};
use crate::guard::{GuardConfig, MutationGuard, Scope};
use crate::store::{EntityStore, MemoryStore};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan loading and structural validation
/// - the `--project-scoping` override
/// - seeding in-memory stores with the plan's entities
/// - a guard audit of the project scope and every task scope
pub async fn run(args: CliArgs) -> Result<()> {
    let plan_path = PathBuf::from(&args.plan);
    let mut plan = load_and_validate(&plan_path)?;

    if let Some(scoping) = args.project_scoping {
        debug!(?scoping, "project scoping overridden on the command line");
        plan.guard.project_scoping = scoping;
    }

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    let seeded = SeededPlan::from_plan(&plan, Utc::now());
    match audit_plan(&seeded, plan.guard).await {
        Ok(()) => {
            info!(
                projects = seeded.projects.len(),
                tasks = seeded.tasks.len(),
                "plan audit passed"
            );
            println!(
                "plan ok: {} projects, {} tasks, no dependency cycles",
                seeded.projects.len(),
                seeded.tasks.len()
            );
            Ok(())
        }
        Err(err) => bail!("plan audit failed: {}", seeded.relabel(&err.to_string())),
    }
}

/// Seed fresh stores with `seeded` and audit every scope.
///
/// Stops at the first failing scope: projects first, then each project's
/// tasks in label order.
pub async fn audit_plan(seeded: &SeededPlan, config: GuardConfig) -> errors::Result<()> {
    let projects = MemoryStore::<Project>::new();
    let tasks = MemoryStore::<Task>::new();

    for project in &seeded.projects {
        projects.insert(project.clone()).await?;
    }
    for task in &seeded.tasks {
        tasks.insert(task.clone()).await?;
    }

    let guard = MutationGuard::new(projects, tasks, config);

    guard.audit_scope(&Scope::Projects { goal: None }).await?;
    for project in &seeded.projects {
        debug!(project = seeded.label(project.id.0).unwrap_or("?"), "auditing task scope");
        guard
            .audit_scope(&Scope::Tasks {
                project: project.id,
            })
            .await?;
    }

    Ok(())
}

/// Simple dry-run output: print projects, tasks and their dependencies.
fn print_dry_run(plan: &PlanFile) {
    println!("planguard dry-run");
    println!(
        "  guard.project_scoping = {:?}",
        plan.guard.project_scoping
    );
    println!();

    println!("projects ({}):", plan.project.len());
    for (name, project) in plan.project.iter() {
        println!("  - {name}: {}", project.title);
        if let Some(ref goal) = project.goal {
            println!("      goal: {goal}");
        }
        if !project.dependencies.is_empty() {
            println!("      dependencies: {:?}", project.dependencies);
        }

        for (task_name, task) in plan.tasks_of(name) {
            println!("      * {task_name}: {}", task.title);
            if !task.dependencies.is_empty() {
                println!("          dependencies: {:?}", task.dependencies);
            }
        }
    }

    debug!("dry-run complete (no audit)");
}
