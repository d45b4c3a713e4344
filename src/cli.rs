// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::ProjectScoping;

/// Command-line arguments for `planguard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "planguard",
    version,
    about = "Check a project plan for dependency cycles and cross-scope references.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Planguard.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Planguard.toml")]
    pub plan: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLANGUARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse and print the plan, but don't audit it.
    #[arg(long)]
    pub dry_run: bool,

    /// Override `[guard].project_scoping` (global or goal).
    #[arg(long, value_name = "MODE")]
    pub project_scoping: Option<ProjectScoping>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["planguard"]).unwrap();
        assert_eq!(args.plan, "Planguard.toml");
        assert!(!args.dry_run);
        assert!(args.project_scoping.is_none());
    }

    #[test]
    fn scoping_override_parses() {
        let args =
            CliArgs::try_parse_from(["planguard", "--project-scoping", "goal", "--dry-run"])
                .unwrap();
        assert_eq!(args.project_scoping, Some(ProjectScoping::Goal));
        assert!(args.dry_run);

        assert!(CliArgs::try_parse_from(["planguard", "--project-scoping", "team"]).is_err());
    }
}
