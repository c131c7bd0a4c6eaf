//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Theme Migration - Consolidate a storefront theme scattered across bundles
#[derive(Parser, Debug)]
#[command(name = "theme-migration")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Move a theme and its ancestors into a newly generated bundle
    Migrate(commands::migrate::MigrateArgs),

    /// Print the parent chain of a theme
    Hierarchy(commands::hierarchy::HierarchyArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Migrate(args) => commands::migrate::execute(args, &self.color),
            Commands::Hierarchy(args) => commands::hierarchy::execute(args, &self.color),
        }
    }
}

/// Initialise `env_logger` with `level` unless `RUST_LOG` is set
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running inside tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_migrate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "theme-migration",
            "migrate",
            "--theme",
            "custom",
            "--log-level",
            "debug",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.color, "never");
        match cli.command {
            Commands::Migrate(args) => assert_eq!(args.config.theme.as_deref(), Some("custom")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
