//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `theme-migration` command-line tool. Each subcommand is defined in its own
//! file with an `Args` struct derived using `clap` and an `execute` function
//! calling into the `theme_migration` library.

pub mod hierarchy;
pub mod migrate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use theme_migration::config::{self, MigrationConfig};
use theme_migration::defaults::CONFIG_FILE_NAME;
use theme_migration::path::to_slash;

/// Options shared by every command that reads the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "THEME_MIGRATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Theme to migrate (overrides the config file)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Application root (overrides the config file)
    #[arg(long, value_name = "PATH")]
    pub app_root: Option<PathBuf>,

    /// Version suffix of the new bundle and themes (overrides the config file)
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,
}

impl ConfigArgs {
    /// Load the configuration file and apply command-line overrides.
    ///
    /// An explicitly given file must exist. Without one,
    /// `.theme-migration.yaml` in the current directory is used when present.
    pub fn load(&self) -> Result<MigrationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file not found: {}", path.display());
                }
                read_config(path)?
            }
            None if Path::new(CONFIG_FILE_NAME).exists() => read_config(Path::new(CONFIG_FILE_NAME))?,
            None => MigrationConfig::default(),
        };

        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(app_root) = &self.app_root {
            config.app_root = to_slash(&std::path::absolute(app_root)?);
        }
        if let Some(app_version) = &self.app_version {
            config.app_version = app_version.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<MigrationConfig> {
    config::from_file(path).with_context(|| format!("Failed to load {}", path.display()))
}
