//! # Configuration
//!
//! This module defines the `.theme-migration.yaml` file read by the
//! command-line tool and the logic for parsing and validating it.
//!
//! ## Example
//!
//! ```yaml
//! app_root: /var/www/commerce
//! theme: default
//! app_version: "50"
//! overrides_dir: theme-overrides
//! bundles:
//!   - name: OroUIBundle
//!     path: vendor/oro/platform/src/Oro/Bundle/UIBundle
//!   - name: OroFormBundle
//!     path: vendor/oro/platform/src/Oro/Bundle/FormBundle
//! datagrids_to_migrate:
//!   - frontend-customer-user-grid
//! ```
//!
//! The `bundles` list is ordered: its order is the registration order of the
//! [`BundleRegistry`] and decides the priority prefix of renamed files.
//! Relative paths are resolved against `app_root`, and a relative `app_root`
//! against the directory of the config file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults::{default_app_version, default_theme_id};
use crate::error::{Error, Result};
use crate::path::{canonicalize, join, to_slash};
use crate::registry::BundleRegistry;

/// One bundle taking part in the migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Bundle name, e.g. `OroUIBundle`
    pub name: String,
    /// Bundle root, absolute or relative to `app_root`
    pub path: String,
}

/// Contents of `.theme-migration.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    /// Application root holding `src/` and `public/bundles/`
    #[serde(default = "default_app_root")]
    pub app_root: String,

    /// Theme to migrate; its parents are migrated too
    #[serde(default = "default_theme_id")]
    pub theme: String,

    /// Suffix of the new bundle and of the migrated theme ids
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Folder holding hand-authored `<new theme id>/theme.yml` overrides
    #[serde(default)]
    pub overrides_dir: Option<String>,

    /// Bundles in registration order
    #[serde(default)]
    pub bundles: Vec<BundleEntry>,

    /// Datagrids extracted into the theme datagrid config
    #[serde(default)]
    pub datagrids_to_migrate: Vec<String>,
}

fn default_app_root() -> String {
    to_slash(&crate::defaults::default_app_root())
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            app_root: default_app_root(),
            theme: default_theme_id(),
            app_version: default_app_version(),
            overrides_dir: None,
            bundles: Vec::new(),
            datagrids_to_migrate: Vec::new(),
        }
    }
}

/// Parse a configuration from YAML text
pub fn parse(yaml_content: &str) -> Result<MigrationConfig> {
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Expected a mapping with `app_root`, `theme`, `app_version`, `overrides_dir`, \
             `bundles` and `datagrids_to_migrate`"
                .to_string(),
        ),
    })
}

/// Read and parse a configuration file.
///
/// A relative `app_root` is resolved against the directory of the file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<MigrationConfig> {
    let path = std::path::absolute(path.as_ref()).map_err(Error::Io)?;
    let content = std::fs::read_to_string(&path).map_err(Error::Io)?;
    let mut config = parse(&content)?;
    if !is_absolute(&config.app_root) {
        let base = path.parent().map(to_slash).unwrap_or_default();
        config.app_root = canonicalize(&join(&base, &config.app_root));
    }
    Ok(config)
}

fn is_absolute(path: &str) -> bool {
    let path = path.replace('\\', "/");
    let bytes = path.as_bytes();
    path.starts_with('/') || (bytes.len() >= 3 && bytes[1] == b':' && bytes[2] == b'/')
}

impl MigrationConfig {
    /// Check the configuration for values that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.theme.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "Theme id is empty".to_string(),
                hint: Some("Set `theme` or pass `--theme`".to_string()),
            });
        }
        if self.app_version.is_empty()
            || !self.app_version.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::ConfigParse {
                message: format!("Invalid app version '{}'", self.app_version),
                hint: Some("Use letters and digits only, e.g. `50`".to_string()),
            });
        }
        if self.bundles.is_empty() {
            return Err(Error::ConfigParse {
                message: "No bundles configured".to_string(),
                hint: Some("List every bundle taking part in the migration under `bundles`".to_string()),
            });
        }

        let mut seen = HashSet::new();
        for bundle in &self.bundles {
            if !seen.insert(bundle.name.to_lowercase()) {
                return Err(Error::ConfigParse {
                    message: format!("Bundle '{}' is listed twice", bundle.name),
                    hint: Some("Each bundle may appear only once in `bundles`".to_string()),
                });
            }
        }
        Ok(())
    }

    /// Canonical application root
    pub fn app_root_path(&self) -> String {
        canonicalize(&self.app_root)
    }

    /// Build the bundle registry, resolving relative bundle paths against
    /// the application root
    pub fn registry(&self) -> BundleRegistry {
        let app_root = self.app_root_path();
        BundleRegistry::from_entries(self.bundles.iter().map(|bundle| {
            let path = if is_absolute(&bundle.path) {
                bundle.path.clone()
            } else {
                join(&app_root, &bundle.path)
            };
            (bundle.name.clone(), path)
        }))
    }

    /// Override directory resolved against the application root
    pub fn overrides_path(&self) -> Option<String> {
        self.overrides_dir.as_ref().map(|dir| {
            if is_absolute(dir) {
                canonicalize(dir)
            } else {
                canonicalize(&join(&self.app_root_path(), dir))
            }
        })
    }
}
