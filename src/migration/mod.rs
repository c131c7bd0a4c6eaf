//! # File Migration
//!
//! The recursive core of a theme migration. Starting from a layout file of a
//! theme, the [`MigrationEngine`] copies every file it references into the
//! new bundle under a collision-free name, rewrites the reference to point at
//! the copy and then does the same for the copy, until no reference is left.
//!
//! ## Components
//!
//! - [`record::MigrationRecord`]: target to source ledger, stops cycles and
//!   detects two sources fighting over one target
//! - [`action_log::ActionLog`]: what was copied, skipped and removed
//! - [`files::LoggedFs`]: filesystem access that feeds the action log
//! - [`rename`]: the `<priority>_<name>_<alias>` naming scheme
//! - [`engine::MigrationEngine`]: the traversal itself

pub mod action_log;
pub mod engine;
pub mod files;
pub mod record;
pub mod rename;

pub use action_log::ActionLog;
pub use engine::MigrationEngine;
pub use files::LoggedFs;
pub use record::{Claim, MigrationRecord};
pub use rename::RenamedFile;

use crate::defaults::PARSED_EXTENSIONS;
use crate::path::extension;

/// Which reference kinds are followed while processing a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileConfig {
    /// Follow `@Alias/layouts/<theme>/...` references
    pub parse_template_refs: bool,
    /// Follow quoted relative `.twig` paths in `yml` files
    pub parse_relative_refs: bool,
    /// Rewrite asset folder references in templates
    pub parse_asset_refs: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            parse_template_refs: true,
            parse_relative_refs: true,
            parse_asset_refs: true,
        }
    }
}

impl FileConfig {
    pub fn with_template_refs(mut self, enabled: bool) -> Self {
        self.parse_template_refs = enabled;
        self
    }

    pub fn with_relative_refs(mut self, enabled: bool) -> Self {
        self.parse_relative_refs = enabled;
        self
    }

    pub fn with_asset_refs(mut self, enabled: bool) -> Self {
        self.parse_asset_refs = enabled;
        self
    }

    /// Whether the content of `path` is scanned at all
    pub fn parses(&self, path: &str) -> bool {
        PARSED_EXTENSIONS.contains(&extension(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_defaults_and_builders() {
        let config = FileConfig::default();
        assert!(config.parse_template_refs && config.parse_relative_refs && config.parse_asset_refs);

        let config = config.with_relative_refs(false).with_asset_refs(false);
        assert!(config.parse_template_refs);
        assert!(!config.parse_relative_refs);
        assert!(!config.parse_asset_refs);
    }

    #[test]
    fn test_parses_only_templates_and_yml() {
        let config = FileConfig::default();
        assert!(config.parses("/a/b.html.twig"));
        assert!(config.parses("/a/layout.yml"));
        assert!(!config.parses("/a/main.scss"));
        assert!(!config.parses("/a/image.png"));
    }
}
