//! # Theme Migration Library
//!
//! This library moves a storefront theme, scattered over the layout folders of
//! many bundles, into one newly generated bundle. It is designed to be used by
//! the `theme-migration` command-line tool but works on any [`FileSystem`]
//! implementation, so migrations can be staged in memory.
//!
//! [`FileSystem`]: filesystem::FileSystem
//!
//! ## Quick Example
//!
//! ```
//! use theme_migration::config;
//! use theme_migration::filesystem::MemoryFS;
//! use theme_migration::phases::execute_migration;
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string(
//!     "/app/vendor/ui/Resources/views/layouts/default/page.html.twig",
//!     "{% block body %}{% endblock %}",
//! )
//! .unwrap();
//!
//! let config = config::parse(
//!     r#"
//! app_root: /app
//! theme: default
//! bundles:
//!   - name: OroUIBundle
//!     path: vendor/ui
//! "#,
//! )
//! .unwrap();
//!
//! let (fs, report) = execute_migration(fs, &config).unwrap();
//! assert_eq!(report.hierarchy, vec!["default"]);
//! assert!(fs
//!     .get_string(
//!         "/app/src/Oro/Bundle/ThemeDefault50Bundle/Resources/views/layouts/default_50/001_page_OroUI.html.twig"
//!     )
//!     .is_some());
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `.theme-migration.yaml` file listing the
//!   application root, the theme and the participating bundles.
//! - **Registry (`registry`)**: Ordered bundles with their aliases and
//!   priorities.
//! - **Resolver (`resolver`)**: Every name, path and pattern derived from the
//!   application version and the theme hierarchy.
//! - **Scanner (`scanner`)**: Finds template and asset references in file
//!   contents.
//! - **Migration (`migration`)**: The engine following references from file
//!   to file, copying each one once under a bundle-suffixed name.
//! - **Merge (`merge`)**: Combination of the YAML config fragments of every
//!   bundle.
//! - **Phases (`phases`)**: The pipeline running a complete migration.
//!
//! ## Execution Flow
//!
//! The main entry point is [`phases::execute_migration`], which executes the
//! following high-level steps:
//!
//! 1.  **Hierarchy**: Walk the theme's `parent` declarations.
//! 2.  **Scaffold**: Generate the bundle class and clean a previous run.
//! 3.  **Assets**: Mirror the published assets of every bundle.
//! 4.  **Datagrids**: Merge the selected datagrid definitions.
//! 5.  **Extraction**: Migrate the theme and then each ancestor, following
//!     every reference.

pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod merge;
pub mod migration;
pub mod output;
pub mod path;
pub mod pattern;
pub mod phases;
pub mod registry;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
mod path_proptest;
