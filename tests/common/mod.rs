//! Shared test utilities for integration and E2E tests.
//!
//! [`AppFixture`] lays out a small application on disk: bundles with theme
//! layout folders, published assets and a `.theme-migration.yaml` listing
//! them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let app = AppFixture::new().with_bundle("OroUIBundle", "vendor/ui");
//!     app.layout("vendor/ui", "default", "page.html.twig", "page");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::AppFixture;
    #[allow(unused_imports)]
    pub use super::NEW_LAYOUTS;
}

/// Layout folder of the generated bundle, relative to the application root
#[allow(dead_code)]
pub const NEW_LAYOUTS: &str = "src/Oro/Bundle/ThemeDefault50Bundle/Resources/views/layouts";

/// A temporary application root with its bundles
pub struct AppFixture {
    pub temp: TempDir,
    bundles: Vec<(String, String)>,
    theme: String,
    datagrids: Vec<String>,
}

#[allow(dead_code)]
impl AppFixture {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            bundles: Vec::new(),
            theme: "default".to_string(),
            datagrids: Vec::new(),
        }
    }

    /// Register a bundle living at `path` below the application root
    pub fn with_bundle(mut self, name: &str, path: &str) -> Self {
        self.bundles.push((name.to_string(), path.to_string()));
        self
    }

    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = theme.to_string();
        self
    }

    pub fn with_datagrid(mut self, grid: &str) -> Self {
        self.datagrids.push(grid.to_string());
        self
    }

    /// Application root with forward slashes
    pub fn root(&self) -> String {
        self.temp.path().to_string_lossy().replace('\\', "/")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Write a file below the application root
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        self.temp.child(relative).write_str(content).unwrap();
        self
    }

    /// Write a file into the layout folder of `theme` in a bundle
    pub fn layout(&self, bundle_path: &str, theme: &str, file: &str, content: &str) -> &Self {
        self.file(
            &format!("{}/Resources/views/layouts/{}/{}", bundle_path, theme, file),
            content,
        )
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.path(relative)).ok()
    }

    /// Read a file of a migrated theme
    pub fn read_migrated(&self, theme: &str, file: &str) -> Option<String> {
        self.read(&format!("{}/{}_50/{}", NEW_LAYOUTS, theme, file))
    }

    /// The configuration YAML for this application
    pub fn config_yaml(&self) -> String {
        let mut yaml = format!("app_root: .\ntheme: {}\nbundles:\n", self.theme);
        for (name, path) in &self.bundles {
            yaml.push_str(&format!("  - name: {}\n    path: {}\n", name, path));
        }
        if !self.datagrids.is_empty() {
            yaml.push_str("datagrids_to_migrate:\n");
            for grid in &self.datagrids {
                yaml.push_str(&format!("  - {}\n", grid));
            }
        }
        yaml
    }

    /// Write `.theme-migration.yaml` at the application root
    pub fn write_config(&self) -> PathBuf {
        let path = self.path(".theme-migration.yaml");
        std::fs::write(&path, self.config_yaml()).unwrap();
        path
    }

    pub fn exists(&self, relative: &str) -> bool {
        Path::new(&self.path(relative)).exists()
    }
}

impl Default for AppFixture {
    fn default() -> Self {
        Self::new()
    }
}
