//! Config fragment merging
//!
//! Bundles contribute fragments of the same config file (`theme.yml`,
//! `assets.yml`, `datagrids.yml`, ...) at the same relative location. The
//! [`ConfigMerger`] reads every fragment in registry order and folds it into
//! one document using [`yaml::merge_replace_strings`].
//!
//! The value-level strategies live in [`yaml`].

pub mod yaml;

use std::path::Path;

use log::debug;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::path::join;
use crate::registry::BundleRegistry;

/// Accumulates config fragments into a single document
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    document: YamlValue,
    fragments: usize,
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMerger {
    /// Start from an empty document
    pub fn new() -> Self {
        Self {
            document: YamlValue::Mapping(Mapping::new()),
            fragments: 0,
        }
    }

    /// Fold one fragment into the document. Empty fragments are ignored.
    pub fn push(&mut self, fragment: &YamlValue) {
        if fragment.is_null() {
            return;
        }
        self.document = yaml::merge_replace_strings(&self.document, fragment);
        self.fragments += 1;
    }

    /// Parse a YAML fragment and fold it into the document
    pub fn push_str(&mut self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Ok(());
        }
        let fragment: YamlValue = serde_yaml::from_str(content)?;
        self.push(&fragment);
        Ok(())
    }

    /// Read `<bundle>/<relative_path>` from every registered bundle, in
    /// registry order, and fold each existing one into a new merger.
    pub fn collect<F: FileSystem>(
        fs: &F,
        registry: &BundleRegistry,
        relative_path: &str,
    ) -> Result<Self> {
        let mut merger = Self::new();
        for bundle in registry.bundles() {
            let full_path = join(&bundle.path, relative_path);
            if !fs.exists(Path::new(&full_path)) {
                continue;
            }
            debug!("Merging config fragment {}", full_path);
            let content = fs.read_to_string(Path::new(&full_path))?;
            merger.push_str(&content)?;
        }
        Ok(merger)
    }

    /// Number of fragments merged so far
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// The merged document
    pub fn document(&self) -> &YamlValue {
        &self.document
    }

    pub fn into_document(self) -> YamlValue {
        self.document
    }

    /// Serialize the merged document
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.document)?)
    }
}
