//! Theme hierarchy discovery
//!
//! A theme declares its parent in `Resources/views/layouts/<theme>/theme.yml`.
//! Bundles are searched in registry order and the first declared `parent`
//! wins. The walk continues until a theme without parent is reached.

use std::path::Path;

use log::debug;
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::path::join;
use crate::registry::BundleRegistry;

/// Path of the theme descriptor below a bundle root
pub fn theme_descriptor_path(theme: &str) -> String {
    format!("Resources/views/layouts/{}/theme.yml", theme)
}

/// First `parent` declared for `theme` by any bundle
pub fn declared_parent<F: FileSystem>(
    fs: &F,
    registry: &BundleRegistry,
    theme: &str,
) -> Result<Option<String>> {
    for bundle in registry.bundles() {
        let descriptor = join(&bundle.path, &theme_descriptor_path(theme));
        if !fs.exists(Path::new(&descriptor)) {
            continue;
        }
        let content = fs.read_to_string(Path::new(&descriptor))?;
        if content.trim().is_empty() {
            continue;
        }
        let info: YamlValue = serde_yaml::from_str(&content)?;
        if let Some(parent) = info.get("parent").and_then(YamlValue::as_str) {
            debug!("Theme {} extends {} ({})", theme, parent, descriptor);
            return Ok(Some(parent.to_string()));
        }
    }
    Ok(None)
}

/// Theme ids from `theme` up to its root ancestor.
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] when a theme is its own ancestor.
pub fn execute<F: FileSystem>(
    fs: &F,
    registry: &BundleRegistry,
    theme: &str,
) -> Result<Vec<String>> {
    let mut hierarchy = vec![theme.to_string()];
    let mut current = theme.to_string();

    while let Some(parent) = declared_parent(fs, registry, &current)? {
        if hierarchy.contains(&parent) {
            hierarchy.push(parent);
            return Err(Error::CycleDetected {
                cycle: hierarchy.join(" -> "),
            });
        }
        hierarchy.push(parent.clone());
        current = parent;
    }

    Ok(hierarchy)
}
