//! Datagrid extraction
//!
//! Selected datagrids declared by any bundle in the theme's
//! `config/datagrids.yml` are merged into one datagrid config of the
//! migrated theme.

use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::merge::yaml::merge_recursive_distinct;
use crate::migration::LoggedFs;
use crate::path::join;
use crate::registry::BundleRegistry;
use crate::resolver::PathResolver;

/// Merge `grids` from every bundle and write them to the migrated theme.
///
/// Returns the path written.
pub fn execute<F: FileSystem>(
    files: &mut LoggedFs<F>,
    registry: &BundleRegistry,
    resolver: &PathResolver,
    theme: &str,
    grids: &[String],
) -> Result<String> {
    let relative = format!("{}/config/datagrids.yml", resolver.search_folder_pattern(theme));
    let mut merged = Mapping::new();

    for bundle in registry.bundles() {
        let path = join(&bundle.path, &relative);
        if !files.exists(&path) {
            continue;
        }
        let content = files.read(&path)?;
        if content.trim().is_empty() {
            continue;
        }
        let document: YamlValue = serde_yaml::from_str(&content)?;
        for grid in grids {
            let Some(definition) = document.get("datagrids").and_then(|d| d.get(grid.as_str())) else {
                continue;
            };
            let key = YamlValue::String(grid.clone());
            let target = merged
                .entry(key)
                .or_insert_with(|| YamlValue::Mapping(Mapping::new()));
            merge_recursive_distinct(target, definition, grid);
        }
    }

    let mut document = Mapping::new();
    document.insert(
        YamlValue::String("datagrids".to_string()),
        YamlValue::Mapping(merged),
    );
    let target = resolver.new_grid_full_path(theme);
    files.write(&target, &serde_yaml::to_string(&YamlValue::Mapping(document))?)?;
    Ok(target)
}
