//! Collision-free file names
//!
//! Files with the same name from different bundles end up in the same
//! folder of the new bundle, so each copy is renamed after its bundle:
//! `block.html.twig` from `OroUIBundle` with priority `001` becomes
//! `001_block_OroUI.html.twig`. Only the part of the name before the first
//! `.` changes.

use crate::defaults::UNKNOWN_PRIORITY;
use crate::path::{canonicalize, file_name};
use crate::registry::BundleRegistry;

/// A target path before and after renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    /// File name before renaming, e.g. `block.html.twig`
    pub original_name: String,
    /// File name after renaming, e.g. `001_block_OroUI.html.twig`
    pub new_name: String,
    /// Canonical target path carrying the new name
    pub target_path: String,
}

/// Rename the last segment of `target_path` after the bundle it comes from.
///
/// `bundle_alias` may carry the `Bundle` suffix or not. Bundles missing from
/// the registry get priority `500`.
pub fn rename_for_bundle(
    registry: &BundleRegistry,
    target_path: &str,
    bundle_alias: &str,
) -> RenamedFile {
    let alias = bundle_alias.replace("Bundle", "");
    let priority = registry
        .priority(&format!("{}Bundle", alias))
        .unwrap_or(UNKNOWN_PRIORITY);
    rename_with_priority(target_path, &alias, priority)
}

/// Rename with an explicit priority and a suffix-free alias
pub fn rename_with_priority(target_path: &str, alias: &str, priority: &str) -> RenamedFile {
    let original_name = file_name(target_path).to_string();
    let (stem, rest) = match original_name.find('.') {
        Some(pos) => original_name.split_at(pos),
        None => (original_name.as_str(), ""),
    };
    let new_name = format!("{}_{}_{}{}", priority, stem, alias, rest);

    let parent_len = target_path.len() - original_name.len();
    let target_path = canonicalize(&format!("{}{}", &target_path[..parent_len], new_name));

    RenamedFile {
        original_name,
        new_name,
        target_path,
    }
}
