//! Published bundle assets
//!
//! Every bundle publishes its assets to `public/bundles/<alias>`. They are
//! mirrored into the public folder of the new bundle, after which asset
//! references in the mirrored stylesheets are prefixed with the new bundle
//! alias.

use log::debug;

use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::migration::LoggedFs;
use crate::path::{file_name, glob_match, join};
use crate::registry::BundleRegistry;
use crate::resolver::{PathResolver, BUNDLE_BASE_NAME, BUNDLE_VENDOR};

/// Stylesheets whose asset references are rewritten
pub const STYLESHEET_PATTERN: &str = "*.scss";

/// Mirror the published assets of every bundle into the new bundle.
///
/// Generated theme bundles, this run's included, are skipped. Returns the
/// aliases that were mirrored.
pub fn mirror_public_assets<F: FileSystem>(
    files: &mut LoggedFs<F>,
    registry: &BundleRegistry,
    resolver: &PathResolver,
) -> Result<Vec<String>> {
    let generated_prefix = format!("{}{}", BUNDLE_VENDOR, BUNDLE_BASE_NAME).to_lowercase();
    let public_bundles = resolver.public_bundles_path();
    let mut mirrored = Vec::new();

    for bundle in registry.bundles() {
        if bundle.alias.starts_with(&generated_prefix) {
            continue;
        }
        let published = join(&public_bundles, &bundle.alias);
        if !files.exists(&published) {
            continue;
        }
        files.copy(&published, &resolver.new_asset_full_path(&bundle.alias), false)?;
        mirrored.push(bundle.alias.clone());
    }

    Ok(mirrored)
}

/// Rewrite bare asset references in every stylesheet of the new bundle.
///
/// Returns the stylesheets that changed.
pub fn rewrite_stylesheets<F: FileSystem>(
    files: &mut LoggedFs<F>,
    resolver: &PathResolver,
) -> Result<Vec<String>> {
    let mut changed = Vec::new();
    for path in files.list_files(&resolver.new_asset_full_path(""))? {
        if !glob_match(STYLESHEET_PATTERN, file_name(&path))? {
            continue;
        }
        let content = files.read(&path)?;
        let rewritten = resolver.rewrite_bare_asset_refs(&content);
        if rewritten != content {
            debug!("Rewrote asset references in {}", path);
            files.write(&path, &rewritten)?;
            changed.push(path);
        }
    }
    Ok(changed)
}
