//! Theme extraction
//!
//! Moves one theme into the new bundle:
//!
//! 1. every layout file of the theme in every bundle is migrated through the
//!    [`MigrationEngine`], except `theme.yml` and the `config/` folder
//! 2. the `theme.yml` fragments are merged, their `parent` renamed to the
//!    migrated parent and an optional override document laid on top
//! 3. the auxiliary config files of the theme are merged
//! 4. asset references in the mirrored stylesheets are rewritten

use log::{debug, info};
use serde_yaml::Value as YamlValue;

use super::assets;
use crate::defaults::AUXILIARY_CONFIG_FILES;
use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::merge::yaml::overlay_top_level;
use crate::merge::ConfigMerger;
use crate::migration::{FileConfig, MigrationEngine};
use crate::path::join;

/// What extracting one theme produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeExtraction {
    /// Targets of the seeded layout files
    pub layout_files: Vec<String>,
    /// Merged config files written, `theme.yml` first
    pub config_files: Vec<String>,
    /// Parent theme declared by the merged `theme.yml`, before renaming
    pub parent: Option<String>,
}

/// Extract `theme` into the new bundle.
///
/// `overrides_dir` may hold a `<new theme id>/theme.yml` whose top-level keys
/// replace those of the merged descriptor.
pub fn execute<F: FileSystem>(
    engine: &mut MigrationEngine<'_, F>,
    theme: &str,
    overrides_dir: Option<&str>,
) -> Result<ThemeExtraction> {
    info!("Extracting theme {}", theme);
    let mut extraction = ThemeExtraction {
        layout_files: seed_layout_files(engine, theme)?,
        ..Default::default()
    };

    let (descriptor, parent) = write_theme_descriptor(engine, theme, overrides_dir)?;
    extraction.config_files.extend(descriptor);
    extraction.parent = parent;

    for (name, rewrite_assets) in AUXILIARY_CONFIG_FILES {
        let relative = format!(
            "{}/config/{}",
            engine.resolver().search_folder_pattern(theme),
            name
        );
        if let Some((path, _)) = merge_config_file(engine, &relative, theme, *rewrite_assets)? {
            extraction.config_files.push(path);
        }
    }

    let resolver = engine.resolver();
    assets::rewrite_stylesheets(engine.files_mut(), resolver)?;

    Ok(extraction)
}

/// Whether a file below the theme layout folder is migrated by the engine
fn is_layout_file(relative: &str) -> bool {
    relative != "theme.yml" && !relative.starts_with("config/")
}

fn seed_layout_files<F: FileSystem>(
    engine: &mut MigrationEngine<'_, F>,
    theme: &str,
) -> Result<Vec<String>> {
    let registry = engine.registry();
    let search_folder = engine.resolver().search_folder_pattern(theme);
    let config = FileConfig::default();
    let mut targets = Vec::new();

    for bundle in registry.bundles() {
        let theme_dir = join(&bundle.path, &search_folder);
        for source in engine.files().list_files(&theme_dir)? {
            let relative = source
                .strip_prefix(theme_dir.as_str())
                .unwrap_or(&source)
                .trim_start_matches('/');
            if !is_layout_file(relative) {
                continue;
            }
            if let Some(target) = engine.migrate_layout_file(&source, theme, &config)? {
                targets.push(target);
            }
        }
    }

    debug!("Seeded {} layout files of theme {}", targets.len(), theme);
    Ok(targets)
}

/// Merge one config file of `theme` from every bundle and write it into the
/// migrated theme. Nothing is written when no bundle has the file.
///
/// Returns the written path and the merged document.
fn merge_config_file<F: FileSystem>(
    engine: &mut MigrationEngine<'_, F>,
    relative: &str,
    theme: &str,
    rewrite_assets: bool,
) -> Result<Option<(String, YamlValue)>> {
    let resolver = engine.resolver();
    let merger = ConfigMerger::collect(engine.files().inner(), engine.registry(), relative)?;
    if merger.fragment_count() == 0 {
        return Ok(None);
    }

    let mut text = merger.to_yaml_string()?;
    if rewrite_assets {
        text = resolver.rewrite_bare_asset_refs(&text);
    }
    let target = resolver.with_bundle_path(&resolver.replace_theme_name(relative, theme));
    engine.files_mut().write(&target, &text)?;
    debug!("Merged {} fragments into {}", merger.fragment_count(), target);

    let document: YamlValue = serde_yaml::from_str(&text)?;
    Ok(Some((target, document)))
}

/// Merge `theme.yml`, rename its parent and apply the override document.
///
/// Returns the written path and the original parent id.
fn write_theme_descriptor<F: FileSystem>(
    engine: &mut MigrationEngine<'_, F>,
    theme: &str,
    overrides_dir: Option<&str>,
) -> Result<(Option<String>, Option<String>)> {
    let resolver = engine.resolver();
    let relative = format!("{}/theme.yml", resolver.search_folder_pattern(theme));
    let Some((target, mut descriptor)) = merge_config_file(engine, &relative, theme, true)? else {
        return Ok((None, None));
    };

    let parent = descriptor
        .get("parent")
        .and_then(YamlValue::as_str)
        .map(str::to_string);
    if let (Some(parent), YamlValue::Mapping(map)) = (&parent, &mut descriptor) {
        map.insert(
            YamlValue::String("parent".to_string()),
            YamlValue::String(resolver.new_theme_id(parent)),
        );
    }

    if let Some(dir) = overrides_dir {
        let override_path = join(dir, &format!("{}/theme.yml", resolver.new_theme_id(theme)));
        if engine.files().exists(&override_path) {
            let content = engine.files().read(&override_path)?;
            if !content.trim().is_empty() {
                let overlay: YamlValue = serde_yaml::from_str(&content)?;
                overlay_top_level(&mut descriptor, &overlay);
                info!("Applied theme override {}", override_path);
            }
        }
    }

    engine
        .files_mut()
        .write(&target, &serde_yaml::to_string(&descriptor)?)?;
    Ok((Some(target), parent))
}
