//! Orchestrator for the complete migration
//!
//! This module coordinates all phases to provide a clean API for a complete
//! migration run.

use log::info;
use serde::Serialize;

use super::{assets, datagrids, extract, hierarchy, scaffold};
use crate::config::MigrationConfig;
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::migration::{ActionLog, MigrationEngine};
use crate::resolver::PathResolver;

/// Outcome of a migration run
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    /// Root of the generated bundle
    pub bundle_path: String,
    /// Theme ids from the migrated theme up to its root ancestor
    pub hierarchy: Vec<String>,
    /// Migrated theme ids, in extraction order
    pub migrated_themes: Vec<String>,
    /// Datagrid config written for the migrated theme
    pub datagrid_path: String,
    /// Number of files produced by the reference traversal
    pub migrated_files: usize,
    /// Every copy, skipped copy and removal of the run
    pub actions: ActionLog,
}

/// Execute the complete migration
///
/// 1. Walk the theme hierarchy and derive the naming rules
/// 2. Generate the new bundle class and registration
/// 3. Remove views and assets of a previous run
/// 4. Mirror the published assets of every bundle
/// 5. Extract the configured datagrids
/// 6. Extract the theme, then each of its ancestors
///
/// The filesystem is handed back together with the report.
pub fn execute_migration<F: FileSystem>(fs: F, config: &MigrationConfig) -> Result<(F, MigrationReport)> {
    config.validate()?;
    let registry = config.registry();

    // Phase 1: Theme hierarchy
    let hierarchy = hierarchy::execute(&fs, &registry, &config.theme)?;
    info!("Theme hierarchy: {}", hierarchy.join(" -> "));
    let resolver = PathResolver::new(&config.app_root_path(), &config.app_version, &hierarchy)?;

    let mut engine = MigrationEngine::new(fs, &registry, &resolver);

    // Phase 2: Bundle skeleton
    scaffold::generate_bundle(engine.files_mut(), &resolver)?;

    // Phase 3: Clean previous output
    scaffold::clean_bundle(engine.files_mut(), &resolver)?;

    // Phase 4: Published assets
    assets::mirror_public_assets(engine.files_mut(), &registry, &resolver)?;

    // Phase 5: Datagrids
    let datagrid_path = datagrids::execute(
        engine.files_mut(),
        &registry,
        &resolver,
        &config.theme,
        &config.datagrids_to_migrate,
    )?;

    // Phase 6: Theme extraction, child first
    let overrides = config.overrides_path();
    let mut migrated_themes: Vec<String> = Vec::new();
    let mut next = Some(config.theme.clone());
    while let Some(theme) = next {
        if migrated_themes.contains(&theme) {
            migrated_themes.push(theme);
            return Err(Error::CycleDetected {
                cycle: migrated_themes.join(" -> "),
            });
        }
        let extraction = extract::execute(&mut engine, &theme, overrides.as_deref())?;
        migrated_themes.push(theme);
        next = extraction.parent;
    }

    let migrated_files = engine.record().len();
    let (fs, actions, _) = engine.into_parts();
    info!(
        "Migrated {} files of {} themes into {}",
        migrated_files,
        migrated_themes.len(),
        resolver.new_bundle_path()
    );

    Ok((
        fs,
        MigrationReport {
            bundle_path: resolver.new_bundle_path().to_string(),
            hierarchy,
            migrated_themes,
            datagrid_path,
            migrated_files,
            actions,
        },
    ))
}
