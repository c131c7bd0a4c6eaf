//! The recursive reference-resolution engine

use std::collections::HashMap;

use log::{debug, warn};

use super::files::LoggedFs;
use super::record::{Claim, MigrationRecord};
use super::rename::{rename_for_bundle, RenamedFile};
use super::FileConfig;
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::migration::ActionLog;
use crate::path::{canonicalize, join, with_dir_prefix};
use crate::registry::BundleRegistry;
use crate::resolver::PathResolver;
use crate::scanner::{FileKind, ReferenceScanner};

/// A referenced file after it was copied into the new bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedReference {
    /// Canonical path of the referenced file in its original bundle
    pub source_path: String,
    /// Canonical path of the copy
    pub target_path: String,
    /// Reference text pointing at the copy
    pub reference: String,
}

/// Copies layout files into the new bundle, following and rewriting their
/// references.
///
/// One engine serves one migration run. It owns the filesystem access and the
/// [`MigrationRecord`] of the run and borrows the registry and the resolver.
pub struct MigrationEngine<'a, F: FileSystem> {
    files: LoggedFs<F>,
    record: MigrationRecord,
    /// Copies made during this run, target -> source
    copies: HashMap<String, String>,
    registry: &'a BundleRegistry,
    resolver: &'a PathResolver,
}

impl<'a, F: FileSystem> MigrationEngine<'a, F> {
    pub fn new(fs: F, registry: &'a BundleRegistry, resolver: &'a PathResolver) -> Self {
        Self {
            files: LoggedFs::new(fs),
            record: MigrationRecord::new(),
            copies: HashMap::new(),
            registry,
            resolver,
        }
    }

    pub fn registry(&self) -> &'a BundleRegistry {
        self.registry
    }

    pub fn resolver(&self) -> &'a PathResolver {
        self.resolver
    }

    pub fn files(&self) -> &LoggedFs<F> {
        &self.files
    }

    /// Filesystem access for the steps of a run outside the traversal
    pub fn files_mut(&mut self) -> &mut LoggedFs<F> {
        &mut self.files
    }

    pub fn record(&self) -> &MigrationRecord {
        &self.record
    }

    /// Give back the filesystem, the action log and the record of the run
    pub fn into_parts(self) -> (F, ActionLog, MigrationRecord) {
        let (fs, log) = self.files.into_parts();
        (fs, log, self.record)
    }

    /// Migrate one layout file of `theme` found in a bundle.
    ///
    /// The file is renamed after its bundle, placed at the same location
    /// below the layout folder of the migrated theme and processed. A file
    /// outside the layout folder of the theme is reported and skipped.
    ///
    /// Returns the target path, or `None` when the file was skipped.
    pub fn migrate_layout_file(
        &mut self,
        source: &str,
        theme: &str,
        config: &FileConfig,
    ) -> Result<Option<String>> {
        let source = canonicalize(source);
        let target = match self.resolver.target_path_for(&source, theme) {
            Ok(target) => target,
            Err(e) if e.is_recoverable() => {
                self.skip(&source, &e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let alias = self.owning_alias(&source)?;
        let renamed = self.copy_with_bundle_suffix(&source, &target, &alias)?;
        self.process_file(&source, &renamed.target_path, config, theme)?;
        Ok(Some(renamed.target_path))
    }

    /// Write `source` to `target` with its references resolved.
    ///
    /// Every referenced file is copied into the new bundle and processed in
    /// turn, depth first. Processing the same target from the same source
    /// again does nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::FatalCollision`] when `target` was produced from another
    ///   source
    /// - [`Error::UnknownAlias`] for a reference into an unregistered bundle
    /// - [`Error::MissingAttribution`] when a file with relative references
    ///   belongs to no bundle
    ///
    /// A referenced file that does not exist is reported and its reference
    /// left untouched.
    pub fn process_file(
        &mut self,
        source: &str,
        target: &str,
        config: &FileConfig,
        theme: &str,
    ) -> Result<()> {
        let source = canonicalize(source);
        let target = canonicalize(target);

        if self.record.claim(&target, &source)? == Claim::AlreadyProcessed {
            debug!("Already processed {} -> {}", source, target);
            return Ok(());
        }
        if !config.parses(&target) {
            return Ok(());
        }

        let kind = FileKind::from_path(&target);
        let scanner = ReferenceScanner::new(self.resolver);
        let mut content = self.files.read(&source)?;

        if config.parse_template_refs {
            for edge in scanner.qualified_references(&content) {
                let (Some(alias), Some(edge_theme)) = (&edge.owner_alias, &edge.theme) else {
                    continue;
                };
                let copied = match self.copy_qualified_reference(alias, &edge.relative_path, edge_theme) {
                    Ok(copied) => copied,
                    Err(e) if e.is_recoverable() => {
                        self.skip(&source, &e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                content = content.replace(&edge.raw, &copied.reference);

                let self_reference = edge
                    .layout_path
                    .as_deref()
                    .is_some_and(|layout_path| source.contains(layout_path));
                if self_reference {
                    debug!("Self reference {} in {}, not following", edge.raw, source);
                    continue;
                }
                self.process_file(&copied.source_path, &copied.target_path, config, edge_theme)?;
            }
        }

        if config.parse_relative_refs && kind == FileKind::Config {
            let new_theme = self.resolver.new_theme_id(theme);
            for edge in scanner.relative_references(&content) {
                if edge.raw.contains(&new_theme) {
                    continue;
                }
                let copied = match self.copy_relative_reference(&edge.raw, &source, theme) {
                    Ok(copied) => copied,
                    Err(e) if e.is_recoverable() => {
                        self.skip(&source, &e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                content = content.replace(
                    &format!("'{}'", edge.raw),
                    &format!("'{}'", copied.reference),
                );
                self.process_file(&copied.source_path, &copied.target_path, config, theme)?;
            }
        }

        if config.parse_asset_refs && kind != FileKind::Config {
            content = scanner.rewrite_asset_references(&content);
        }

        self.files.write(&target, &content)
    }

    /// Copy a file referenced as `@<alias>/layouts/<theme>/<reference_path>`.
    pub fn copy_qualified_reference(
        &mut self,
        alias: &str,
        reference_path: &str,
        theme: &str,
    ) -> Result<CopiedReference> {
        let bundle_path = self.registry.path_by_name(alias)?;
        let source_path =
            canonicalize(&self.resolver.bundle_layout_path(bundle_path, theme, reference_path));

        let layout_prefix = format!("/{}", self.resolver.layout_source_pattern(theme));
        let target_relative = reference_path.replace(&layout_prefix, "");
        let target_path = join(&self.resolver.new_layout_full_path(theme), &target_relative);

        let renamed = self.copy_with_bundle_suffix(&source_path, &target_path, alias)?;
        let target_relative = rename_last_segment(&target_relative, &renamed);
        let reference = self
            .resolver
            .layout_reference(&target_relative, &self.resolver.new_theme_id(theme));

        Ok(CopiedReference {
            source_path,
            target_path: renamed.target_path,
            reference,
        })
    }

    /// Copy a file referenced by a path relative to the directory of
    /// `referencing_source`, inside the layout folder of `theme`.
    ///
    /// The new reference is package-qualified, pointing into the new bundle.
    pub fn copy_relative_reference(
        &mut self,
        reference: &str,
        referencing_source: &str,
        theme: &str,
    ) -> Result<CopiedReference> {
        let referencing_source = canonicalize(referencing_source);
        let alias = self.owning_alias(&referencing_source)?;

        let marker = self.resolver.search_folder_pattern(theme);
        let root_end = referencing_source
            .find(&marker)
            .map(|start| start + marker.len())
            .ok_or_else(|| Error::ResourceRootNotFound {
                path: referencing_source.clone(),
                marker: marker.clone(),
            })?;
        let (theme_root, inside) = referencing_source.split_at(root_end);
        let folder = &inside[..inside.rfind('/').map_or(0, |pos| pos + 1)];

        let source_path = canonicalize(&format!("{}{}{}", theme_root, folder, reference));
        let target_relative = format!("{}{}", folder, reference);
        let target_path = format!(
            "{}{}",
            self.resolver.new_layout_full_path(theme),
            with_dir_prefix(&target_relative)
        );

        let renamed = self.copy_with_bundle_suffix(&source_path, &target_path, &alias)?;
        let target_relative = rename_last_segment(&target_relative, &renamed);
        let reference = canonicalize(
            &self
                .resolver
                .layout_reference(&target_relative, &self.resolver.new_theme_id(theme)),
        );

        Ok(CopiedReference {
            source_path,
            target_path: renamed.target_path,
            reference,
        })
    }

    /// Copy `source` to `target`, renamed after the bundle `alias`.
    ///
    /// A target already produced from the same source during this run is not
    /// copied again. This covers files copied for a self reference, which
    /// are never claimed in the record.
    pub fn copy_with_bundle_suffix(
        &mut self,
        source: &str,
        target: &str,
        alias: &str,
    ) -> Result<RenamedFile> {
        let source = canonicalize(source);
        let renamed = rename_for_bundle(self.registry, target, alias);
        let copied_before = self.record.source_of(&renamed.target_path) == Some(source.as_str())
            || self.copies.get(&renamed.target_path) == Some(&source);
        if copied_before {
            debug!("Already copied {} -> {}", source, renamed.target_path);
            return Ok(renamed);
        }
        self.files.copy(&source, &renamed.target_path, false)?;
        self.copies.insert(renamed.target_path.clone(), source);
        Ok(renamed)
    }

    /// Name of the registered bundle holding `path`, or the name derived
    /// from the path for files outside every registered root
    fn owning_alias(&self, path: &str) -> Result<String> {
        match self.registry.owner_of(path) {
            Some(bundle) => Ok(bundle.name.clone()),
            None => self.resolver.extract_owning_alias(path),
        }
    }

    fn skip(&mut self, source: &str, error: &Error) {
        warn!("{}: {}", source, error);
        self.files.record_warning(source, error.to_string());
    }
}

/// Replace the file name at the end of `path` with the renamed one
fn rename_last_segment(path: &str, renamed: &RenamedFile) -> String {
    match path.strip_suffix(renamed.original_name.as_str()) {
        Some(parent) => format!("{}{}", parent, renamed.new_name),
        None => path.to_string(),
    }
}
