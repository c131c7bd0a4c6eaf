//! # Path Resolver
//!
//! Pure derivation of every name, path and pattern used during a migration.
//! A [`PathResolver`] is built once per run from the application root, the
//! version suffix and the theme hierarchy; afterwards it never changes and
//! never touches the filesystem.
//!
//! ## Layout conventions
//!
//! - A bundle keeps the layouts of a theme in
//!   `<bundle>/Resources/views/layouts/<theme>/`.
//! - Published assets of a bundle live in `<app>/public/bundles/<alias>/`.
//! - The generated bundle is `<app>/src/Oro/Bundle/ThemeDefault<version>Bundle`
//!   and is referenced from templates as `@OroThemeDefault<version>`.
//! - A migrated theme is renamed `<theme>_<version>`.
//!
//! ## Patterns
//!
//! The theme patterns contain an alternation of every theme id in the
//! hierarchy, so a child theme may reference layouts of any ancestor:
//!
//! | pattern | example match |
//! |---|---|
//! | qualified template reference | `@OroUI/layouts/default/dialog/dialog.html.twig` |
//! | relative template reference | `'dialog.html.twig'` (inside quotes) |
//! | themed asset reference | `bundles/oroui/default/` |
//! | template asset reference | `bundles/oroui/` |
//! | bare asset reference | `oroui/` not preceded by `@`, `^` or the new alias |

use regex::Regex;

use crate::error::{Error, Result};
use crate::path::{canonicalize, join, with_dir_prefix};
use crate::pattern::LookaroundPattern;

/// Vendor prefix of the generated bundle
pub const BUNDLE_VENDOR: &str = "Oro";

/// Base folder name of the generated bundle, before the version suffix
pub const BUNDLE_BASE_NAME: &str = "ThemeDefault";

/// Folder holding the published assets of a bundle
pub const PUBLIC_FOLDER: &str = "Resources/public";

/// Folder holding the layouts of a bundle
pub const VIEWS_FOLDER: &str = "Resources/views";

/// Asset directory names are bundle aliases with this vendor prefix.
const ASSET_DIR_REGEX: &str = r"oro[a-z\d_\-*]+/";

const BUNDLE_PATH_REGEX: &str =
    r"(?i)(?P<prefix>[a-z\d_\-*]+)(?P<marker>/Bundle/|/Bridge/)?(?P<name>[a-z\d_\-*]*)/Resources/";

/// Names, paths and reference patterns for one migration run
#[derive(Debug, Clone)]
pub struct PathResolver {
    app_root: String,
    app_version: String,
    hierarchy: Vec<String>,
    new_bundle_path: String,
    new_bundle_ref_alias: String,
    new_asset_alias: String,
    template_ref: Regex,
    template_relative_ref: LookaroundPattern,
    asset_bundle_ref: LookaroundPattern,
    template_asset_ref: LookaroundPattern,
    asset_ref: LookaroundPattern,
    bundle_path: Regex,
}

impl PathResolver {
    /// Derive every name and pattern for a run.
    ///
    /// `hierarchy` lists theme ids from the most derived theme to the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Path`] for an empty hierarchy and [`Error::Regex`]
    /// if a pattern fails to compile.
    pub fn new(app_root: &str, app_version: &str, hierarchy: &[String]) -> Result<Self> {
        if hierarchy.is_empty() {
            return Err(Error::Path {
                message: "Theme hierarchy must contain at least one theme".to_string(),
            });
        }

        let app_root = canonicalize(app_root);
        let themes = hierarchy
            .iter()
            .map(|theme| regex::escape(theme))
            .collect::<Vec<_>>()
            .join("|");

        let folder = format!("{}{}Bundle", BUNDLE_BASE_NAME, app_version);
        let new_bundle_path = join(&app_root, &format!("src/{}/Bundle/{}", BUNDLE_VENDOR, folder));
        let short_alias = format!("{}{}{}", BUNDLE_VENDOR, BUNDLE_BASE_NAME, app_version);
        let new_asset_alias = short_alias.to_lowercase();

        let template_ref = Regex::new(&format!(
            r"@([A-Za-z\d_]+)/(layouts/({})/([a-zA-Z\-_\d+/.]*))",
            themes
        ))?;
        let template_relative_ref = LookaroundPattern::new(r"[.a-zA-Z\d+\-_/]*\.twig")?
            .preceded_by("'")
            .followed_by("'");
        let asset_bundle_ref = LookaroundPattern::new(&format!(r"[a-z]+/(?:{})/", themes))?
            .preceded_by("bundles/");
        let template_asset_ref = LookaroundPattern::new(ASSET_DIR_REGEX)?
            .preceded_by("bundles/")
            .not_followed_by("oro");
        let asset_ref = LookaroundPattern::new(ASSET_DIR_REGEX)?
            .not_preceded_by("@")
            .not_preceded_by("^")
            .not_preceded_by(&format!("{}/", new_asset_alias))
            .not_followed_by("oro");

        Ok(Self {
            app_root,
            app_version: app_version.to_string(),
            hierarchy: hierarchy.to_vec(),
            new_bundle_path,
            new_bundle_ref_alias: format!("@{}", short_alias),
            new_asset_alias,
            template_ref,
            template_relative_ref,
            asset_bundle_ref,
            template_asset_ref,
            asset_ref,
            bundle_path: Regex::new(BUNDLE_PATH_REGEX)?,
        })
    }

    /// Canonical application root
    pub fn app_root(&self) -> &str {
        &self.app_root
    }

    /// Theme ids from most derived to root
    pub fn hierarchy(&self) -> &[String] {
        &self.hierarchy
    }

    /// Id of the migrated counterpart of a theme, e.g. `default_50`
    pub fn new_theme_id(&self, theme_id: &str) -> String {
        format!("{}_{}", theme_id, self.app_version)
    }

    /// Folder name of the generated bundle, e.g. `ThemeDefault50Bundle`
    pub fn bundle_folder_name(&self) -> String {
        format!("{}{}Bundle", BUNDLE_BASE_NAME, self.app_version)
    }

    /// Class name of the generated bundle, e.g. `OroThemeDefault50Bundle`
    pub fn bundle_class_name(&self) -> String {
        format!("{}{}", BUNDLE_VENDOR, self.bundle_folder_name())
    }

    /// Root of the generated bundle
    pub fn new_bundle_path(&self) -> &str {
        &self.new_bundle_path
    }

    /// A path inside the generated bundle
    pub fn with_bundle_path(&self, tail: &str) -> String {
        join(&self.new_bundle_path, tail)
    }

    /// Lowercase alias of the generated bundle, e.g. `orothemedefault50`
    pub fn new_asset_alias(&self) -> &str {
        &self.new_asset_alias
    }

    /// Public asset folder of the generated bundle, optionally with a tail
    pub fn new_asset_full_path(&self, tail: &str) -> String {
        join(&self.with_bundle_path(PUBLIC_FOLDER), tail)
    }

    /// Folder of published bundle assets, `<app>/public/bundles`
    pub fn public_bundles_path(&self) -> String {
        join(&self.app_root, "public/bundles")
    }

    /// `layouts/<theme>`
    pub fn layout_source_pattern(&self, theme_id: &str) -> String {
        format!("layouts/{}", theme_id)
    }

    /// `Resources/views/layouts/<theme>`, the layout root of a theme in any
    /// bundle
    pub fn search_folder_pattern(&self, theme_id: &str) -> String {
        format!("{}/{}", VIEWS_FOLDER, self.layout_source_pattern(theme_id))
    }

    /// Layout root of the migrated theme, relative to the generated bundle
    pub fn new_layout_folder_pattern(&self, theme_id: &str) -> String {
        self.search_folder_pattern(&self.new_theme_id(theme_id))
    }

    /// Absolute layout root of the migrated theme
    pub fn new_layout_full_path(&self, theme_id: &str) -> String {
        self.with_bundle_path(&self.new_layout_folder_pattern(theme_id))
    }

    /// `<bundle>/Resources/views/layouts/<theme>/<file>`
    pub fn bundle_layout_path(&self, bundle_path: &str, theme_id: &str, file: &str) -> String {
        join(&join(bundle_path, &self.search_folder_pattern(theme_id)), file)
    }

    /// Reference to a file of the migrated theme in `@Bundle/layouts/...`
    /// notation
    pub fn layout_reference(&self, file_path: &str, new_theme_id: &str) -> String {
        format!(
            "{}/{}{}",
            self.new_bundle_ref_alias,
            self.layout_source_pattern(new_theme_id),
            with_dir_prefix(file_path)
        )
    }

    /// Replace every occurrence of the theme id in `pattern` with the new id
    pub fn replace_theme_name(&self, pattern: &str, theme_id: &str) -> String {
        pattern.replace(theme_id, &self.new_theme_id(theme_id))
    }

    /// Location of a migrated layout file inside the generated bundle.
    ///
    /// Everything before `Resources/views/layouts/<theme>` is dropped and the
    /// theme segment is renamed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceRootNotFound`] when the source is not inside
    /// the layout folder of `theme_id`.
    pub fn target_path_for(&self, source_path: &str, theme_id: &str) -> Result<String> {
        let marker = self.search_folder_pattern(theme_id);
        let source_path = canonicalize(source_path);
        let start = source_path
            .find(&marker)
            .ok_or_else(|| Error::ResourceRootNotFound {
                path: source_path.clone(),
                marker: marker.clone(),
            })?;
        let target = source_path[start..].replace(
            &self.layout_source_pattern(theme_id),
            &self.layout_source_pattern(&self.new_theme_id(theme_id)),
        );
        Ok(self.with_bundle_path(&target))
    }

    /// Name of the bundle owning a file, derived from its path.
    ///
    /// `.../Oro/Bundle/UIBundle/Resources/...` gives `OroUIBundle`,
    /// `.../Oro/Bridge/Foo/Resources/...` gives `OroFooBridge` and
    /// `.../AcmeBundle/Resources/...` gives `AcmeBundle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribution`] when no bundle can be derived.
    pub fn extract_owning_alias(&self, full_path: &str) -> Result<String> {
        let captures =
            self.bundle_path
                .captures(full_path)
                .ok_or_else(|| Error::MissingAttribution {
                    path: full_path.to_string(),
                })?;
        let prefix = captures.name("prefix").map_or("", |m| m.as_str());
        let name = captures.name("name").map_or("", |m| m.as_str());
        let is_bridge = captures
            .name("marker")
            .is_some_and(|m| m.as_str().contains("Bridge"));

        if name.contains("Bundle") {
            Ok(format!("{}{}", prefix, name))
        } else if is_bridge {
            Ok(format!("{}{}Bridge", prefix, name))
        } else {
            Ok(prefix.to_string())
        }
    }

    /// Path of the extracted datagrid config of the migrated theme
    pub fn new_grid_full_path(&self, theme_id: &str) -> String {
        join(&self.new_layout_full_path(theme_id), "config/datagrids.yml")
    }

    /// `@Alias/layouts/<theme>/<path>` references
    pub fn template_ref_regex(&self) -> &Regex {
        &self.template_ref
    }

    /// Quoted `.twig` paths without a bundle alias
    pub fn template_relative_ref_pattern(&self) -> &LookaroundPattern {
        &self.template_relative_ref
    }

    /// `bundles/<alias>/<theme>/` asset references
    pub fn asset_bundle_ref_pattern(&self) -> &LookaroundPattern {
        &self.asset_bundle_ref
    }

    /// `bundles/<alias>/` asset references in templates
    pub fn template_asset_ref_pattern(&self) -> &LookaroundPattern {
        &self.template_asset_ref
    }

    /// Bare `<alias>/` asset references in stylesheets and config files
    pub fn asset_ref_pattern(&self) -> &LookaroundPattern {
        &self.asset_ref
    }

    /// Prefix every bare asset reference in `content` with the new alias
    pub fn rewrite_bare_asset_refs(&self, content: &str) -> String {
        self.asset_ref
            .replace_all(content, |caps| format!("{}/{}", self.new_asset_alias, &caps[0]))
    }
}
