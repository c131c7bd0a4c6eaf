//! Default values for theme-migration configuration.
//!
//! This module provides centralized default values used across the library
//! and the commands, ensuring consistency and avoiding duplication.

/// Theme migrated when neither the config file nor `--theme` names one.
pub const DEFAULT_THEME_ID: &str = "default";

/// Version suffix appended to migrated theme ids and to the new bundle name.
pub const DEFAULT_APP_VERSION: &str = "50";

/// Priority used for bundles that are not in the registry.
pub const UNKNOWN_PRIORITY: &str = "500";

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".theme-migration.yaml";

/// File extensions whose content is scanned for references.
pub const PARSED_EXTENSIONS: &[&str] = &["twig", "yml"];

/// Auxiliary theme config files merged across bundles, with whether asset
/// references inside them are rewritten.
pub const AUXILIARY_CONFIG_FILES: &[(&str, bool)] = &[
    ("assets.yml", true),
    ("page_templates.yml", true),
    ("images.yml", true),
    ("screens.yml", true),
    ("widgets.yml", true),
    ("jsmodules.yml", false),
];

/// Returns the default application root: the current directory.
pub fn default_app_root() -> std::path::PathBuf {
    std::path::PathBuf::from(".")
}

/// Returns the default version suffix as an owned string, for serde.
pub fn default_app_version() -> String {
    DEFAULT_APP_VERSION.to_string()
}

/// Returns the default theme id as an owned string, for serde.
pub fn default_theme_id() -> String {
    DEFAULT_THEME_ID.to_string()
}
