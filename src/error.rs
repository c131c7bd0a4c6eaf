//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `theme-migration` crate. It uses the `thiserror` library to create a
//! single `Error` enum that covers all anticipated failure modes, providing
//! clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur during a migration run. Each variant corresponds to a specific
//!   failure family and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! ## Fatal and recoverable errors
//!
//! Most variants abort the whole run: a half-migrated bundle is worse than an
//! explicit failure. Two variants describe an optional resource that is
//! simply absent ([`Error::MissingSource`] and
//! [`Error::ResourceRootNotFound`]); callers that can continue without the
//! resource log a warning and skip it. [`Error::is_recoverable`] tells the two
//! groups apart.

use thiserror::Error;

/// Main error type for theme-migration operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two distinct source files were about to be migrated into the same
    /// target file.
    #[error("Target collision for {target}: already migrated from {existing}, now requested from {requested}")]
    FatalCollision {
        target: String,
        existing: String,
        requested: String,
    },

    /// A file path could not be attributed to any bundle.
    #[error("Could not extract bundle information for full path {path}")]
    MissingAttribution { path: String },

    /// A file that should be copied or merged does not exist.
    #[error("Could not find file on path {path}")]
    MissingSource { path: String },

    /// A referenced bundle alias is not registered.
    #[error("Bundle with alias {alias} could not be found")]
    UnknownAlias { alias: String },

    /// A source path does not contain the layout folder of the theme it is
    /// supposed to belong to.
    #[error("Path {path} is outside of the layout folder {marker}")]
    ResourceRootNotFound { path: String, marker: String },

    /// The parent chain of a theme loops back onto itself.
    #[error("Cycle detected in theme hierarchy: {cycle}")]
    CycleDetected { cycle: String },

    /// An error occurred while parsing the `.theme-migration.yaml` file.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred with a filesystem operation.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Whether the run may continue after logging this error as a warning.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingSource { .. } | Error::ResourceRootNotFound { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_fatal_collision() {
        let error = Error::FatalCollision {
            target: "/new/001_a_OroUI.html.twig".to_string(),
            existing: "/ui/a.html.twig".to_string(),
            requested: "/form/a.html.twig".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Target collision"));
        assert!(display.contains("/ui/a.html.twig"));
        assert!(display.contains("/form/a.html.twig"));
    }

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "Invalid YAML".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("Invalid YAML"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "No bundles configured".to_string(),
            hint: Some("Add a 'bundles:' list".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("No bundles configured"));
        assert!(display.contains("hint:"));
        assert!(display.contains("Add a 'bundles:' list"));
    }

    #[test]
    fn test_error_display_unknown_alias() {
        let error = Error::UnknownAlias {
            alias: "orofoobundle".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Bundle with alias orofoobundle could not be found"
        );
    }

    #[test]
    fn test_error_display_cycle_detected() {
        let error = Error::CycleDetected {
            cycle: "a -> b -> a".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Cycle detected"));
        assert!(display.contains("a -> b -> a"));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::MissingSource {
            path: "x".to_string()
        }
        .is_recoverable());
        assert!(Error::ResourceRootNotFound {
            path: "x".to_string(),
            marker: "Resources/views/layouts/default".to_string(),
        }
        .is_recoverable());
        assert!(!Error::MissingAttribution {
            path: "x".to_string()
        }
        .is_recoverable());
        assert!(!Error::UnknownAlias {
            alias: "x".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }

    #[test]
    fn test_error_from_regex_error() {
        let regex_error = regex::Error::Syntax("Invalid regex".to_string());
        let error: Error = regex_error.into();
        assert!(format!("{}", error).contains("Regex error"));
    }
}
