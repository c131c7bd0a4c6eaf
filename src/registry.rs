//! # Bundle Registry
//!
//! The registry is the ordered list of bundles taking part in a migration.
//! It is built once, from the configured bundle list, and passed by
//! reference to every component that needs bundle metadata.
//!
//! Each bundle gets a priority: its 1-based registration ordinal, formatted
//! as a 3-digit zero-padded string. The priority carries no dependency
//! meaning; it only prefixes renamed files so that same-named files from
//! different bundles sort and read predictably.
//!
//! Lookups are case-insensitive. A bundle registered as `OroUIBundle` can be
//! found as `OroUIBundle`, `orouibundle` or `OroUI`.

use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// One registered bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDescriptor {
    /// Bundle name as registered, e.g. `OroUIBundle`
    pub name: String,
    /// Lowercase name without `bundle`, e.g. `oroui`. This is also the name
    /// of the bundle's published asset directory.
    pub alias: String,
    /// Canonical absolute path of the bundle root
    pub path: String,
    /// Zero-padded registration ordinal, e.g. `001`
    pub priority: String,
}

/// Ordered collection of bundles
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: Vec<BundleDescriptor>,
    by_key: HashMap<String, usize>,
}

impl BundleRegistry {
    /// Build a registry from `(name, path)` pairs, in registration order.
    ///
    /// Registering the same name twice keeps the first registration.
    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut registry = Self::default();
        for (name, path) in entries {
            registry.register(name.into(), path.into());
        }
        registry
    }

    fn register(&mut self, name: String, path: String) {
        let key = name.to_lowercase();
        if self.by_key.contains_key(&key) {
            debug!("Bundle {} registered twice, keeping the first entry", name);
            return;
        }
        let priority = format!("{:03}", self.bundles.len() + 1);
        let alias = key.replace("bundle", "");
        self.by_key.insert(key, self.bundles.len());
        self.bundles.push(BundleDescriptor {
            name,
            alias,
            path: crate::path::canonicalize(&path),
            priority,
        });
    }

    /// All bundles in registration order
    pub fn bundles(&self) -> &[BundleDescriptor] {
        &self.bundles
    }

    /// Number of registered bundles
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no bundle is registered
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Find a bundle by name or alias, with or without the `Bundle` suffix.
    pub fn find(&self, name: &str) -> Option<&BundleDescriptor> {
        let mut key = name.to_lowercase();
        if !key.contains("bundle") {
            key.push_str("bundle");
        }
        self.by_key.get(&key).map(|&idx| &self.bundles[idx])
    }

    /// Root path of a bundle referenced by name or alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAlias`] when no such bundle is registered.
    pub fn path_by_name(&self, name: &str) -> Result<&str> {
        self.find(name)
            .map(|bundle| bundle.path.as_str())
            .ok_or_else(|| Error::UnknownAlias {
                alias: name.to_lowercase(),
            })
    }

    /// Bundle whose root contains `path`. Nested bundle roots resolve to the
    /// innermost bundle.
    pub fn owner_of(&self, path: &str) -> Option<&BundleDescriptor> {
        let path = crate::path::canonicalize(path);
        self.bundles
            .iter()
            .filter(|bundle| {
                path.strip_prefix(bundle.path.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|bundle| bundle.path.len())
    }

    /// Priority of a bundle given its exact name (case-insensitive)
    pub fn priority(&self, bundle_name: &str) -> Option<&str> {
        self.by_key
            .get(&bundle_name.to_lowercase())
            .map(|&idx| self.bundles[idx].priority.as_str())
    }
}
