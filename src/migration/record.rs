//! The target to source ledger of a migration run

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Outcome of claiming a target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The target was free and now belongs to the source
    New,
    /// The target was already produced from the same source
    AlreadyProcessed,
}

/// Maps every produced target path to the source it was produced from.
///
/// A target is registered before its references are followed, so a file
/// reached again through a cycle is seen as already processed.
#[derive(Debug, Clone, Default)]
pub struct MigrationRecord {
    targets: BTreeMap<String, String>,
}

impl MigrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` as produced from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FatalCollision`] when `target` was already produced
    /// from a different source.
    pub fn claim(&mut self, target: &str, source: &str) -> Result<Claim> {
        match self.targets.get(target) {
            Some(existing) if existing == source => Ok(Claim::AlreadyProcessed),
            Some(existing) => Err(Error::FatalCollision {
                target: target.to_string(),
                existing: existing.clone(),
                requested: source.to_string(),
            }),
            None => {
                self.targets.insert(target.to_string(), source.to_string());
                Ok(Claim::New)
            }
        }
    }

    /// Source a target was produced from
    pub fn source_of(&self, target: &str) -> Option<&str> {
        self.targets.get(target).map(String::as_str)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.targets.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `(target, source)` pairs ordered by target
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.targets.iter().map(|(t, s)| (t.as_str(), s.as_str()))
    }
}
