//! Append-only report of the file actions of a run

use serde::Serialize;

/// A file or directory copied into the new bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedEntry {
    pub source: String,
    pub target: String,
}

/// A copy that did not happen, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarnedEntry {
    pub source: String,
    pub message: String,
}

/// Everything copied, skipped or removed during a run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionLog {
    copied: Vec<CopiedEntry>,
    warned: Vec<WarnedEntry>,
    removed: Vec<String>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_copied(&mut self, source: &str, target: &str) {
        self.copied.push(CopiedEntry {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn record_warned(&mut self, source: &str, message: impl Into<String>) {
        self.warned.push(WarnedEntry {
            source: source.to_string(),
            message: message.into(),
        });
    }

    pub fn record_removed(&mut self, path: &str) {
        self.removed.push(path.to_string());
    }

    pub fn copied(&self) -> &[CopiedEntry] {
        &self.copied
    }

    pub fn warned(&self) -> &[WarnedEntry] {
        &self.warned
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Whether a copy from `source` was recorded
    pub fn was_copied(&self, source: &str) -> bool {
        self.copied.iter().any(|entry| entry.source == source)
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.warned.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_order_and_serializes() {
        let mut log = ActionLog::new();
        assert!(log.is_empty());
        log.record_copied("/old/a.twig", "/new/001_a_OroUI.twig");
        log.record_warned("/old/b.twig", "Target file already exists, skipping copy");
        log.record_removed("/new/Resources/public");

        assert!(log.was_copied("/old/a.twig"));
        assert!(!log.was_copied("/old/b.twig"));

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["copied"][0]["target"], "/new/001_a_OroUI.twig");
        assert_eq!(json["warned"][0]["source"], "/old/b.twig");
        assert_eq!(json["removed"][0], "/new/Resources/public");
    }
}
