//! # Output
//!
//! Rendering of migration reports for the terminal, and the color settings
//! that go with it.
//!
//! ## Respecting User Preferences
//!
//! Colors follow, in order of precedence:
//! - `--color=never|always|auto`
//! - `NO_COLOR` (any value disables colors, see https://no-color.org/)
//! - `CLICOLOR=0` / `CLICOLOR_FORCE=1`
//! - `TERM=dumb`
//! - whether stdout is a color-capable terminal

use std::env;
use std::fmt::Write as _;

use console::style;

use crate::error::Result;
use crate::phases::MigrationReport;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the color setting from the `--color` flag and the
    /// environment. Unknown flag values behave like `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain marker otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn heading(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        style(text).bold().to_string()
    } else {
        text.to_string()
    }
}

/// Human-readable summary of a run.
///
/// With `verbose`, every copied, skipped and removed path is listed.
pub fn render_report(report: &MigrationReport, config: &OutputConfig, verbose: bool) -> String {
    let mut out = String::new();
    let actions = &report.actions;

    let _ = writeln!(
        out,
        "{} Migrated theme {} into {}",
        emoji(config, "✅", "[OK]"),
        report.hierarchy.join(" -> "),
        report.bundle_path
    );
    let _ = writeln!(
        out,
        "   {} files migrated, {} copied, {} skipped, {} removed",
        report.migrated_files,
        actions.copied().len(),
        actions.warned().len(),
        actions.removed().len()
    );
    let _ = writeln!(out, "   datagrids: {}", report.datagrid_path);

    if verbose {
        if !actions.copied().is_empty() {
            let _ = writeln!(out, "\n{}", heading(config, "COPIED:"));
            for entry in actions.copied() {
                let _ = writeln!(out, "  {}\n    -> {}", entry.source, entry.target);
            }
        }
        if !actions.warned().is_empty() {
            let _ = writeln!(out, "\n{}", heading(config, "WARNING:"));
            for entry in actions.warned() {
                let _ = writeln!(out, "  {}\n    {}", entry.source, entry.message);
            }
        }
        if !actions.removed().is_empty() {
            let _ = writeln!(out, "\n{}", heading(config, "REMOVED:"));
            for path in actions.removed() {
                let _ = writeln!(out, "  {}", path);
            }
        }
    } else if !actions.warned().is_empty() {
        let _ = writeln!(
            out,
            "{} {} references could not be resolved, rerun with --verbose for details",
            emoji(config, "⚠️", "[WARN]"),
            actions.warned().len()
        );
    }

    out
}

/// The report as pretty-printed JSON
pub fn render_report_json(report: &MigrationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ActionLog;

    fn report() -> MigrationReport {
        let mut actions = ActionLog::new();
        actions.record_copied("/old/a.html.twig", "/new/001_a_OroUI.html.twig");
        actions.record_warned("/old/b.html.twig", "Could not find file on path /old/c.html.twig");
        actions.record_removed("/new/Resources/views");
        MigrationReport {
            bundle_path: "/new".to_string(),
            hierarchy: vec!["custom".to_string(), "default".to_string()],
            migrated_themes: vec!["custom".to_string(), "default".to_string()],
            datagrid_path: "/new/datagrids.yml".to_string(),
            migrated_files: 1,
            actions,
        }
    }

    #[test]
    fn test_color_flags() {
        assert!(OutputConfig::from_env_and_flag("always").use_color);
        assert!(!OutputConfig::from_env_and_flag("NEVER").use_color);
    }

    #[test]
    fn test_emoji_helper() {
        assert_eq!(emoji(&OutputConfig::with_color(), "✅", "[OK]"), "✅");
        assert_eq!(emoji(&OutputConfig::without_color(), "✅", "[OK]"), "[OK]");
    }

    #[test]
    fn test_render_report_summary() {
        let text = render_report(&report(), &OutputConfig::without_color(), false);
        assert!(text.starts_with("[OK] Migrated theme custom -> default into /new"));
        assert!(text.contains("1 files migrated, 1 copied, 1 skipped, 1 removed"));
        assert!(text.contains("[WARN] 1 references could not be resolved"));
        assert!(!text.contains("COPIED:"));
    }

    #[test]
    fn test_render_report_verbose_lists_actions() {
        let text = render_report(&report(), &OutputConfig::without_color(), true);
        assert!(text.contains("COPIED:\n  /old/a.html.twig\n    -> /new/001_a_OroUI.html.twig"));
        assert!(text.contains("WARNING:\n  /old/b.html.twig"));
        assert!(text.contains("REMOVED:\n  /new/Resources/views"));
    }

    #[test]
    fn test_render_report_json() {
        let json: serde_json::Value =
            serde_json::from_str(&render_report_json(&report()).unwrap()).unwrap();
        assert_eq!(json["hierarchy"][1], "default");
        assert_eq!(json["actions"]["copied"][0]["source"], "/old/a.html.twig");
    }
}
