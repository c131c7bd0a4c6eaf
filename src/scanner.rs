//! # Reference Scanner
//!
//! Finds the places where a layout file points at another file. The scanner
//! is read-only: it reports [`ReferenceEdge`]s and leaves copying and
//! rewriting to the migration engine. The one exception is
//! [`ReferenceScanner::rewrite_asset_references`], since asset references
//! are rewritten in place and never followed.
//!
//! ## Reference kinds
//!
//! - **Package-qualified template**: `@OroUI/layouts/default/dialog.html.twig`
//! - **Relative template**: `'dialog.html.twig'`, only inside `yml` files,
//!   relative to the directory of the referencing file
//! - **Asset**: `bundles/oroui/`, the published asset folder of a bundle
//! - **Package-qualified asset**: `bundles/oroui/default/`, a themed asset
//!   folder of a bundle

use std::ops::Range;

use crate::path::extension;
use crate::resolver::PathResolver;

/// The kinds of file the scanner understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `twig` templates
    Template,
    /// `yml` layout updates and config fragments
    Config,
    /// Anything else; copied verbatim
    Other,
}

impl FileKind {
    /// Classify a path by its extension
    pub fn from_path(path: &str) -> Self {
        match extension(path) {
            "twig" => FileKind::Template,
            "yml" => FileKind::Config,
            _ => FileKind::Other,
        }
    }

    /// Whether files of this kind are scanned at all
    pub fn is_parsed(self) -> bool {
        !matches!(self, FileKind::Other)
    }
}

/// Kind of a reference found in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    PackageQualifiedTemplate,
    RelativeTemplate,
    Asset,
    AssetPackageQualified,
}

/// One reference occurrence in scanned content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEdge {
    pub kind: ReferenceKind,
    /// The matched text, exactly as it appears in the content
    pub raw: String,
    /// Alias of the bundle the reference points into, when it names one
    pub owner_alias: Option<String>,
    /// Path of the referenced file below the theme layout folder, or the
    /// relative path as written
    pub relative_path: String,
    /// Theme the reference points into, when it names one
    pub theme: Option<String>,
    /// `layouts/<theme>/<relative_path>`, for package-qualified templates
    pub layout_path: Option<String>,
    /// Byte range of `raw` in the scanned content
    pub span: Range<usize>,
}

/// Finds references using the patterns of a [`PathResolver`]
#[derive(Debug, Clone, Copy)]
pub struct ReferenceScanner<'a> {
    resolver: &'a PathResolver,
}

impl<'a> ReferenceScanner<'a> {
    pub fn new(resolver: &'a PathResolver) -> Self {
        Self { resolver }
    }

    /// Every reference of every kind that applies to `kind`, in scan order:
    /// qualified templates, then relative templates, then assets.
    pub fn scan(&self, content: &str, kind: FileKind) -> Vec<ReferenceEdge> {
        let mut edges = Vec::new();
        if !kind.is_parsed() {
            return edges;
        }
        edges.extend(self.qualified_references(content));
        if kind == FileKind::Config {
            edges.extend(self.relative_references(content));
        } else {
            edges.extend(self.asset_references(content));
        }
        edges
    }

    /// `@Alias/layouts/<theme>/<path>` references, left to right
    pub fn qualified_references(&self, content: &str) -> Vec<ReferenceEdge> {
        self.resolver
            .template_ref_regex()
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(ReferenceEdge {
                    kind: ReferenceKind::PackageQualifiedTemplate,
                    raw: whole.as_str().to_string(),
                    owner_alias: caps.get(1).map(|m| m.as_str().to_string()),
                    relative_path: caps.get(4).map_or(String::new(), |m| m.as_str().to_string()),
                    theme: caps.get(3).map(|m| m.as_str().to_string()),
                    layout_path: caps.get(2).map(|m| m.as_str().to_string()),
                    span: whole.range(),
                })
            })
            .collect()
    }

    /// Quoted `.twig` paths without a bundle alias, left to right
    pub fn relative_references(&self, content: &str) -> Vec<ReferenceEdge> {
        self.resolver
            .template_relative_ref_pattern()
            .captures_all(content)
            .iter()
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(ReferenceEdge {
                    kind: ReferenceKind::RelativeTemplate,
                    raw: whole.as_str().to_string(),
                    owner_alias: None,
                    relative_path: whole.as_str().to_string(),
                    theme: None,
                    layout_path: None,
                    span: whole.range(),
                })
            })
            .collect()
    }

    /// Themed and plain asset folder references, ordered by position
    pub fn asset_references(&self, content: &str) -> Vec<ReferenceEdge> {
        let themed = self
            .resolver
            .asset_bundle_ref_pattern()
            .captures_all(content)
            .iter()
            .filter_map(|caps| caps.get(0))
            .map(|m| asset_edge(ReferenceKind::AssetPackageQualified, m.as_str(), m.range()))
            .collect::<Vec<_>>();
        let plain = self
            .resolver
            .template_asset_ref_pattern()
            .captures_all(content)
            .iter()
            .filter_map(|caps| caps.get(0))
            .map(|m| asset_edge(ReferenceKind::Asset, m.as_str(), m.range()))
            .collect::<Vec<_>>();

        let mut edges = themed;
        for edge in plain {
            if !edges.iter().any(|e| e.span.start == edge.span.start) {
                edges.push(edge);
            }
        }
        edges.sort_by_key(|e| e.span.start);
        edges
    }

    /// Move asset references of a template into the published folder of the
    /// new bundle.
    ///
    /// Themed references are rewritten first; the plain pass then skips
    /// them because they are already followed by a bundle alias.
    pub fn rewrite_asset_references(&self, content: &str) -> String {
        let alias = self.resolver.new_asset_alias();
        let content = self
            .resolver
            .asset_bundle_ref_pattern()
            .replace_all(content, |caps| format!("{}/{}", alias, &caps[0]));
        self.resolver
            .template_asset_ref_pattern()
            .replace_all(&content, |caps| format!("{}/{}", alias, &caps[0]))
    }
}

fn asset_edge(kind: ReferenceKind, raw: &str, span: Range<usize>) -> ReferenceEdge {
    let alias = raw.split('/').next().unwrap_or(raw);
    let theme = match kind {
        ReferenceKind::AssetPackageQualified => raw.split('/').nth(1).map(str::to_string),
        _ => None,
    };
    ReferenceEdge {
        kind,
        raw: raw.to_string(),
        owner_alias: Some(alias.to_string()),
        relative_path: raw.to_string(),
        theme,
        layout_path: None,
        span,
    }
}
