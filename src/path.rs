//! Path manipulation utilities for theme-migration
//!
//! Paths travel through the migration as `/`-separated strings because the
//! references rewritten inside templates use the same notation. Every
//! comparison happens on the canonical form returned by [`canonicalize`].

use crate::error::{Error, Result};
use glob::Pattern;

/// Match a file name or path against a glob pattern
pub fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches(path))
}

/// Lexically resolve `.` and `..` segments, normalize separators to `/` and
/// collapse repeated separators.
///
/// The filesystem is never consulted. A `..` that would climb above the root
/// of an absolute path is dropped; in a relative path it is kept. A relative
/// path that reduces to nothing becomes `.`.
///
/// ```
/// use theme_migration::path::canonicalize;
///
/// assert_eq!(canonicalize("foo/bar/../baz.twig"), "foo/baz.twig");
/// assert_eq!(canonicalize("/a/./b//c/"), "/a/b/c");
/// ```
pub fn canonicalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let (root, rest) = split_root(&path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if !root.is_empty() => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    if root.is_empty() && segments.is_empty() {
        return ".".to_string();
    }
    format!("{}{}", root, segments.join("/"))
}

/// Split an absolute root (`/` or a drive letter like `C:/`) from the rest.
fn split_root(path: &str) -> (&str, &str) {
    if let Some(rest) = path.strip_prefix('/') {
        return ("/", rest);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return path.split_at(3);
    }
    ("", path)
}

/// Prefix `path` with `/` unless it already starts with one.
pub fn with_dir_prefix(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Join two `/`-separated fragments with exactly one separator.
pub fn join(base: &str, tail: &str) -> String {
    if tail.is_empty() {
        return base.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), with_dir_prefix(tail))
}

/// The last segment of a `/`-separated path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything after the last `.` of the path, or an empty string.
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Convert a platform path into the `/`-separated notation used internally.
pub fn to_slash(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
