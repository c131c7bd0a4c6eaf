//! Regular expressions with fixed-string lookaround guards
//!
//! The `regex` crate has no lookbehind or lookahead. The reference patterns
//! of a theme need both ("a bundle directory right after `bundles/`", "not
//! already prefixed with the new bundle alias", "a `.twig` path between
//! quotes"), and every one of them is a literal string. [`LookaroundPattern`]
//! pairs a plain regex with those literal guards and checks them around each
//! candidate match.
//!
//! A rejected candidate restarts the search one character after its start,
//! not after its end, so a match overlapping a rejected candidate is still
//! found.

use regex::{Captures, Regex};

use crate::error::Result;

/// A regex plus literal guards evaluated around the whole match
#[derive(Debug, Clone)]
pub struct LookaroundPattern {
    regex: Regex,
    preceded_by: Option<String>,
    not_preceded_by: Vec<String>,
    followed_by: Option<String>,
    not_followed_by: Vec<String>,
}

impl LookaroundPattern {
    /// Compile a pattern without guards
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            preceded_by: None,
            not_preceded_by: Vec::new(),
            followed_by: None,
            not_followed_by: Vec::new(),
        })
    }

    /// Require the match to start right after `literal`
    pub fn preceded_by(mut self, literal: &str) -> Self {
        self.preceded_by = Some(literal.to_string());
        self
    }

    /// Reject matches starting right after `literal`
    pub fn not_preceded_by(mut self, literal: &str) -> Self {
        self.not_preceded_by.push(literal.to_string());
        self
    }

    /// Require the match to end right before `literal`
    pub fn followed_by(mut self, literal: &str) -> Self {
        self.followed_by = Some(literal.to_string());
        self
    }

    /// Reject matches ending right before `literal`
    pub fn not_followed_by(mut self, literal: &str) -> Self {
        self.not_followed_by.push(literal.to_string());
        self
    }

    /// The underlying regex, without guards
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        let before = &text[..start];
        let after = &text[end..];

        if let Some(required) = &self.preceded_by {
            if !before.ends_with(required.as_str()) {
                return false;
            }
        }
        if self
            .not_preceded_by
            .iter()
            .any(|literal| before.ends_with(literal.as_str()))
        {
            return false;
        }
        if let Some(required) = &self.followed_by {
            if !after.starts_with(required.as_str()) {
                return false;
            }
        }
        !self
            .not_followed_by
            .iter()
            .any(|literal| after.starts_with(literal.as_str()))
    }

    /// Every accepted, non-overlapping match in `text`, left to right
    pub fn captures_all<'t>(&self, text: &'t str) -> Vec<Captures<'t>> {
        let mut found = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(captures) = self.regex.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = captures.get(0) else {
                break;
            };
            let (start, end) = (whole.start(), whole.end());

            if self.accepts(text, start, end) {
                found.push(captures);
                pos = if end > start {
                    end
                } else {
                    next_boundary(text, end)
                };
            } else {
                pos = next_boundary(text, start);
            }
        }

        found
    }

    /// Whether at least one accepted match exists
    pub fn is_match(&self, text: &str) -> bool {
        !self.captures_all(text).is_empty()
    }

    /// Replace every accepted match with the output of `replacement`
    pub fn replace_all<F>(&self, text: &str, mut replacement: F) -> String
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for captures in self.captures_all(text) {
            if let Some(whole) = captures.get(0) {
                result.push_str(&text[last..whole.start()]);
                result.push_str(&replacement(&captures));
                last = whole.end();
            }
        }
        result.push_str(&text[last..]);
        result
    }
}

/// Byte offset of the character following `pos`, or past the end.
fn next_boundary(text: &str, pos: usize) -> usize {
    match text[pos..].chars().next() {
        Some(ch) => pos + ch.len_utf8(),
        None => text.len() + 1,
    }
}
