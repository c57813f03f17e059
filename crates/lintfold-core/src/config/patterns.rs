//! Glob pattern matching for `files` and `ignores`
//!
//! Patterns are matched against `/`-separated paths relative to the
//! configuration base directory. `*` does not cross directory boundaries,
//! `**` does, and `{a,b}` alternation is supported. A path is also matched
//! when any of its parent directories is, so `dist` covers `dist/app.js`.
//! Patterns starting with `!` re-include paths matched by earlier patterns.
//! Order matters: the last pattern matching a path decides its outcome.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// A compiled, ordered set of positive and negated patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    globs: GlobSet,
    negated: Vec<bool>,
    is_empty: bool,
}

/// Compile one pattern, with a leading `!` stripped
pub fn compile_pattern(pattern: &str) -> Result<Glob, globset::Error> {
    let body = pattern.strip_prefix('!').unwrap_or(pattern);
    GlobBuilder::new(normalize_pattern(body))
        .literal_separator(true)
        .build()
}

fn normalize_pattern(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    pattern.strip_suffix('/').unwrap_or(pattern)
}

/// Normalize a path to the `/`-separated form patterns are matched against
pub fn normalize_path(path: &Path) -> String {
    let joined = path
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>();
    joined.join("/")
}

impl PatternSet {
    pub fn new<'a, I>(patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut negated = Vec::new();

        for pattern in patterns {
            builder.add(compile_pattern(pattern)?);
            negated.push(pattern.starts_with('!'));
        }

        Ok(Self {
            globs: builder.build()?,
            is_empty: negated.iter().all(|negated| *negated),
            negated,
        })
    }

    /// True when no positive pattern was given
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Whether `path` is matched, checking the path and its parent directories.
    ///
    /// A pattern applies when it matches the path or any parent; among the
    /// applicable patterns the last one wins, so `!` negates earlier matches
    /// and a later positive pattern matches again.
    pub fn matches(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        if normalized.is_empty() {
            return false;
        }

        let last = ancestors_and_self(&normalized)
            .filter_map(|candidate| self.globs.matches(candidate).into_iter().max())
            .max();
        last.is_some_and(|position| !self.negated[position])
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
            negated: Vec::new(),
            is_empty: true,
        }
    }
}

/// `a`, `a/b`, `a/b/c` for `a/b/c`
fn ancestors_and_self(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .map(move |(i, _)| &path[..i])
        .chain(std::iter::once(path))
}
