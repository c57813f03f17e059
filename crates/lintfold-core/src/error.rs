//! Error types for configuration loading and resolution

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintfold operations
#[derive(Debug, Error)]
pub enum LintfoldError {
    /// One or more problems found while resolving fragments
    #[error("{0}")]
    Resolve(ResolveErrors),

    /// Configuration file discovery or parsing errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LintfoldError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The collected resolution errors, if this is a resolution failure
    pub fn resolve_errors(&self) -> Option<&ResolveErrors> {
        match self {
            Self::Resolve(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LintfoldError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<ResolveErrors> for LintfoldError {
    fn from(errors: ResolveErrors) -> Self {
        Self::Resolve(errors)
    }
}

/// A single problem found while resolving a fragment sequence.
///
/// `index` always refers to the position in the expanded fragment sequence,
/// i.e. after presets have been spliced in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("fragment {index}: malformed `{field}`: {message}")]
    MalformedFragment {
        index: usize,
        field: String,
        message: String,
    },

    #[error(
        "fragment {index}: plugin '{name}' is already registered by fragment {existing_index} \
         with provider '{existing}', cannot re-register it with provider '{provider}'"
    )]
    PluginConflict {
        name: String,
        existing: String,
        existing_index: usize,
        provider: String,
        index: usize,
    },

    #[error("fragment {index}: unknown rule '{rule_id}'")]
    UnknownRule { index: usize, rule_id: String },

    #[error("fragment {index}: unknown preset '{name}'")]
    UnknownPreset { index: usize, name: String },

    #[error("fragment {index}: plugin '{plugin}' refers to unknown provider '{provider}'")]
    UnresolvedProvider {
        index: usize,
        plugin: String,
        provider: String,
    },
}

/// Error kind enumeration for categorizing resolution errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedFragment,
    PluginConflict,
    UnknownRule,
    UnknownPreset,
    UnresolvedProvider,
}

impl ResolveError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::MalformedFragment { .. } => ErrorKind::MalformedFragment,
            ResolveError::PluginConflict { .. } => ErrorKind::PluginConflict,
            ResolveError::UnknownRule { .. } => ErrorKind::UnknownRule,
            ResolveError::UnknownPreset { .. } => ErrorKind::UnknownPreset,
            ResolveError::UnresolvedProvider { .. } => ErrorKind::UnresolvedProvider,
        }
    }

    /// Index of the fragment the error was found in
    pub fn index(&self) -> usize {
        match self {
            ResolveError::MalformedFragment { index, .. }
            | ResolveError::PluginConflict { index, .. }
            | ResolveError::UnknownRule { index, .. }
            | ResolveError::UnknownPreset { index, .. }
            | ResolveError::UnresolvedProvider { index, .. } => *index,
        }
    }

    /// Create a malformed fragment error
    pub fn malformed(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFragment {
            index,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All errors collected during one resolution pass, ordered by fragment index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveErrors(Vec<ResolveError>);

impl ResolveErrors {
    pub fn new(mut errors: Vec<ResolveError>) -> Self {
        // Stable: errors within one fragment keep their discovery order
        errors.sort_by_key(ResolveError::index);
        Self(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolveError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors of the given kind
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ResolveError> {
        self.0.iter().filter(move |e| e.kind() == kind)
    }

    pub fn into_vec(self) -> Vec<ResolveError> {
        self.0
    }
}

impl fmt::Display for ResolveErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "error" } else { "errors" };
        write!(f, "Configuration resolution failed with {} {noun}:", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolveErrors {}

impl<'a> IntoIterator for &'a ResolveErrors {
    type Item = &'a ResolveError;
    type IntoIter = std::slice::Iter<'a, ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_sorted_by_index() {
        let errors = ResolveErrors::new(vec![
            ResolveError::UnknownRule {
                index: 3,
                rule_id: "foo/bar".to_string(),
            },
            ResolveError::malformed(1, "ignores", "expected a sequence of strings"),
        ]);

        let indices: Vec<_> = errors.iter().map(ResolveError::index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = ResolveErrors::new(vec![
            ResolveError::UnknownRule {
                index: 0,
                rule_id: "foo/bar".to_string(),
            },
            ResolveError::UnknownPreset {
                index: 2,
                name: "airbnb".to_string(),
            },
        ]);

        let rendered = errors.to_string();
        assert!(rendered.starts_with("Configuration resolution failed with 2 errors:"));
        assert!(rendered.contains("unknown rule 'foo/bar'"));
        assert!(rendered.contains("unknown preset 'airbnb'"));
    }

    #[test]
    fn test_error_kind() {
        let err = ResolveError::PluginConflict {
            name: "react".to_string(),
            existing: "plugin-a".to_string(),
            existing_index: 0,
            provider: "plugin-b".to_string(),
            index: 1,
        };
        assert_eq!(err.kind(), ErrorKind::PluginConflict);
        assert_eq!(err.index(), 1);
    }
}
