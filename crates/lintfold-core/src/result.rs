//! Result type alias for lintfold operations

use crate::error::LintfoldError;
use std::path::Path;

/// Standard Result type for lintfold operations
pub type Result<T> = std::result::Result<T, LintfoldError>;

/// Extension trait attaching a path to bare IO errors
pub trait IoResultExt<T> {
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| LintfoldError::io_error(path, source))
    }
}
