//! Configuration resolution for lintfold
//!
//! A project's lint configuration is an ordered sequence of fragments. Each
//! fragment may contribute ignore patterns, language options, plugin
//! registrations, rule settings and shared settings. The resolver folds the
//! sequence left to right into one [`ResolvedConfig`].
//!
//! ## Configuration Files
//!
//! - `lintfold.config.json` - Standard JSON
//! - `lintfold.config.jsonc` - JSON with comments and trailing commas
//! - `lintfold.config.yaml` / `lintfold.config.yml` - YAML
//! - `lintfold.config.toml` - TOML (entries under `[[fragments]]`)
//!
//! When no explicit config path is provided, the loader searches from the
//! current directory upward until a config is found or the filesystem root
//! is reached.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! [
//!   { "ignores": ["dist", "vite.config.js"] },
//!   { "files": ["**/*.{js,jsx}"] },
//!   // Presets are expanded in place
//!   "lintfold:recommended",
//!   {
//!     "languageOptions": {
//!       "ecmaVersion": "latest",
//!       "sourceType": "module",
//!       "parserOptions": { "ecmaFeatures": { "jsx": true } }
//!     },
//!     "linterOptions": { "noInlineConfig": true }
//!   },
//!   {
//!     "plugins": { "react-refresh": "eslint-plugin-react-refresh" },
//!     "rules": {
//!       "curly": ["error", "multi"],
//!       "react-refresh/only-export-components": ["warn", { "allowConstantExport": true }]
//!     }
//!   }
//! ]
//! ```

mod fragment;
mod loader;
mod merge;
mod patterns;
mod resolved;
mod resolver;

pub use fragment::{Fragment, LinterOptions, RuleEntry, RuleSeverity};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use merge::{deep_merge, merge_language_options, merge_settings, union_patterns};
pub use patterns::{PatternSet, compile_pattern, normalize_path};
pub use resolved::ResolvedConfig;
pub use resolver::{ConfigResolver, ResolveResult, resolve};

// Re-export Result type
pub use crate::result::Result;
