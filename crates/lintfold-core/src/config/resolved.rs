//! The resolved configuration
//!
//! Built once by the resolver and never mutated afterwards; the fields are
//! private and only exposed through accessors.

use super::fragment::{Fragment, LinterOptions, RuleEntry};
use super::patterns::PatternSet;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// The single merged configuration consumed by the rule-evaluation engine
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    files: IndexSet<String>,
    ignores: IndexSet<String>,
    language_options: Map<String, Value>,
    linter_options: LinterOptions,
    plugins: IndexMap<String, String>,
    rules: IndexMap<String, RuleEntry>,
    settings: Map<String, Value>,

    #[serde(skip)]
    file_matcher: PatternSet,
    #[serde(skip)]
    ignore_matcher: PatternSet,
}

/// Folded values handed over by the resolver
#[derive(Debug, Default)]
pub(crate) struct ResolvedParts {
    pub files: IndexSet<String>,
    pub ignores: IndexSet<String>,
    pub language_options: Map<String, Value>,
    pub linter_options: LinterOptions,
    pub plugins: IndexMap<String, String>,
    pub rules: IndexMap<String, RuleEntry>,
    pub settings: Map<String, Value>,
}

impl ResolvedConfig {
    pub(crate) fn from_parts(
        parts: ResolvedParts,
        file_matcher: PatternSet,
        ignore_matcher: PatternSet,
    ) -> Self {
        Self {
            files: parts.files,
            ignores: parts.ignores,
            language_options: parts.language_options,
            linter_options: parts.linter_options,
            plugins: parts.plugins,
            rules: parts.rules,
            settings: parts.settings,
            file_matcher,
            ignore_matcher,
        }
    }

    pub fn files(&self) -> &IndexSet<String> {
        &self.files
    }

    pub fn ignores(&self) -> &IndexSet<String> {
        &self.ignores
    }

    pub fn language_options(&self) -> &Map<String, Value> {
        &self.language_options
    }

    pub fn linter_options(&self) -> &LinterOptions {
        &self.linter_options
    }

    /// Plugin short name -> provider reference
    pub fn plugins(&self) -> &IndexMap<String, String> {
        &self.plugins
    }

    pub fn rules(&self) -> &IndexMap<String, RuleEntry> {
        &self.rules
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn rule(&self, id: &str) -> Option<&RuleEntry> {
        self.rules.get(id)
    }

    /// Rules whose final severity is not `off`
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.is_enabled())
            .map(|(id, entry)| (id.as_str(), entry))
    }

    /// Whether `path` is excluded by the merged ignore patterns
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_matcher.matches(path)
    }

    /// Whether `path` should be linted at all.
    ///
    /// Without any `files` patterns every path that isn't ignored is linted.
    pub fn is_linted(&self, path: &Path) -> bool {
        if self.is_ignored(path) {
            return false;
        }
        self.file_matcher.is_empty() || self.file_matcher.matches(path)
    }

    /// Convert back into a single fragment equivalent to this configuration
    pub fn as_fragment(&self) -> Fragment {
        fn non_empty<T, F: FnOnce() -> T>(empty: bool, value: F) -> Option<T> {
            (!empty).then(value)
        }

        Fragment {
            name: None,
            files: non_empty(self.files.is_empty(), || self.files.iter().cloned().collect()),
            ignores: non_empty(self.ignores.is_empty(), || {
                self.ignores.iter().cloned().collect()
            }),
            language_options: non_empty(self.language_options.is_empty(), || {
                self.language_options.clone()
            }),
            linter_options: non_empty(self.linter_options.is_empty(), || {
                self.linter_options.clone()
            }),
            plugins: non_empty(self.plugins.is_empty(), || self.plugins.clone()),
            rules: non_empty(self.rules.is_empty(), || self.rules.clone()),
            settings: non_empty(self.settings.is_empty(), || self.settings.clone()),
        }
    }
}

impl PartialEq for ResolvedConfig {
    // Matchers are derived from `files`/`ignores`, so comparing those is enough
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files
            && self.ignores == other.ignores
            && self.language_options == other.language_options
            && self.linter_options == other.linter_options
            && self.plugins == other.plugins
            && self.rules == other.rules
            && self.settings == other.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;
    use serde_json::json;

    fn sample() -> ResolvedConfig {
        let mut parts = ResolvedParts::default();
        parts.files.insert("**/*.js".to_string());
        parts.ignores.insert("dist".to_string());
        parts
            .rules
            .insert("no-var".to_string(), RuleEntry::new(RuleSeverity::Error));
        parts
            .rules
            .insert("curly".to_string(), RuleEntry::new(RuleSeverity::Off));
        parts
            .settings
            .insert("react".to_string(), json!({ "version": "detect" }));

        let files = PatternSet::new(&parts.files).unwrap();
        let ignores = PatternSet::new(&parts.ignores).unwrap();
        ResolvedConfig::from_parts(parts, files, ignores)
    }

    #[test]
    fn test_enabled_rules_skips_off() {
        let config = sample();
        let enabled: Vec<_> = config.enabled_rules().map(|(id, _)| id).collect();
        assert_eq!(enabled, vec!["no-var"]);
    }

    #[test]
    fn test_file_matching() {
        let config = sample();
        assert!(config.is_linted(Path::new("src/index.js")));
        assert!(!config.is_linted(Path::new("dist/index.js")));
        assert!(!config.is_linted(Path::new("src/index.ts")));
        assert!(config.is_ignored(Path::new("dist/index.js")));
    }

    #[test]
    fn test_as_fragment_omits_empty_sections() {
        let fragment = sample().as_fragment();
        assert_eq!(fragment.ignores, Some(vec!["dist".to_string()]));
        assert!(fragment.plugins.is_none());
        assert!(fragment.language_options.is_none());
        assert!(fragment.linter_options.is_none());
        assert_eq!(fragment.rules.as_ref().map(IndexMap::len), Some(2));
    }

    #[test]
    fn test_serializes_camel_case_without_matchers() {
        let value = serde_json::to_value(sample()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "files",
                "ignores",
                "languageOptions",
                "linterOptions",
                "plugins",
                "rules",
                "settings"
            ]
        );
        assert_eq!(value["rules"]["no-var"], json!("error"));
    }
}
