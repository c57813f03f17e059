//! Configuration merging logic
//!
//! Fragments are folded left to right, so in every function here the
//! `later` argument wins over what is already in the target.

use super::fragment::LinterOptions;
use indexmap::IndexSet;
use serde_json::{Map, Value};

/// `languageOptions` keys whose mappings are merged recursively
const DEEP_MERGED_KEYS: &[&str] = &["globals", "parserOptions"];

/// Merge language options (later takes precedence)
///
/// Top-level keys are replaced wholesale, except for `globals` and
/// `parserOptions` which are deep-merged when both sides are mappings.
pub fn merge_language_options(target: &mut Map<String, Value>, later: &Map<String, Value>) {
    for (key, value) in later {
        if DEEP_MERGED_KEYS.contains(&key.as_str())
            && let Some(existing) = target.get_mut(key)
        {
            deep_merge(existing, value);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Recursively merge `later` into `target`
///
/// Mappings are merged key by key; any other value (including sequences)
/// replaces the existing one.
pub fn deep_merge(target: &mut Value, later: &Value) {
    match (target, later) {
        (Value::Object(target_map), Value::Object(later_map)) => {
            for (key, value) in later_map {
                match target_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, later) => *target = later.clone(),
    }
}

/// Shallow merge of `settings` (later takes precedence per key)
pub fn merge_settings(target: &mut Map<String, Value>, later: &Map<String, Value>) {
    for (key, value) in later {
        target.insert(key.clone(), value.clone());
    }
}

/// Add unique patterns in order.
///
/// A pattern seen again moves to its latest position, since pattern order
/// decides which of `pattern` and `!pattern` wins.
pub fn union_patterns(target: &mut IndexSet<String>, patterns: &[String]) {
    for pattern in patterns {
        target.shift_remove(pattern);
        target.insert(pattern.clone());
    }
}

impl LinterOptions {
    /// Merge linter options (later takes precedence per key)
    pub fn merge_with(&mut self, later: &LinterOptions) {
        if later.no_inline_config.is_some() {
            self.no_inline_config = later.no_inline_config;
        }
        if later.report_unused_disable_directives.is_some() {
            self.report_unused_disable_directives = later.report_unused_disable_directives;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_language_options_shallow_for_plain_keys() {
        let mut base = map(json!({
            "ecmaVersion": 2020,
            "parser": { "name": "espree", "meta": { "version": "9" } }
        }));
        let later = map(json!({
            "ecmaVersion": "latest",
            "parser": { "name": "babel" }
        }));

        merge_language_options(&mut base, &later);

        assert_eq!(base["ecmaVersion"], json!("latest"));
        // Not a deep-merged key, so the whole mapping is replaced
        assert_eq!(base["parser"], json!({ "name": "babel" }));
    }

    #[test]
    fn test_language_options_deep_merges_globals_and_parser_options() {
        let mut base = map(json!({
            "globals": { "window": "readonly", "process": "readonly" },
            "parserOptions": { "ecmaFeatures": { "jsx": true, "globalReturn": false } }
        }));
        let later = map(json!({
            "globals": { "process": "off", "jest": true },
            "parserOptions": { "ecmaFeatures": { "globalReturn": true }, "ecmaVersion": "latest" }
        }));

        merge_language_options(&mut base, &later);

        assert_eq!(
            base["globals"],
            json!({ "window": "readonly", "process": "off", "jest": true })
        );
        assert_eq!(
            base["parserOptions"],
            json!({
                "ecmaFeatures": { "jsx": true, "globalReturn": true },
                "ecmaVersion": "latest"
            })
        );
    }

    #[test]
    fn test_deep_merge_replaces_non_mappings() {
        let mut target = json!({ "list": [1, 2], "nested": { "a": 1 } });
        deep_merge(&mut target, &json!({ "list": [3], "nested": 5 }));
        assert_eq!(target, json!({ "list": [3], "nested": 5 }));
    }

    #[test]
    fn test_settings_shallow() {
        let mut base = map(json!({ "react": { "version": "detect", "pragma": "h" } }));
        merge_settings(&mut base, &map(json!({ "react": { "version": "18" } })));
        assert_eq!(base["react"], json!({ "version": "18" }));
    }

    #[test]
    fn test_union_patterns() {
        let mut patterns = IndexSet::new();
        union_patterns(&mut patterns, &["dist".to_string(), "build".to_string()]);
        union_patterns(&mut patterns, &["build".to_string(), "coverage".to_string()]);
        let collected: Vec<_> = patterns.iter().map(String::as_str).collect();
        assert_eq!(collected, vec!["dist", "build", "coverage"]);

        union_patterns(&mut patterns, &["dist".to_string()]);
        let collected: Vec<_> = patterns.iter().map(String::as_str).collect();
        assert_eq!(collected, vec!["build", "coverage", "dist"]);
    }

    #[test]
    fn test_merge_linter_options() {
        let mut base = LinterOptions {
            no_inline_config: Some(true),
            report_unused_disable_directives: Some(RuleSeverity::Warn),
        };
        base.merge_with(&LinterOptions {
            no_inline_config: None,
            report_unused_disable_directives: Some(RuleSeverity::Error),
        });

        assert_eq!(base.no_inline_config, Some(true));
        assert_eq!(base.report_unused_disable_directives, Some(RuleSeverity::Error));
    }
}
