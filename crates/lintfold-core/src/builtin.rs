//! Built-in core rules
//!
//! Rule ids without a plugin prefix resolve against this provider.

use crate::plugin::RuleProvider;
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

/// Name of the preset enabling [`RECOMMENDED_RULES`]
pub const RECOMMENDED_PRESET: &str = "lintfold:recommended";

/// Name of the preset enabling every core rule
pub const ALL_PRESET: &str = "lintfold:all";

/// All core rule ids
pub const CORE_RULES: &[&str] = &[
    "array-callback-return",
    "arrow-body-style",
    "camelcase",
    "complexity",
    "consistent-return",
    "constructor-super",
    "curly",
    "default-case",
    "default-param-last",
    "dot-notation",
    "eqeqeq",
    "for-direction",
    "func-names",
    "getter-return",
    "guard-for-in",
    "max-classes-per-file",
    "max-depth",
    "max-lines",
    "max-params",
    "new-cap",
    "no-async-promise-executor",
    "no-await-in-loop",
    "no-case-declarations",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-console",
    "no-const-assign",
    "no-constant-condition",
    "no-control-regex",
    "no-debugger",
    "no-delete-var",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-else-return",
    "no-empty",
    "no-empty-character-class",
    "no-empty-pattern",
    "no-eval",
    "no-ex-assign",
    "no-extra-boolean-cast",
    "no-fallthrough",
    "no-func-assign",
    "no-global-assign",
    "no-implied-eval",
    "no-import-assign",
    "no-invalid-regexp",
    "no-irregular-whitespace",
    "no-loss-of-precision",
    "no-misleading-character-class",
    "no-new-symbol",
    "no-nonoctal-decimal-escape",
    "no-obj-calls",
    "no-octal",
    "no-param-reassign",
    "no-plusplus",
    "no-prototype-builtins",
    "no-redeclare",
    "no-regex-spaces",
    "no-restricted-syntax",
    "no-self-assign",
    "no-setter-return",
    "no-shadow",
    "no-shadow-restricted-names",
    "no-sparse-arrays",
    "no-tabs",
    "no-this-before-super",
    "no-undef",
    "no-underscore-dangle",
    "no-unexpected-multiline",
    "no-unreachable",
    "no-unsafe-finally",
    "no-unsafe-negation",
    "no-unsafe-optional-chaining",
    "no-unused-expressions",
    "no-unused-labels",
    "no-unused-private-class-members",
    "no-unused-vars",
    "no-use-before-define",
    "no-useless-backreference",
    "no-useless-catch",
    "no-useless-escape",
    "no-var",
    "no-with",
    "object-shorthand",
    "prefer-arrow-callback",
    "prefer-const",
    "prefer-destructuring",
    "prefer-template",
    "quotes",
    "radix",
    "require-yield",
    "use-isnan",
    "valid-typeof",
    "yoda",
];

/// Core rules enabled by the recommended preset
pub const RECOMMENDED_RULES: &[&str] = &[
    "constructor-super",
    "for-direction",
    "getter-return",
    "no-async-promise-executor",
    "no-case-declarations",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-const-assign",
    "no-constant-condition",
    "no-control-regex",
    "no-debugger",
    "no-delete-var",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-empty",
    "no-empty-character-class",
    "no-empty-pattern",
    "no-ex-assign",
    "no-extra-boolean-cast",
    "no-fallthrough",
    "no-func-assign",
    "no-global-assign",
    "no-import-assign",
    "no-invalid-regexp",
    "no-irregular-whitespace",
    "no-loss-of-precision",
    "no-misleading-character-class",
    "no-new-symbol",
    "no-nonoctal-decimal-escape",
    "no-obj-calls",
    "no-octal",
    "no-prototype-builtins",
    "no-redeclare",
    "no-regex-spaces",
    "no-self-assign",
    "no-setter-return",
    "no-shadow-restricted-names",
    "no-sparse-arrays",
    "no-this-before-super",
    "no-undef",
    "no-unexpected-multiline",
    "no-unreachable",
    "no-unsafe-finally",
    "no-unsafe-negation",
    "no-unsafe-optional-chaining",
    "no-unused-labels",
    "no-unused-private-class-members",
    "no-unused-vars",
    "no-useless-backreference",
    "no-useless-catch",
    "no-useless-escape",
    "no-with",
    "require-yield",
    "use-isnan",
    "valid-typeof",
];

/// The built-in provider
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreRules;

impl RuleProvider for CoreRules {
    fn list_rule_ids(&self) -> BTreeSet<String> {
        CORE_RULES.iter().map(|id| (*id).to_string()).collect()
    }

    fn provides(&self, rule: &str) -> bool {
        CORE_RULES.contains(&rule)
    }
}

impl CoreRules {
    /// Fragments making up the recommended preset
    pub fn recommended_preset() -> Vec<Value> {
        vec![rules_fragment(RECOMMENDED_RULES)]
    }

    /// Fragments making up the all-rules preset
    pub fn all_preset() -> Vec<Value> {
        vec![rules_fragment(CORE_RULES)]
    }
}

fn rules_fragment(ids: &[&str]) -> Value {
    let rules: Map<String, Value> = ids
        .iter()
        .map(|id| ((*id).to_string(), Value::from("error")))
        .collect();
    json!({ "rules": rules })
}
