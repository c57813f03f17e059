//! Configuration fragment types
//!
//! A fragment is one element of the ordered configuration sequence. Every
//! field is optional; absent fields contribute nothing to the fold.
//!
//! Fragments are usually read from untyped JSON values, so parsing is done by
//! hand with [`Fragment::from_value`]: each shape problem is reported as a
//! `MalformedFragment` error carrying the fragment index and the field path,
//! and parsing keeps going so every problem in the fragment is reported.

use crate::error::{ResolveError, ResolveErrors};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Keys accepted at the top level of a fragment
const FRAGMENT_KEYS: &[&str] = &[
    "name",
    "files",
    "ignores",
    "languageOptions",
    "linterOptions",
    "plugins",
    "rules",
    "settings",
];

/// Accepted values for entries in `languageOptions.globals`
const GLOBAL_ACCESS: &[&str] = &["readonly", "readable", "writable", "writeable", "off"];

/// One unit of declarative configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct Fragment {
    /// Label used in diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob patterns of files this fragment applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Glob patterns of files excluded from linting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignores: Option<Vec<String>>,

    /// Parser and environment options (`ecmaVersion`, `globals`, `parserOptions`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linter_options: Option<LinterOptions>,

    /// Plugin short name -> provider reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<IndexMap<String, String>>,

    /// Rule id -> severity and options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<IndexMap<String, RuleEntry>>,

    /// Shared data made available to every plugin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the run)
    Warn,
    /// Error (fails the run)
    Error,
}

/// Severity plus rule-specific options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct RuleEntry {
    pub severity: RuleSeverity,
    pub options: Vec<Value>,
}

/// Options controlling the linter itself rather than any rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterOptions {
    /// Ignore inline configuration comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_inline_config: Option<bool>,

    /// Severity used when reporting unused disable directives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_unused_disable_directives: Option<RuleSeverity>,
}

impl RuleSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSeverity::Off => "off",
            RuleSeverity::Warn => "warn",
            RuleSeverity::Error => "error",
        }
    }

    /// Parse a severity from its string (`"warn"`) or numeric (`1`) form
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => match n.as_u64()? {
                0 => Some(RuleSeverity::Off),
                1 => Some(RuleSeverity::Warn),
                2 => Some(RuleSeverity::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != RuleSeverity::Off
    }
}

impl FromStr for RuleSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(RuleSeverity::Off),
            "warn" | "warning" => Ok(RuleSeverity::Warn),
            "error" => Ok(RuleSeverity::Error),
            other => Err(format!(
                "unknown severity '{other}' (expected \"off\", \"warn\" or \"error\")"
            )),
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RuleEntry {
    pub fn new(severity: RuleSeverity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: RuleSeverity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    pub fn is_enabled(&self) -> bool {
        self.severity.is_enabled()
    }
}

impl From<RuleSeverity> for RuleEntry {
    fn from(severity: RuleSeverity) -> Self {
        Self::new(severity)
    }
}

impl TryFrom<Value> for RuleEntry {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(mut items) => {
                if items.is_empty() {
                    return Err("rule entry array cannot be empty".to_string());
                }
                let options = items.split_off(1);
                let severity = RuleSeverity::from_value(&items[0]).ok_or_else(|| {
                    format!("invalid severity {} in rule entry array", items[0])
                })?;
                Ok(Self { severity, options })
            }
            other => RuleSeverity::from_value(&other)
                .map(Self::new)
                .ok_or_else(|| {
                    format!(
                        "expected a severity (\"off\", \"warn\", \"error\", 0, 1, 2) or an array, found {}",
                        describe(&other)
                    )
                }),
        }
    }
}

impl From<RuleEntry> for Value {
    fn from(entry: RuleEntry) -> Self {
        let severity = Value::from(entry.severity.as_str());
        if entry.options.is_empty() {
            severity
        } else {
            let mut items = Vec::with_capacity(entry.options.len() + 1);
            items.push(severity);
            items.extend(entry.options);
            Value::Array(items)
        }
    }
}

impl LinterOptions {
    pub fn is_empty(&self) -> bool {
        self.no_inline_config.is_none() && self.report_unused_disable_directives.is_none()
    }
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files
            .get_or_insert_with(Vec::new)
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores
            .get_or_insert_with(Vec::new)
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_plugin(mut self, name: impl Into<String>, provider: impl Into<String>) -> Self {
        self.plugins
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), provider.into());
        self
    }

    pub fn with_rule(mut self, id: impl Into<String>, entry: impl Into<RuleEntry>) -> Self {
        self.rules
            .get_or_insert_with(IndexMap::new)
            .insert(id.into(), entry.into());
        self
    }

    pub fn with_language_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.language_options
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// True when the fragment carries only `ignores` (and optionally a name)
    pub fn is_global_ignore(&self) -> bool {
        self.ignores.is_some()
            && self.files.is_none()
            && self.language_options.is_none()
            && self.linter_options.is_none()
            && self.plugins.is_none()
            && self.rules.is_none()
            && self.settings.is_none()
    }

    /// Parse a fragment from an untyped value, collecting every shape problem.
    ///
    /// `index` is the fragment's position in the sequence and is used only
    /// for error reporting.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, Vec<ResolveError>> {
        let Some(object) = value.as_object() else {
            return Err(vec![ResolveError::malformed(
                index,
                "<root>",
                format!("expected an object, found {}", describe(value)),
            )]);
        };

        let mut parser = FragmentParser {
            index,
            errors: Vec::new(),
        };
        let mut fragment = Fragment::default();

        for (key, value) in object {
            match key.as_str() {
                "name" => fragment.name = parser.string(key, value),
                "files" => fragment.files = parser.patterns(key, value),
                "ignores" => fragment.ignores = parser.patterns(key, value),
                "languageOptions" => fragment.language_options = parser.language_options(value),
                "linterOptions" => fragment.linter_options = parser.linter_options(value),
                "plugins" => fragment.plugins = parser.plugins(value),
                "rules" => fragment.rules = parser.rules(value),
                "settings" => fragment.settings = parser.object(key, value).cloned(),
                _ => parser.error(
                    key,
                    format!("unknown field (expected one of: {})", FRAGMENT_KEYS.join(", ")),
                ),
            }
        }

        if parser.errors.is_empty() {
            Ok(fragment)
        } else {
            Err(parser.errors)
        }
    }
}

impl TryFrom<Value> for Fragment {
    type Error = ResolveErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Fragment::from_value(0, &value).map_err(ResolveErrors::new)
    }
}

struct FragmentParser {
    index: usize,
    errors: Vec<ResolveError>,
}

impl FragmentParser {
    fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .push(ResolveError::malformed(self.index, field, message));
    }

    fn string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.error(field, format!("expected a string, found {}", describe(other)));
                None
            }
        }
    }

    fn object<'v>(&mut self, field: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.error(field, format!("expected a mapping, found {}", describe(other)));
                None
            }
        }
    }

    fn patterns(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            self.error(
                field,
                format!("expected a sequence of strings, found {}", describe(value)),
            );
            return None;
        };

        let mut patterns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) if !s.trim().is_empty() => patterns.push(s.clone()),
                Value::String(_) => self.error(&format!("{field}[{i}]"), "pattern cannot be empty"),
                other => self.error(
                    &format!("{field}[{i}]"),
                    format!("expected a string, found {}", describe(other)),
                ),
            }
        }
        Some(patterns)
    }

    fn language_options(&mut self, value: &Value) -> Option<Map<String, Value>> {
        let options = self.object("languageOptions", value)?.clone();

        for nested in ["globals", "parserOptions"] {
            if let Some(value) = options.get(nested)
                && !value.is_object()
            {
                self.error(
                    &format!("languageOptions.{nested}"),
                    format!("expected a mapping, found {}", describe(value)),
                );
            }
        }

        if let Some(Value::Object(globals)) = options.get("globals") {
            for (name, access) in globals {
                let valid = match access {
                    Value::Bool(_) => true,
                    Value::String(s) => GLOBAL_ACCESS.contains(&s.as_str()),
                    _ => false,
                };
                if !valid {
                    self.error(
                        &format!("languageOptions.globals.{name}"),
                        format!(
                            "expected a boolean or one of {}, found {access}",
                            GLOBAL_ACCESS.join(", ")
                        ),
                    );
                }
            }
        }

        Some(options)
    }

    fn linter_options(&mut self, value: &Value) -> Option<LinterOptions> {
        let map = self.object("linterOptions", value)?;
        let mut options = LinterOptions::default();

        for (key, value) in map {
            let field = format!("linterOptions.{key}");
            match key.as_str() {
                "noInlineConfig" => match value {
                    Value::Bool(b) => options.no_inline_config = Some(*b),
                    other => {
                        self.error(&field, format!("expected a boolean, found {}", describe(other)))
                    }
                },
                "reportUnusedDisableDirectives" => {
                    let severity = match value {
                        Value::Bool(true) => Some(RuleSeverity::Warn),
                        Value::Bool(false) => Some(RuleSeverity::Off),
                        other => RuleSeverity::from_value(other),
                    };
                    match severity {
                        Some(severity) => options.report_unused_disable_directives = Some(severity),
                        None => self.error(
                            &field,
                            format!("expected a boolean or a severity, found {value}"),
                        ),
                    }
                }
                _ => self.error(&field, "unknown linter option"),
            }
        }

        Some(options)
    }

    fn plugins(&mut self, value: &Value) -> Option<IndexMap<String, String>> {
        let map = self.object("plugins", value)?;
        let mut plugins = IndexMap::with_capacity(map.len());

        for (name, provider) in map {
            match provider {
                Value::String(reference) if !reference.trim().is_empty() => {
                    plugins.insert(name.clone(), reference.clone());
                }
                other => self.error(
                    &format!("plugins.{name}"),
                    format!("expected a provider reference string, found {}", describe(other)),
                ),
            }
        }

        Some(plugins)
    }

    fn rules(&mut self, value: &Value) -> Option<IndexMap<String, RuleEntry>> {
        let map = self.object("rules", value)?;
        let mut rules = IndexMap::with_capacity(map.len());

        for (id, entry) in map {
            if id.trim().is_empty() {
                self.error("rules", "rule id cannot be empty");
                continue;
            }
            match RuleEntry::try_from(entry.clone()) {
                Ok(entry) => {
                    rules.insert(id.clone(), entry);
                }
                Err(message) => self.error(&format!("rules.{id}"), message),
            }
        }

        Some(rules)
    }
}

/// Short description of a value's type for error messages
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
