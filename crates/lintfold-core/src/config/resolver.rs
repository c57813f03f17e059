//! Fragment resolution
//!
//! Folds an ordered fragment sequence into one [`ResolvedConfig`]:
//!
//! - `files` and `ignores` are unioned
//! - `languageOptions` is shallow-merged, with `globals` and `parserOptions`
//!   deep-merged
//! - `linterOptions` and `settings` are merged per key, later wins
//! - `plugins` are merged; one name bound to two providers is a conflict
//! - `rules` entries are replaced wholesale by later fragments
//!
//! After the fold every rule id is checked against the providers in the
//! catalog. Problems are collected across the whole sequence and returned
//! together rather than stopping at the first one.

use super::fragment::Fragment;
use super::merge::{merge_language_options, merge_settings, union_patterns};
use super::patterns::{PatternSet, compile_pattern};
use super::resolved::{ResolvedConfig, ResolvedParts};
use crate::catalog::ProviderCatalog;
use crate::error::{ResolveError, ResolveErrors};
use crate::plugin::{split_rule_id, validate_plugin_name};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Result type for resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveErrors>;

/// Resolves fragment sequences against a provider catalog
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'a> {
    catalog: &'a ProviderCatalog,
}

/// Where a plugin name was first bound
#[derive(Debug, Clone)]
struct PluginBinding {
    provider: String,
    index: usize,
}

/// Accumulator for the left-to-right fold
#[derive(Debug, Default)]
struct Fold {
    parts: ResolvedParts,
    bindings: IndexMap<String, PluginBinding>,
    errors: Vec<ResolveError>,
}

impl Fold {
    fn apply(&mut self, index: usize, fragment: &Fragment) {
        debug!(
            "Folding fragment {}{}",
            index,
            fragment
                .name
                .as_deref()
                .map(|name| format!(" ({name})"))
                .unwrap_or_default()
        );

        if let Some(files) = &fragment.files {
            union_patterns(&mut self.parts.files, files);
        }
        if let Some(ignores) = &fragment.ignores {
            union_patterns(&mut self.parts.ignores, ignores);
        }
        if let Some(options) = &fragment.language_options {
            merge_language_options(&mut self.parts.language_options, options);
        }
        if let Some(options) = &fragment.linter_options {
            self.parts.linter_options.merge_with(options);
        }
        if let Some(plugins) = &fragment.plugins {
            for (name, provider) in plugins {
                self.bind_plugin(index, name, provider);
            }
        }
        if let Some(rules) = &fragment.rules {
            for (id, entry) in rules {
                // Full replace: severity and options never merge separately
                self.parts.rules.insert(id.clone(), entry.clone());
            }
        }
        if let Some(settings) = &fragment.settings {
            merge_settings(&mut self.parts.settings, settings);
        }
    }

    fn bind_plugin(&mut self, index: usize, name: &str, provider: &str) {
        if let Err(message) = validate_plugin_name(name) {
            self.errors
                .push(ResolveError::malformed(index, format!("plugins.{name}"), message));
            return;
        }

        match self.bindings.get(name) {
            Some(existing) if existing.provider != provider => {
                self.errors.push(ResolveError::PluginConflict {
                    name: name.to_string(),
                    existing: existing.provider.clone(),
                    existing_index: existing.index,
                    provider: provider.to_string(),
                    index,
                });
            }
            Some(existing) => {
                debug!(
                    "Plugin '{}' re-registered with the same provider (first bound in fragment {})",
                    name, existing.index
                );
            }
            None => {
                self.bindings.insert(
                    name.to_string(),
                    PluginBinding {
                        provider: provider.to_string(),
                        index,
                    },
                );
                self.parts
                    .plugins
                    .insert(name.to_string(), provider.to_string());
            }
        }
    }
}

impl<'a> ConfigResolver<'a> {
    pub fn new(catalog: &'a ProviderCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a ProviderCatalog {
        self.catalog
    }

    /// Fold `fragments` left to right into one validated configuration
    pub fn resolve(&self, fragments: &[Fragment]) -> ResolveResult<ResolvedConfig> {
        self.resolve_indexed(fragments.iter().enumerate(), Vec::new())
    }

    /// Parse untyped entries (expanding preset names in place), then resolve.
    ///
    /// Shape errors and resolution errors are reported together.
    pub fn resolve_values(&self, entries: &[Value]) -> ResolveResult<ResolvedConfig> {
        let (fragments, errors) = self.parse_entries(entries);
        self.resolve_indexed(
            fragments.iter().map(|(index, fragment)| (*index, fragment)),
            errors,
        )
    }

    /// Resolve the configuration that applies to a single file.
    ///
    /// The whole sequence is validated first. Returns `None` when the file is
    /// ignored or not matched by any `files` pattern; otherwise only fragments
    /// without `files`, or with a `files` pattern matching `path`, are folded.
    /// Rules are then checked again against the plugins of those fragments, so
    /// a rule whose plugin is registered only for other files is `UnknownRule`.
    pub fn resolve_for_file(
        &self,
        fragments: &[Fragment],
        path: &Path,
    ) -> ResolveResult<Option<ResolvedConfig>> {
        let full = self.resolve(fragments)?;
        if !full.is_linted(path) {
            debug!("{} is not linted", path.display());
            return Ok(None);
        }

        let applicable: Vec<(usize, &Fragment)> = fragments
            .iter()
            .enumerate()
            .filter(|(_, fragment)| Self::applies_to(fragment, path))
            .collect();

        let mut fold = Fold::default();
        for &(index, fragment) in &applicable {
            fold.apply(index, fragment);
        }
        // Global ignores apply regardless of which fragments matched
        fold.parts.ignores = full.ignores().clone();

        // Plugins registered only by fragments that don't apply are absent here
        let mut validation = self.validate_rules(applicable.iter().copied(), &fold.bindings);
        fold.errors.append(&mut validation);

        self.finish(fold).map(Some)
    }

    /// Expand presets and parse every entry into a fragment.
    ///
    /// Returned indices are positions in the expanded sequence.
    pub fn parse_entries(&self, entries: &[Value]) -> (Vec<(usize, Fragment)>, Vec<ResolveError>) {
        let mut fragments = Vec::with_capacity(entries.len());
        let mut errors = Vec::new();
        let mut index = 0;

        for entry in entries {
            match entry {
                Value::String(name) => {
                    let Some(preset) = self.catalog.preset(name) else {
                        errors.push(ResolveError::UnknownPreset {
                            index,
                            name: name.clone(),
                        });
                        index += 1;
                        continue;
                    };
                    debug!("Expanding preset '{}' into {} fragments", name, preset.len());

                    for (offset, value) in preset.iter().enumerate() {
                        if value.is_string() {
                            errors.push(ResolveError::malformed(
                                index,
                                "<root>",
                                format!("preset '{name}' cannot include another preset"),
                            ));
                        } else {
                            match Fragment::from_value(index, value) {
                                Ok(mut fragment) => {
                                    fragment
                                        .name
                                        .get_or_insert_with(|| format!("{name}[{offset}]"));
                                    fragments.push((index, fragment));
                                }
                                Err(mut problems) => errors.append(&mut problems),
                            }
                        }
                        index += 1;
                    }
                }
                value => {
                    match Fragment::from_value(index, value) {
                        Ok(fragment) => fragments.push((index, fragment)),
                        Err(mut problems) => errors.append(&mut problems),
                    }
                    index += 1;
                }
            }
        }

        (fragments, errors)
    }

    /// Whether `fragment` contributes to the configuration of `path`
    pub fn applies_to(fragment: &Fragment, path: &Path) -> bool {
        match &fragment.files {
            None => true,
            Some(files) => PatternSet::new(files)
                .map(|set| set.matches(path))
                .unwrap_or(false),
        }
    }

    fn resolve_indexed<'f, I>(
        &self,
        fragments: I,
        mut errors: Vec<ResolveError>,
    ) -> ResolveResult<ResolvedConfig>
    where
        I: Iterator<Item = (usize, &'f Fragment)> + Clone,
    {
        if fragments.clone().next().is_none() && errors.is_empty() {
            return Err(ResolveErrors::new(vec![ResolveError::malformed(
                0,
                "<root>",
                "at least one fragment is required",
            )]));
        }

        let mut fold = Fold::default();
        fold.errors.append(&mut errors);

        for (index, fragment) in fragments.clone() {
            Self::check_patterns(index, fragment, &mut fold.errors);
            fold.apply(index, fragment);
        }

        let mut validation = self.validate_rules(fragments, &fold.bindings);
        fold.errors.append(&mut validation);

        let resolved = self.finish(fold)?;
        info!(
            "Resolved configuration: {} rules ({} enabled), {} plugins, {} ignore patterns",
            resolved.rules().len(),
            resolved.enabled_rules().count(),
            resolved.plugins().len(),
            resolved.ignores().len()
        );
        Ok(resolved)
    }

    fn finish(&self, fold: Fold) -> ResolveResult<ResolvedConfig> {
        if !fold.errors.is_empty() {
            return Err(ResolveErrors::new(fold.errors));
        }

        // Every pattern was compiled on its own in `check_patterns`, which
        // reports the fragment and position; only a set-level build failure
        // can surface here.
        let files = PatternSet::new(&fold.parts.files)
            .map_err(|e| ResolveErrors::new(vec![ResolveError::malformed(0, "files", e.to_string())]))?;
        let ignores = PatternSet::new(&fold.parts.ignores).map_err(|e| {
            ResolveErrors::new(vec![ResolveError::malformed(0, "ignores", e.to_string())])
        })?;

        Ok(ResolvedConfig::from_parts(fold.parts, files, ignores))
    }

    fn check_patterns(index: usize, fragment: &Fragment, errors: &mut Vec<ResolveError>) {
        let fields = [("files", &fragment.files), ("ignores", &fragment.ignores)];
        for (field, patterns) in fields {
            for (i, pattern) in patterns.iter().flatten().enumerate() {
                if let Err(e) = compile_pattern(pattern) {
                    errors.push(ResolveError::malformed(
                        index,
                        format!("{field}[{i}]"),
                        format!("invalid glob '{pattern}': {}", e.kind()),
                    ));
                }
            }
        }
    }

    /// Check every rule id against the provider that should offer it
    fn validate_rules<'f, I>(
        &self,
        fragments: I,
        bindings: &IndexMap<String, PluginBinding>,
    ) -> Vec<ResolveError>
    where
        I: Iterator<Item = (usize, &'f Fragment)>,
    {
        let mut errors = Vec::new();
        let mut known: HashMap<&str, Option<BTreeSet<String>>> = HashMap::new();

        for (name, binding) in bindings {
            let rules = self
                .catalog
                .provider(&binding.provider)
                .map(|provider| provider.list_rule_ids());
            if rules.is_none() {
                errors.push(ResolveError::UnresolvedProvider {
                    index: binding.index,
                    plugin: name.clone(),
                    provider: binding.provider.clone(),
                });
            }
            known.insert(name.as_str(), rules);
        }
        let builtin = self.catalog.builtin().list_rule_ids();

        for (index, fragment) in fragments {
            for rule_id in fragment.rules.iter().flat_map(IndexMap::keys) {
                let (plugin, rule) = split_rule_id(rule_id);
                let provided = match plugin {
                    None => builtin.contains(rule),
                    Some(plugin) => match known.get(plugin) {
                        Some(Some(rules)) => rules.contains(rule),
                        // Already reported as an unresolved provider
                        Some(None) => continue,
                        None => false,
                    },
                };
                if !provided {
                    errors.push(ResolveError::UnknownRule {
                        index,
                        rule_id: rule_id.clone(),
                    });
                }
            }
        }

        errors
    }
}

/// Resolve with the given catalog
pub fn resolve(catalog: &ProviderCatalog, fragments: &[Fragment]) -> ResolveResult<ResolvedConfig> {
    ConfigResolver::new(catalog).resolve(fragments)
}
