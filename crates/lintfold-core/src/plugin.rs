//! Rule providers
//!
//! A provider is an opaque capability supplying rule definitions. The resolver
//! only needs to know which rule ids a provider offers, so that is all the
//! trait exposes. Providers are injected through a [`ProviderCatalog`]
//! (see `catalog.rs`) rather than looked up globally.
//!
//! [`ProviderCatalog`]: crate::catalog::ProviderCatalog

use std::collections::BTreeSet;
use std::fmt;

/// A capability provider supplying rule ids
pub trait RuleProvider: Send + Sync {
    /// Rule ids offered by this provider, without the plugin prefix
    fn list_rule_ids(&self) -> BTreeSet<String>;

    /// Whether this provider offers `rule`
    fn provides(&self, rule: &str) -> bool {
        self.list_rule_ids().contains(rule)
    }
}

impl fmt::Debug for dyn RuleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleProvider")
            .field("rules", &self.list_rule_ids().len())
            .finish()
    }
}

/// Provider backed by a fixed set of rule ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRuleProvider {
    rules: BTreeSet<String>,
}

impl StaticRuleProvider {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleProvider for StaticRuleProvider {
    fn list_rule_ids(&self) -> BTreeSet<String> {
        self.rules.clone()
    }

    fn provides(&self, rule: &str) -> bool {
        self.rules.contains(rule)
    }
}

/// Split a rule id into its plugin name and rule name.
///
/// The split happens at the last `/`, so scoped plugins work:
/// `@scope/name/rule` belongs to plugin `@scope/name`. Ids without a `/`
/// belong to the built-in provider and yield `None` for the plugin.
pub fn split_rule_id(rule_id: &str) -> (Option<&str>, &str) {
    match rule_id.rsplit_once('/') {
        Some((plugin, rule)) => (Some(plugin), rule),
        None => (None, rule_id),
    }
}

/// Check a plugin short name; returns the reason when it is unusable.
pub fn validate_plugin_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("plugin name cannot be empty".to_string());
    }
    if name.contains('/') && !name.starts_with('@') {
        return Err(format!(
            "plugin name '{name}' may only contain '/' when it is scoped (starts with '@')"
        ));
    }
    if name.ends_with('/') {
        return Err(format!("plugin name '{name}' cannot end with '/'"));
    }
    Ok(())
}
