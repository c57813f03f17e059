//! Provider catalog
//!
//! Maps the provider references used in fragment `plugins` entries to the
//! providers themselves, and holds named presets (lists of fragments that are
//! spliced into a sequence in place of their name).
//!
//! A catalog can be described by a manifest file:
//!
//! ```jsonc
//! {
//!   "providers": {
//!     "eslint-plugin-react-refresh": { "rules": ["only-export-components"] }
//!   },
//!   "presets": {
//!     "react-refresh:recommended": [
//!       { "plugins": { "react-refresh": "eslint-plugin-react-refresh" } }
//!     ]
//!   }
//! }
//! ```

use crate::builtin::{ALL_PRESET, CoreRules, RECOMMENDED_PRESET};
use crate::plugin::{RuleProvider, StaticRuleProvider};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Registry of rule providers and presets available to the resolver
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    builtin: Arc<dyn RuleProvider>,
    providers: IndexMap<String, Arc<dyn RuleProvider>>,
    presets: IndexMap<String, Vec<Value>>,
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogManifest {
    #[serde(default)]
    pub providers: IndexMap<String, ProviderManifest>,

    #[serde(default)]
    pub presets: IndexMap<String, Vec<Value>>,
}

/// A provider described by the rule ids it offers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderManifest {
    #[serde(default)]
    pub rules: Vec<String>,
}

impl ProviderCatalog {
    /// Catalog with the core rules and the built-in presets
    pub fn new() -> Self {
        let mut catalog = Self::with_builtin(Arc::new(CoreRules));
        catalog.register_preset(RECOMMENDED_PRESET, CoreRules::recommended_preset());
        catalog.register_preset(ALL_PRESET, CoreRules::all_preset());
        catalog
    }

    /// Empty catalog around a custom built-in provider (no presets)
    pub fn with_builtin(builtin: Arc<dyn RuleProvider>) -> Self {
        Self {
            builtin,
            providers: IndexMap::new(),
            presets: IndexMap::new(),
        }
    }

    /// Build a catalog from a manifest on top of the defaults
    pub fn from_manifest(manifest: CatalogManifest) -> Self {
        let mut catalog = Self::new();
        for (reference, provider) in manifest.providers {
            catalog.register_provider(reference, Arc::new(StaticRuleProvider::new(provider.rules)));
        }
        for (name, fragments) in manifest.presets {
            catalog.register_preset(name, fragments);
        }
        catalog
    }

    pub fn with_provider(
        mut self,
        reference: impl Into<String>,
        provider: Arc<dyn RuleProvider>,
    ) -> Self {
        self.register_provider(reference, provider);
        self
    }

    pub fn with_preset(mut self, name: impl Into<String>, fragments: Vec<Value>) -> Self {
        self.register_preset(name, fragments);
        self
    }

    /// Register a provider under `reference`; a later registration replaces an earlier one
    pub fn register_provider(&mut self, reference: impl Into<String>, provider: Arc<dyn RuleProvider>) {
        let reference = reference.into();
        if self.providers.insert(reference.clone(), provider).is_some() {
            tracing::warn!("Provider '{}' registered twice, keeping the latest", reference);
        }
    }

    pub fn register_preset(&mut self, name: impl Into<String>, fragments: Vec<Value>) {
        let name = name.into();
        tracing::debug!("Registered preset '{}' with {} fragments", name, fragments.len());
        self.presets.insert(name, fragments);
    }

    /// The provider for rule ids without a plugin prefix
    pub fn builtin(&self) -> &Arc<dyn RuleProvider> {
        &self.builtin
    }

    pub fn provider(&self, reference: &str) -> Option<&Arc<dyn RuleProvider>> {
        self.providers.get(reference)
    }

    pub fn preset(&self, name: &str) -> Option<&[Value]> {
        self.presets.get(name).map(Vec::as_slice)
    }

    pub fn provider_refs(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_catalog_has_builtin_presets() {
        let catalog = ProviderCatalog::new();
        assert!(catalog.preset(RECOMMENDED_PRESET).is_some());
        assert!(catalog.preset(ALL_PRESET).is_some());
        assert!(catalog.builtin().provides("no-var"));
        assert_eq!(catalog.provider_refs().count(), 0);
    }

    #[test]
    fn test_from_manifest() {
        let manifest: CatalogManifest = serde_json::from_value(json!({
            "providers": {
                "eslint-plugin-react-refresh": { "rules": ["only-export-components"] }
            },
            "presets": {
                "react-refresh:recommended": [
                    { "plugins": { "react-refresh": "eslint-plugin-react-refresh" } }
                ]
            }
        }))
        .unwrap();

        let catalog = ProviderCatalog::from_manifest(manifest);
        let provider = catalog.provider("eslint-plugin-react-refresh").unwrap();
        assert!(provider.provides("only-export-components"));
        assert_eq!(catalog.preset("react-refresh:recommended").unwrap().len(), 1);
    }

    #[test]
    fn test_manifest_rejects_unknown_fields() {
        let result: Result<CatalogManifest, _> =
            serde_json::from_value(json!({ "provider": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_builtin() {
        let catalog =
            ProviderCatalog::with_builtin(Arc::new(StaticRuleProvider::new(["only-this"])));
        assert!(catalog.builtin().provides("only-this"));
        assert!(!catalog.builtin().provides("no-var"));
        assert_eq!(catalog.preset_names().count(), 0);
    }
}
