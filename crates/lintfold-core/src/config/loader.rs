//! Configuration file discovery and loading

use super::fragment::describe;
use crate::catalog::{CatalogManifest, ProviderCatalog};
use crate::error::LintfoldError;
use crate::result::{IoResultExt, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, in discovery priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "lintfold.config.json",
    "lintfold.config.jsonc",
    "lintfold.config.yaml",
    "lintfold.config.yml",
    "lintfold.config.toml",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Checks [`CONFIG_FILE_NAMES`] in order in each directory, starting from
    /// the given directory and moving up the directory tree until a config is
    /// found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LintfoldError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Read a structured file (JSON, JSONC, YAML or TOML) into a JSON value
    pub fn read_value(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).with_path(path)?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed: std::result::Result<Value, String> = match ext {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("jsonc") | Some("json5") => json5::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("unsupported file extension (expected .json, .jsonc, .yaml, .yml or .toml)".to_string()),
        };

        parsed.map_err(|e| {
            LintfoldError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load the fragment entries (fragment objects or preset names) from a file
    ///
    /// The file holds either a top-level sequence of entries or a mapping
    /// with a `fragments` sequence.
    pub fn load_entries(path: &Path) -> Result<Vec<Value>> {
        let value = Self::read_value(path)?;
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("fragments") {
                Some(Value::Array(entries)) => entries,
                Some(other) => {
                    return Err(LintfoldError::config_error(format!(
                        "'{}': `fragments` must be a sequence, found {}",
                        path.display(),
                        describe(&other)
                    )));
                }
                None => {
                    return Err(LintfoldError::config_error(format!(
                        "'{}': expected a sequence of fragments or a `fragments` key",
                        path.display()
                    )));
                }
            },
            other => {
                return Err(LintfoldError::config_error(format!(
                    "'{}': expected a sequence of fragments, found {}",
                    path.display(),
                    describe(&other)
                )));
            }
        };

        tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Load entries from path or auto-discover
    ///
    /// If a custom path is provided, loads from that path. Otherwise,
    /// attempts to auto-discover a config file starting from the given
    /// directory (or current directory). Returns the path actually used.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<(PathBuf, Vec<Value>)> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LintfoldError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        } else {
            let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
            Self::auto_discover(search_dir)?.ok_or_else(|| {
                LintfoldError::config_error(format!(
                    "No config file found ({}). Run 'lintfold config init' to create one",
                    CONFIG_FILE_NAMES.join(", ")
                ))
            })?
        };

        let entries = Self::load_entries(&config_path)?;
        Ok((config_path, entries))
    }

    /// Load a provider catalog manifest; without a path the default catalog is used
    pub fn load_catalog(path: Option<&Path>) -> Result<ProviderCatalog> {
        let Some(path) = path else {
            return Ok(ProviderCatalog::new());
        };

        let value = Self::read_value(path)?;
        let manifest: CatalogManifest = serde_json::from_value(value).map_err(|e| {
            LintfoldError::config_error(format!(
                "Invalid catalog manifest '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(
            "Loaded catalog with {} providers and {} presets from {}",
            manifest.providers.len(),
            manifest.presets.len(),
            path.display()
        );
        Ok(ProviderCatalog::from_manifest(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_entries_json_array() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.config.json",
            r#"[
                { "ignores": ["dist"] },
                "lintfold:recommended",
                { "rules": { "no-var": "error" } }
            ]"#,
        );

        let entries = ConfigLoader::load_entries(&config_path).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[1].is_string());
    }

    #[test]
    fn test_load_entries_jsonc() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.config.jsonc",
            r#"[
                // build output
                { "ignores": ["dist",], },
            ]"#,
        );

        let entries = ConfigLoader::load_entries(&config_path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["ignores"][0], "dist");
    }

    #[test]
    fn test_load_entries_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.config.yaml",
            "- ignores: [dist]\n- rules:\n    curly: [error, multi]\n",
        );

        let entries = ConfigLoader::load_entries(&config_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["rules"]["curly"][1], "multi");
    }

    #[test]
    fn test_load_entries_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.config.toml",
            r#"
[[fragments]]
ignores = ["dist"]

[[fragments]]
rules = { "no-var" = "error" }
"#,
        );

        let entries = ConfigLoader::load_entries(&config_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["rules"]["no-var"], "error");
    }

    #[test]
    fn test_load_entries_rejects_scalar() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "lintfold.config.json", "42");
        assert!(ConfigLoader::load_entries(&config_path).is_err());
    }

    #[test]
    fn test_auto_discover() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), "lintfold.config.json", "[]");

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "lintfold.config.json");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), "lintfold.config.toml", "fragments = []");
        create_temp_config(temp_dir.path(), "lintfold.config.yaml", "[]");
        create_temp_config(temp_dir.path(), "lintfold.config.json", "[]");

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "lintfold.config.json");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Some(Path::new("nonexistent.json")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path =
            create_temp_config(temp_dir.path(), "lintfold.config.json", r#"{ invalid json }"#);

        let result = ConfigLoader::load_entries(&config_path);
        assert!(matches!(result, Err(LintfoldError::Config { .. })));
    }

    #[test]
    fn test_load_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog_path = create_temp_config(
            temp_dir.path(),
            "catalog.yaml",
            "providers:\n  eslint-plugin-import:\n    rules: [no-absolute-path]\npresets:\n  imports:\n    - plugins:\n        import: eslint-plugin-import\n",
        );

        let catalog = ConfigLoader::load_catalog(Some(&catalog_path)).unwrap();
        assert!(
            catalog
                .provider("eslint-plugin-import")
                .unwrap()
                .provides("no-absolute-path")
        );
        assert!(catalog.preset("imports").is_some());
        assert!(catalog.preset("lintfold:recommended").is_some());
    }
}
