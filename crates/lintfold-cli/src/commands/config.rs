//! `config init` and `config validate`

use lintfold_core::{ConfigResolver, LintfoldError, RECOMMENDED_PRESET, Result};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, error};

use super::Sources;
use crate::output::OutputFormatter;
use crate::{ConfigFormat, OutputFormat};

/// Starter fragment sequence written by `config init`
fn starter_fragments() -> Value {
    json!([
        { "ignores": ["dist", "build", "coverage"] },
        RECOMMENDED_PRESET,
        {
            "name": "project",
            "files": ["**/*.{js,jsx,mjs,cjs}"],
            "languageOptions": {
                "ecmaVersion": "latest",
                "sourceType": "module"
            },
            "linterOptions": { "reportUnusedDisableDirectives": "warn" },
            "rules": {
                "eqeqeq": ["error", "always"],
                "no-var": "error",
                "prefer-const": "warn"
            }
        }
    ])
}

/// Config init command implementation
pub fn init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => "lintfold.config.json",
        ConfigFormat::Yaml => "lintfold.config.yaml",
        ConfigFormat::Toml => "lintfold.config.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        error!(
            "Configuration file '{}' already exists. Use --force to overwrite.",
            filename
        );
        return Err(LintfoldError::config_error(format!(
            "Configuration file '{filename}' already exists"
        )));
    }

    let fragments = starter_fragments();
    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&fragments)
            .map_err(|e| LintfoldError::config_error(format!("Failed to serialize JSON: {e}")))?,
        ConfigFormat::Yaml => serde_yaml::to_string(&fragments)
            .map_err(|e| LintfoldError::config_error(format!("Failed to serialize YAML: {e}")))?,
        // TOML documents are tables, so the sequence lives under `fragments`
        ConfigFormat::Toml => toml::to_string_pretty(&json!({ "fragments": fragments }))
            .map_err(|e| LintfoldError::config_error(format!("Failed to serialize TOML: {e}")))?,
    };

    std::fs::write(&config_path, content)
        .map_err(|e| LintfoldError::io_error(&config_path, e))?;

    println!("Created configuration file: {filename}");
    println!("   Edit the file to customize your lint configuration.");

    Ok(())
}

/// Config validate command implementation
pub fn validate_command(sources: &Sources, use_colors: bool) -> Result<()> {
    debug!("Validating configuration: {:?}", sources.config);

    let formatter = OutputFormatter::new(OutputFormat::Human, use_colors);
    let loaded = sources.load()?;
    let (fragments, _) = ConfigResolver::new(&loaded.catalog).parse_entries(&loaded.entries);
    let resolved = loaded.resolve(&formatter)?;

    println!("Configuration is valid: {}", loaded.config_path.display());
    println!("   Fragments: {}", fragments.len());
    println!("   Plugins: {}", resolved.plugins().len());
    println!(
        "   Rules: {} ({} enabled)",
        resolved.rules().len(),
        resolved.enabled_rules().count()
    );

    Ok(())
}
