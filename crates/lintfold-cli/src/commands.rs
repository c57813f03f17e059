//! Command implementations
//!
//! - resolve: fold the whole configuration and print it
//! - print-config: the configuration applied to one file
//! - rules: rule ids known to the catalog
//! - config: init and validate (see `commands/config.rs`)

pub mod config;

use lintfold_core::{
    ConfigLoader, ConfigResolver, LintfoldError, ProviderCatalog, ResolvedConfig, Result,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::OutputFormat;
use crate::output::{OutputFormatter, RuleListing};

/// Where the configuration and catalog are read from
pub struct Sources {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Everything loaded from disk before resolution
pub struct Loaded {
    pub config_path: PathBuf,
    pub entries: Vec<Value>,
    pub catalog: ProviderCatalog,
}

impl Sources {
    pub fn load(&self) -> Result<Loaded> {
        let catalog = ConfigLoader::load_catalog(self.catalog.as_deref())?;
        let (config_path, entries) = ConfigLoader::load(self.config.as_deref(), None)?;
        debug!(
            "Loaded {} entries from {}",
            entries.len(),
            config_path.display()
        );
        Ok(Loaded {
            config_path,
            entries,
            catalog,
        })
    }
}

impl Loaded {
    /// Resolve the entries, printing every error on failure
    pub fn resolve(&self, formatter: &OutputFormatter) -> Result<ResolvedConfig> {
        match ConfigResolver::new(&self.catalog).resolve_values(&self.entries) {
            Ok(resolved) => Ok(resolved),
            Err(errors) => {
                formatter.print_errors(&self.config_path, &errors)?;
                Err(LintfoldError::Resolve(errors))
            }
        }
    }
}

/// Resolve command implementation
pub fn resolve_command(sources: &Sources, format: OutputFormat, use_colors: bool) -> Result<()> {
    let formatter = OutputFormatter::new(format, use_colors);
    let loaded = sources.load()?;
    let resolved = loaded.resolve(&formatter)?;

    formatter.print_resolved(&loaded.config_path, &resolved)
}

/// Print-config command implementation
pub fn print_config_command(
    sources: &Sources,
    file: &Path,
    format: OutputFormat,
    use_colors: bool,
) -> Result<()> {
    let formatter = OutputFormatter::new(format, use_colors);
    let loaded = sources.load()?;

    // Validates the whole sequence and reports everything wrong with it
    let full = loaded.resolve(&formatter)?;

    let resolver = ConfigResolver::new(&loaded.catalog);
    let (fragments, _) = resolver.parse_entries(&loaded.entries);
    let fragments: Vec<_> = fragments.into_iter().map(|(_, fragment)| fragment).collect();

    let relative = relative_to_config(&loaded.config_path, file);
    debug!("Computing configuration for {}", relative.display());

    let resolved = match resolver.resolve_for_file(&fragments, &relative) {
        Ok(resolved) => resolved,
        Err(errors) => {
            formatter.print_errors(&loaded.config_path, &errors)?;
            return Err(LintfoldError::Resolve(errors));
        }
    };
    formatter.print_file_config(&relative, resolved.as_ref(), full.is_ignored(&relative))
}

/// Rules command implementation
pub fn rules_command(
    sources: &Sources,
    provider: Option<&str>,
    format: OutputFormat,
    use_colors: bool,
) -> Result<()> {
    debug!("Listing rules (provider filter: {:?})", provider);
    let formatter = OutputFormatter::new(format, use_colors);
    let catalog = ConfigLoader::load_catalog(sources.catalog.as_deref())?;

    let mut listings = Vec::new();
    if provider.is_none() {
        listings.push(RuleListing {
            provider: None,
            rules: catalog.builtin().list_rule_ids().into_iter().collect(),
        });
    }
    for reference in catalog.provider_refs() {
        if provider.is_some_and(|wanted| wanted != reference) {
            continue;
        }
        if let Some(rules) = catalog.provider(reference) {
            listings.push(RuleListing {
                provider: Some(reference.to_string()),
                rules: rules.list_rule_ids().into_iter().collect(),
            });
        }
    }

    if let Some(wanted) = provider
        && listings.is_empty()
    {
        return Err(LintfoldError::config_error(format!(
            "Provider '{wanted}' is not in the catalog"
        )));
    }

    formatter.print_rules(&listings)
}

/// Make `file` relative to the directory holding the config file.
///
/// Patterns are written relative to that directory, so absolute paths (or
/// paths relative to the working directory) are rebased when possible.
fn relative_to_config(config_path: &Path, file: &Path) -> PathBuf {
    let base = config_path
        .parent()
        .and_then(|dir| dir.canonicalize().ok());
    let absolute = if file.is_absolute() {
        Some(file.to_path_buf())
    } else {
        std::env::current_dir().ok().map(|cwd| cwd.join(file))
    };

    match (base, absolute) {
        (Some(base), Some(absolute)) => {
            let absolute = absolute.canonicalize().unwrap_or(absolute);
            absolute
                .strip_prefix(&base)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| file.to_path_buf())
        }
        _ => file.to_path_buf(),
    }
}
