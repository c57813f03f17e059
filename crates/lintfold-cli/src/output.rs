//! Output formatting and reporting
//!
//! Prints resolved configurations, resolution errors and rule listings in
//! human-readable or JSON form.

use colored::*;
use lintfold_core::{LintfoldError, ResolveErrors, ResolvedConfig, Result, RuleSeverity};
use serde::Serialize;
use std::path::Path;

use crate::OutputFormat;

/// Rule ids offered by one provider; `None` is the built-in set
#[derive(Debug, Clone, Serialize)]
pub struct RuleListing {
    pub provider: Option<String>,
    pub rules: Vec<String>,
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Print the configuration resolved from `config_path`
    pub fn print_resolved(&self, config_path: &Path, resolved: &ResolvedConfig) -> Result<()> {
        match self.format {
            OutputFormat::Json => print_json(resolved),
            OutputFormat::Human => {
                println!(
                    "{} {}",
                    self.paint("Resolved", |s| s.green().bold()),
                    config_path.display()
                );
                self.print_summary_human(resolved);
                Ok(())
            }
        }
    }

    /// Print the configuration for one file, or why the file is not linted
    pub fn print_file_config(
        &self,
        file: &Path,
        resolved: Option<&ResolvedConfig>,
        ignored: bool,
    ) -> Result<()> {
        match (self.format, resolved) {
            (OutputFormat::Json, Some(resolved)) => print_json(resolved),
            (OutputFormat::Json, None) => print_json(&serde_json::json!({
                "file": file.display().to_string(),
                "linted": false,
                "ignored": ignored,
            })),
            (OutputFormat::Human, Some(resolved)) => {
                println!("{} {}", self.paint("Config for", |s| s.bold()), file.display());
                self.print_summary_human(resolved);
                Ok(())
            }
            (OutputFormat::Human, None) => {
                let reason = if ignored {
                    "is ignored"
                } else {
                    "is not matched by any files pattern"
                };
                println!(
                    "{} {} {reason}",
                    self.paint("Skipped", |s| s.yellow().bold()),
                    file.display()
                );
                Ok(())
            }
        }
    }

    /// Print every resolution error
    pub fn print_errors(&self, config_path: &Path, errors: &ResolveErrors) -> Result<()> {
        if self.format == OutputFormat::Json {
            let messages: Vec<_> = errors
                .iter()
                .map(|error| {
                    serde_json::json!({
                        "index": error.index(),
                        "kind": format!("{:?}", error.kind()),
                        "message": error.to_string(),
                    })
                })
                .collect();
            return print_json(&serde_json::json!({
                "config": config_path.display().to_string(),
                "errors": messages,
            }));
        }

        let noun = if errors.len() == 1 { "error" } else { "errors" };
        println!(
            "{} {} {noun} in {}",
            self.paint("Failed:", |s| s.red().bold()),
            errors.len(),
            config_path.display()
        );
        for error in errors {
            println!("  {} {}", self.paint("-", |s| s.red()), error);
        }
        Ok(())
    }

    /// Print rule listings grouped by provider
    pub fn print_rules(&self, listings: &[RuleListing]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(&listings);
        }

        for listing in listings {
            let title = match &listing.provider {
                Some(provider) => provider.clone(),
                None => "built-in".to_string(),
            };
            println!(
                "{} ({} rules)",
                self.paint(&title, |s| s.bold().underline()),
                listing.rules.len()
            );
            for rule in &listing.rules {
                println!("  {rule}");
            }
            println!();
        }
        Ok(())
    }

    fn print_summary_human(&self, resolved: &ResolvedConfig) {
        let (mut errors, mut warnings, mut off) = (0, 0, 0);
        for entry in resolved.rules().values() {
            match entry.severity {
                RuleSeverity::Error => errors += 1,
                RuleSeverity::Warn => warnings += 1,
                RuleSeverity::Off => off += 1,
            }
        }

        println!("\n{}", self.paint("Summary:", |s| s.bold()));
        if !resolved.files().is_empty() {
            println!("  Files: {}", join(resolved.files().iter()));
        }
        if !resolved.ignores().is_empty() {
            println!("  Ignores: {}", join(resolved.ignores().iter()));
        }
        if !resolved.plugins().is_empty() {
            println!("  Plugins:");
            for (name, provider) in resolved.plugins() {
                println!("    {name} -> {provider}");
            }
        }
        println!("  Rules: {}", resolved.rules().len());
        println!(
            "    Errors: {}",
            self.paint(&errors.to_string(), |s| s.red())
        );
        println!(
            "    Warnings: {}",
            self.paint(&warnings.to_string(), |s| s.yellow())
        );
        println!("    Off: {}", self.paint(&off.to_string(), |s| s.dimmed()));

        println!("\n{}", self.paint("Enabled rules:", |s| s.bold()));
        for (id, entry) in resolved.enabled_rules() {
            let severity = match entry.severity {
                RuleSeverity::Error => self.paint("error", |s| s.red()),
                _ => self.paint("warn", |s| s.yellow()),
            };
            if entry.options.is_empty() {
                println!("  {severity:<7} {id}");
            } else {
                let options = serde_json::to_string(&entry.options).unwrap_or_default();
                println!("  {severity:<7} {id} {}", self.paint(&options, |s| s.dimmed()));
            }
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| LintfoldError::internal_error(format!("Failed to serialize JSON: {e}")))?;
    println!("{text}");
    Ok(())
}
