//! Lintfold CLI
//!
//! Command-line interface for resolving and inspecting layered lint configuration

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintfold_core::{LintfoldError, Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintfold")]
#[command(about = "Lintfold: resolve layered lint configuration into one rule table")]
#[command(version = lintfold_core::VERSION)]
#[command(
    long_about = "Lintfold folds an ordered list of configuration fragments (ignores, language options,\n\
plugins, rules and settings) into one validated rule table.\n\
\n\
Examples:\n  \
lintfold resolve                       # Resolve the discovered config\n  \
lintfold resolve --format json         # Print the resolved config as JSON\n  \
lintfold print-config src/App.jsx      # Show the config applied to one file\n  \
lintfold rules                         # List all known rule ids\n  \
lintfold config init                   # Create a starter configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "LINTFOLD_CONFIG",
        help = "Path to configuration file (default: search for lintfold.config.*)"
    )]
    config: Option<PathBuf>,

    /// Provider catalog manifest
    #[arg(
        long,
        global = true,
        env = "LINTFOLD_CATALOG",
        help = "Path to a provider catalog manifest (providers and presets)"
    )]
    catalog: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and print the merged result
    #[command(alias = "check")]
    Resolve {
        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Print the configuration that applies to a single file
    PrintConfig {
        /// File to compute the configuration for
        #[arg(help = "File path, relative to the configuration file's directory")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// List rule ids known to the built-in set and the catalog providers
    Rules {
        /// Only list rules of this provider reference
        #[arg(long, help = "Only list rules offered by this provider reference")]
        provider: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: search for lintfold.config.*)")]
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// YAML configuration format
    Yaml,
    /// TOML configuration format
    Toml,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "lintfold=error", // Only errors by default
        1 => "lintfold=warn",  // Warnings on first -v
        2 => "lintfold=info",  // Info on -vv
        3 => "lintfold=debug", // Debug on -vvv
        _ => "lintfold=trace", // Trace on -vvvv+
    };
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", log_level);
        }
    }
    init_tracing();

    match run_command(cli) {
        Ok(()) => {}
        // Resolution errors have already been printed in full
        Err(LintfoldError::Resolve(_)) => std::process::exit(1),
        Err(e) => {
            error!("lintfold failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    let use_colors = !cli.no_color;
    let sources = commands::Sources {
        config: cli.config,
        catalog: cli.catalog,
    };

    match cli.command {
        Some(Commands::Resolve { format }) => {
            commands::resolve_command(&sources, format, use_colors)
        }

        Some(Commands::PrintConfig { file, format }) => {
            commands::print_config_command(&sources, &file, format, use_colors)
        }

        Some(Commands::Rules { provider, format }) => {
            commands::rules_command(&sources, provider.as_deref(), format, use_colors)
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config::init_command(format, force),
            ConfigAction::Validate { path } => {
                let sources = commands::Sources {
                    config: path.or(sources.config),
                    catalog: sources.catalog,
                };
                commands::config::validate_command(&sources, use_colors)
            }
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("lintfold {}", lintfold_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
            } else {
                println!("{}", lintfold_core::VERSION);
            }
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
