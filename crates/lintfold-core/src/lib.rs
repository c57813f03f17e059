//! Lintfold Core
//!
//! Resolves layered lint configuration. An ordered sequence of declarative
//! fragments is folded into a single, validated rule table that a
//! rule-evaluation engine can consume.

pub mod builtin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod plugin;
pub mod result;

pub use builtin::{CoreRules, RECOMMENDED_PRESET};
pub use catalog::{CatalogManifest, ProviderCatalog, ProviderManifest};
pub use config::{
    ConfigLoader, ConfigResolver, Fragment, LinterOptions, ResolvedConfig, RuleEntry,
    RuleSeverity, resolve,
};
pub use error::{ErrorKind, LintfoldError, ResolveError, ResolveErrors};
pub use plugin::{RuleProvider, StaticRuleProvider};
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintfold=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
