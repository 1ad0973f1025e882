//! Check command implementation.

use anyhow::{Context, Result};
use law_enforcer_core::Analyzer;
use law_enforcer_rules::default_registry;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command. Returns `true` when any error was reported.
///
/// Without `path` the analyzer root comes from the config; a relative root
/// is taken from the directory holding the config file.
pub fn run(
    path: Option<&Path>,
    format: OutputFormat,
    exclude: Vec<String>,
    strict: bool,
    source: &ConfigSource,
) -> Result<bool> {
    let mut config = source.load().with_context(|| match source.path() {
        Some(p) => format!("Failed to load config: {}", p.display()),
        None => "Failed to load default config".to_string(),
    })?;
    if let Some(base) = source.base_dir() {
        if config.analyzer.root.is_relative() {
            config.analyzer.root = base.join(&config.analyzer.root);
        }
    }

    let mut builder = Analyzer::builder(default_registry())
        .config(config)
        .excludes(exclude);
    if let Some(path) = path {
        builder = builder.root(path);
    }
    // The flag only tightens; a config with `strict = true` stays strict.
    if strict {
        builder = builder.strict(true);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;
    tracing::info!("Checking {}", analyzer.root().display());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(result.has_errors())
}
