//! Configuration types for law-enforcer.

use crate::matcher::ScanMode;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default include pattern for unit snapshots.
pub const DEFAULT_INCLUDE: &str = "**/*.unit.json";

/// Default exclude patterns (build output directories).
pub const DEFAULT_EXCLUDES: [&str; 2] = ["**/bin/**", "**/obj/**"];

/// Default patterns naming snapshots of generated source files.
pub const DEFAULT_GENERATED: [&str; 4] = [
    "**/*.g.cs.unit.json",
    "**/*.g.i.cs.unit.json",
    "**/*.designer.cs.unit.json",
    "**/*.Designer.cs.unit.json",
];

/// Top-level configuration, read from `law-enforcer.toml`.
///
/// Rule severity and the disallowed type set are fixed and have no
/// configuration keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Scan mode implied by `analyzer.strict`.
    #[must_use]
    pub fn scan_mode(&self) -> ScanMode {
        if self.analyzer.strict {
            ScanMode::Strict
        } else {
            ScanMode::Lenient
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns selecting snapshot files, relative to the root.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Glob patterns naming snapshots of generated code. Matching units are
    /// skipped, as are units whose snapshot sets `generated`.
    #[serde(default = "default_generated")]
    pub generated: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Surface misplaced markers as errors instead of skipping them.
    #[serde(default)]
    pub strict: bool,

    /// Abort on the first snapshot that fails to load.
    #[serde(default)]
    pub fail_on_load_error: bool,

    /// Maximum number of units scanned in parallel.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include: default_include(),
            exclude: default_excludes(),
            generated: default_generated(),
            respect_gitignore: true,
            strict: false,
            fail_on_load_error: false,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_include() -> Vec<String> {
    vec![DEFAULT_INCLUDE.to_string()]
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect()
}

fn default_generated() -> Vec<String> {
    DEFAULT_GENERATED.iter().map(ToString::to_string).collect()
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
