//! Locates and loads `law-enforcer.toml`.
//!
//! Priority, first hit wins:
//!
//! 1. `--config PATH`
//! 2. `law-enforcer.toml`, then `.law-enforcer.toml`, in the checked directory
//! 3. `config.toml` in `$LAW_ENFORCER_CONFIG_DIR`, else in `~/.law-enforcer/`
//! 4. built-in defaults

use law_enforcer_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: [&str; 2] = ["law-enforcer.toml", ".law-enforcer.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "LAW_ENFORCER_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Found next to the snapshots.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the config file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Directory a relative `analyzer.root` is resolved against. The global
    /// config has none, so its root stays relative to the working directory.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => p.parent(),
            Self::Global(_) | Self::Default => None,
        }
    }

    /// Reads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self {
            Self::Default => Ok(Config::default()),
            Self::Global(p) => {
                tracing::info!("Using global config: {}", p.display());
                Config::from_file(p)
            }
            Self::Explicit(p) | Self::Project(p) => {
                tracing::debug!("Using config: {}", p.display());
                Config::from_file(p)
            }
        }
    }
}

/// Resolves the config source for a check of `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_with(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
    {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|p| p.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Per-user config directory: `$LAW_ENFORCER_CONFIG_DIR`, else `~/.law-enforcer`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(".law-enforcer")),
    }
}
