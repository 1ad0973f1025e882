//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "law-enforcer.toml";

const DEFAULT_CONFIG: &str = r#"# law-enforcer configuration

[analyzer]
# Directory holding unit snapshots, relative to this file
# (default: this directory). A path given to `check` takes precedence.
# root = "./snapshots"

# Snapshot files to check
include = ["**/*.unit.json"]

# Glob patterns to exclude from analysis
exclude = [
    "**/bin/**",
    "**/obj/**",
]

# Snapshots of generated code, never reported on
generated = [
    "**/*.g.cs.unit.json",
    "**/*.g.i.cs.unit.json",
    "**/*.designer.cs.unit.json",
    "**/*.Designer.cs.unit.json",
]

# Respect .gitignore files
respect_gitignore = true

# Fail on markers attached to the wrong kind of declaration
strict = false

# Abort when a snapshot cannot be loaded instead of skipping it
fail_on_load_error = false

# Number of units scanned in parallel (default: one per CPU)
# parallelism = 4
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Point analyzer.root at your exported unit snapshots");
    println!("  2. Run: law-enforcer check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use law_enforcer_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
