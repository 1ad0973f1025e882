//! Multi-unit analyzer: discovers snapshot files, scans them in parallel
//! and merges the results.

use crate::config::{Config, DEFAULT_EXCLUDES, DEFAULT_INCLUDE};
use crate::matcher::{AnnotationMatcher, ScanError, ScanMode};
use crate::registry::MarkerRegistry;
use crate::reporter::report_all;
use crate::semantic::SemanticModel;
use crate::snapshot::{self, SnapshotError};
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error walking the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A snapshot file could not be loaded.
    #[error("Failed to load {path}: {source}")]
    Load {
        /// Snapshot file path.
        path: PathBuf,
        /// Underlying snapshot error.
        source: SnapshotError,
    },

    /// Strict scan found a misplaced marker.
    #[error("Scan failed in {path}: {source}")]
    Scan {
        /// Snapshot file path.
        path: PathBuf,
        /// Underlying scan error.
        source: ScanError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
pub struct AnalyzerBuilder<'r> {
    registry: &'r MarkerRegistry,
    root: Option<PathBuf>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    strict: Option<bool>,
    fail_on_load_error: Option<bool>,
}

impl<'r> AnalyzerBuilder<'r> {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new(registry: &'r MarkerRegistry) -> Self {
        Self {
            registry,
            root: None,
            exclude_patterns: Vec::new(),
            include_patterns: Vec::new(),
            config: None,
            strict: None,
            fail_on_load_error: None,
        }
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides `analyzer.strict`.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Overrides `analyzer.fail_on_load_error`.
    #[must_use]
    pub fn fail_on_load_error(mut self, fail: bool) -> Self {
        self.fail_on_load_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or a glob
    /// pattern is invalid.
    pub fn build(self) -> Result<Analyzer<'r>, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());
        if include_patterns.is_empty() {
            include_patterns.push(DEFAULT_INCLUDE.to_string());
        }

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        if exclude_patterns.is_empty() {
            exclude_patterns.extend(DEFAULT_EXCLUDES.iter().map(ToString::to_string));
        }

        let compile = |patterns: &[String]| -> Result<Vec<glob::Pattern>, glob::PatternError> {
            patterns.iter().map(|p| glob::Pattern::new(p)).collect()
        };

        let mode = match self.strict {
            Some(true) => ScanMode::Strict,
            Some(false) => ScanMode::Lenient,
            None => config.scan_mode(),
        };

        Ok(Analyzer {
            root,
            matcher: AnnotationMatcher::new(self.registry).mode(mode),
            include: compile(&include_patterns)?,
            exclude: compile(&exclude_patterns)?,
            generated: compile(&config.analyzer.generated)?,
            respect_gitignore: config.analyzer.respect_gitignore,
            fail_on_load_error: self
                .fail_on_load_error
                .unwrap_or(config.analyzer.fail_on_load_error),
            parallelism: config.analyzer.parallelism,
        })
    }
}

/// Scans every unit snapshot under a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Analyzer<'r> {
    root: PathBuf,
    matcher: AnnotationMatcher<'r>,
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
    generated: Vec<glob::Pattern>,
    respect_gitignore: bool,
    fail_on_load_error: bool,
    parallelism: Option<usize>,
}

impl<'r> Analyzer<'r> {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder(registry: &'r MarkerRegistry) -> AnalyzerBuilder<'r> {
        AnalyzerBuilder::new(registry)
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Analyzes all snapshot files and returns the results.
    ///
    /// Units are scanned in parallel; failures are handled in file order so
    /// the outcome does not depend on scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, if a snapshot fails to load and
    /// `fail_on_load_error` is set, or if a strict scan finds a misplaced
    /// marker.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} units to analyze", files.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism.unwrap_or(0))
            .build()?;
        let outcomes: Vec<_> = pool.install(|| {
            files
                .par_iter()
                .map(|path| self.analyze_file(path))
                .collect()
        });

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(violations) => {
                    report_all(violations, &mut result);
                    result.units_scanned += 1;
                }
                Err(AnalyzerError::Load { path, source }) if !self.fail_on_load_error => {
                    warn!("Skipping {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} units",
            result.violations.len(),
            result.units_scanned
        );

        Ok(result)
    }

    /// Scans an already loaded unit with this analyzer's mode.
    ///
    /// # Errors
    ///
    /// Returns the first structural mismatch when scanning strictly.
    pub fn scan_model(&self, unit: &dyn SemanticModel) -> Result<Vec<Violation>, ScanError> {
        self.matcher.try_scan_unit(unit).collect()
    }

    /// Loads and scans a single snapshot file.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let unit = snapshot::load_file(path).map_err(|source| AnalyzerError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        self.scan_model(&unit).map_err(|source| AnalyzerError::Scan {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Discovers snapshot files, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let walker = ignore::WalkBuilder::new(&self.root)
            .standard_filters(self.respect_gitignore)
            .hidden(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.into_path();
            if !self.is_included(&path) {
                continue;
            }
            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            if self.is_generated(&path) {
                debug!("Skipping generated: {}", path.display());
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Checks if a path matches an include pattern.
    fn is_included(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        self.include.iter().any(|p| p.matches_path(relative))
    }

    /// Checks if a path should be excluded. Only the part below the root
    /// is matched, so directories above the root never exclude anything.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }

    /// Checks if a path names a snapshot of generated code.
    fn is_generated(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        self.generated.iter().any(|p| p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MarkerRegistry;
    use crate::rule::MarkerRule;
    use crate::tree::NodeId;

    struct Always;

    impl MarkerRule for Always {
        fn violates(&self, _: NodeId, _: &dyn SemanticModel) -> Result<bool, ScanError> {
            Ok(true)
        }
    }

    fn registry() -> MarkerRegistry {
        MarkerRegistry::new(Always, Always, Always)
    }

    #[test]
    fn test_builder() {
        let registry = registry();
        let analyzer = Analyzer::builder(&registry)
            .root(".")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.include.len(), 1);
    }

    #[test]
    fn test_exclude_patterns() {
        let registry = registry();
        let analyzer = Analyzer::builder(&registry)
            .root("/repo")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/repo/Foo/bin/Debug/a.unit.json")));
        assert!(analyzer.should_exclude(Path::new("/repo/obj/a.unit.json")));
        assert!(analyzer.should_exclude(Path::new("/repo/src/generated/a.unit.json")));
        assert!(!analyzer.should_exclude(Path::new("/repo/src/a.unit.json")));
    }

    #[test]
    fn test_exclude_ignores_directories_above_root() {
        let registry = registry();
        let analyzer = Analyzer::builder(&registry)
            .root("/work/obj/snapshots")
            .build()
            .expect("Failed to build analyzer");

        assert!(!analyzer.should_exclude(Path::new("/work/obj/snapshots/a.unit.json")));
        assert!(!analyzer.should_exclude(Path::new("/work/obj/snapshots/src/b.unit.json")));
        assert!(analyzer.should_exclude(Path::new("/work/obj/snapshots/bin/c.unit.json")));
    }

    #[test]
    fn test_generated_patterns() {
        let registry = registry();
        let analyzer = Analyzer::builder(&registry)
            .root("/repo")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.is_generated(Path::new("/repo/src/Api.g.cs.unit.json")));
        assert!(analyzer.is_generated(Path::new("/repo/ui/Form.Designer.cs.unit.json")));
        assert!(!analyzer.is_generated(Path::new("/repo/src/Api.cs.unit.json")));

        let mut config = Config::default();
        config.analyzer.generated.clear();
        let analyzer = Analyzer::builder(&registry)
            .root("/repo")
            .config(config)
            .build()
            .expect("Failed to build analyzer");
        assert!(!analyzer.is_generated(Path::new("/repo/src/Api.g.cs.unit.json")));
    }

    #[test]
    fn test_include_patterns() {
        let registry = registry();
        let analyzer = Analyzer::builder(&registry)
            .root("/repo")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.is_included(Path::new("/repo/a.unit.json")));
        assert!(analyzer.is_included(Path::new("/repo/src/deep/b.unit.json")));
        assert!(!analyzer.is_included(Path::new("/repo/src/b.json")));
    }

    #[test]
    fn test_invalid_glob() {
        let registry = registry();
        let err = Analyzer::builder(&registry)
            .root("/repo")
            .exclude("[")
            .build()
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Glob(_)));
    }

    #[test]
    fn test_strict_override() {
        let registry = registry();
        let mut config = Config::default();
        config.analyzer.strict = true;
        let analyzer = Analyzer::builder(&registry)
            .root("/repo")
            .config(config)
            .strict(false)
            .build()
            .expect("Failed to build analyzer");
        assert!(format!("{:?}", analyzer.matcher).contains("Lenient"));
    }
}
