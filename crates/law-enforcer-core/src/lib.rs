//! # law-enforcer-core
//!
//! Engine for checking marker annotations against the declarations they
//! decorate.
//!
//! This crate provides the foundational traits and types. It includes:
//!
//! - [`SemanticModel`], the read-only view of one parsed unit of source
//! - [`MarkerRule`], the predicate bound to each [`MarkerKind`]
//! - [`MarkerRegistry`], one rule per marker kind
//! - [`AnnotationMatcher`], the traversal that finds usages and reports
//!   [`Violation`]s
//! - [`Analyzer`] for scanning a directory of unit snapshots
//!
//! ## Example
//!
//! ```ignore
//! use law_enforcer_core::{snapshot, AnnotationMatcher};
//!
//! let unit = snapshot::load_file("Shapes.unit.json".as_ref())?;
//! let matcher = AnnotationMatcher::new(&registry);
//! for violation in matcher.scan_unit(&unit) {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod marker;
mod matcher;
mod registry;
mod reporter;
mod rule;
mod semantic;
mod symbols;
mod tree;
mod types;

/// Unit snapshot format and loader.
pub mod snapshot;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    AnalyzerConfig, Config, ConfigError, DEFAULT_EXCLUDES, DEFAULT_GENERATED, DEFAULT_INCLUDE,
};
pub use marker::{DiagnosticDescriptor, MarkerKind};
pub use matcher::{AnnotationMatcher, Scan, ScanError, ScanMode};
pub use registry::{Binding, MarkerRegistry};
pub use reporter::{report_all, DiagnosticSink};
pub use rule::{MarkerRule, RuleBox};
pub use semantic::{SemanticModel, UnitBuilder, UnitOfSource};
pub use symbols::{
    Accessibility, Modifier, Modifiers, PropertyFacts, SpecialType, Symbol, SymbolKind,
    TypeIdentity,
};
pub use tree::{
    AccessorBody, AccessorKind, Ancestors, Children, DeclarationShape, Node, NodeId, Preorder,
    Span, SyntaxKind, SyntaxTree,
};
pub use types::{Label, LintResult, Location, Severity, Violation, ViolationDiagnostic};
