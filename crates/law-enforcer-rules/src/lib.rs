//! # law-enforcer-rules
//!
//! Built-in marker rules for law-enforcer.
//!
//! ## Available Rules
//!
//! | Code | Name | Marker | Applies to |
//! |------|------|--------|------------|
//! | LE001 | `no-primitive-types` | `[NoPrimitiveTypes]` | constructors, methods |
//! | LE002 | `immutable` | `[Immutable]` | classes, structs |
//! | LE003 | `poco` | `[POCO]` | classes, structs |
//!
//! ## Usage
//!
//! ```ignore
//! use law_enforcer_core::AnnotationMatcher;
//!
//! let matcher = AnnotationMatcher::new(law_enforcer_rules::default_registry());
//! let violations: Vec<_> = matcher.scan_unit(&unit).collect();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod immutable;
pub mod no_primitive_types;
pub mod poco;

pub use immutable::Immutable;
pub use no_primitive_types::{NoPrimitiveTypes, DISALLOWED};
pub use poco::Poco;

use law_enforcer_core::MarkerRegistry;
use std::sync::OnceLock;

/// Builds a registry binding each marker kind to its built-in rule.
#[must_use]
pub fn registry() -> MarkerRegistry {
    MarkerRegistry::new(NoPrimitiveTypes::new(), Immutable::new(), Poco::new())
}

/// Process-wide registry, built on first use and never mutated.
#[must_use]
pub fn default_registry() -> &'static MarkerRegistry {
    static REGISTRY: OnceLock<MarkerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(registry)
}
