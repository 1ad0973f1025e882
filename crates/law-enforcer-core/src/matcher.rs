//! Annotation matcher: finds marker usages and evaluates their rules.
//!
//! This is the only component that walks the tree. For each annotation
//! usage, in document order, it resolves the usage's type, maps it to a
//! marker binding, climbs to the nearest declaration of the marker's shape
//! and asks the bound rule for a verdict.

use crate::marker::MarkerKind;
use crate::registry::{Binding, MarkerRegistry};
use crate::semantic::SemanticModel;
use crate::tree::{DeclarationShape, NodeId, Preorder, SyntaxKind};
use crate::types::{Label, Location, Violation};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Errors raised while evaluating a single annotation usage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The usage has no enclosing declaration of the marker's shape.
    #[error("{location}: [{marker}] is not attached to a {shape}")]
    StructuralMismatch {
        /// Marker found at the usage.
        marker: MarkerKind,
        /// Shape the marker requires.
        shape: DeclarationShape,
        /// Location of the usage.
        location: Location,
    },

    /// A type or symbol the rule needs could not be resolved.
    #[error("unresolved {expected} for node {node}")]
    SymbolResolution {
        /// Node whose facts are missing.
        node: NodeId,
        /// What was expected (e.g., "parameter type").
        expected: &'static str,
    },
}

impl ScanError {
    /// Shorthand for [`ScanError::SymbolResolution`].
    #[must_use]
    pub fn unresolved(node: NodeId, expected: &'static str) -> Self {
        Self::SymbolResolution { node, expected }
    }
}

/// How structural mismatches are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Log and skip the usage.
    #[default]
    Lenient,
    /// Surface the mismatch as an error item.
    Strict,
}

/// Scans units for marker usages against a [`MarkerRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct AnnotationMatcher<'r> {
    registry: &'r MarkerRegistry,
    mode: ScanMode,
}

impl<'r> AnnotationMatcher<'r> {
    /// Creates a lenient matcher.
    #[must_use]
    pub fn new(registry: &'r MarkerRegistry) -> Self {
        Self {
            registry,
            mode: ScanMode::Lenient,
        }
    }

    /// Sets the scan mode.
    #[must_use]
    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Lazily scans `unit`, yielding violations and, in strict mode,
    /// structural errors.
    #[must_use]
    pub fn scan<'a>(&self, unit: &'a dyn SemanticModel) -> Scan<'a>
    where
        'r: 'a,
    {
        Scan {
            matcher: AnnotationMatcher {
                registry: self.registry,
                mode: self.mode,
            },
            unit,
            nodes: unit.tree().preorder(),
        }
    }

    /// Lazily scans `unit` leniently, yielding only violations.
    pub fn scan_unit<'a>(&self, unit: &'a dyn SemanticModel) -> impl Iterator<Item = Violation> + 'a
    where
        'r: 'a,
    {
        self.mode(ScanMode::Lenient)
            .scan(unit)
            .filter_map(Result::ok)
    }

    /// Scans `unit` honoring the configured mode.
    pub fn try_scan_unit<'a>(
        &self,
        unit: &'a dyn SemanticModel,
    ) -> impl Iterator<Item = Result<Violation, ScanError>> + 'a
    where
        'r: 'a,
    {
        self.scan(unit)
    }

    /// Evaluates every usage of `unit` on the rayon pool.
    ///
    /// Violations come back in document order.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first structural mismatch in document order.
    pub fn scan_parallel(&self, unit: &dyn SemanticModel) -> Result<Vec<Violation>, ScanError> {
        if unit.is_generated() {
            return Ok(Vec::new());
        }
        let tree = unit.tree();
        let usages: Vec<NodeId> = tree
            .preorder()
            .filter(|&id| tree.kind(id) == Some(SyntaxKind::Attribute))
            .collect();

        let verdicts = usages
            .par_iter()
            .map(|&usage| self.settle(self.evaluate(unit, usage)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(verdicts.into_iter().flatten().collect())
    }

    /// Evaluates a single annotation usage.
    ///
    /// Returns `Ok(None)` when the usage is not a registered marker or the
    /// decorated declaration honors the contract.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::StructuralMismatch`] when no declaration of the
    /// marker's shape encloses the usage, or whatever the rule reports.
    pub fn evaluate(
        &self,
        unit: &dyn SemanticModel,
        usage: NodeId,
    ) -> Result<Option<Violation>, ScanError> {
        let Some(ty) = unit.resolved_type(usage) else {
            trace!("Annotation {} has no resolved type", usage);
            return Ok(None);
        };
        let Some(binding) = self.registry.resolve(ty) else {
            return Ok(None);
        };

        let shape = binding.kind.shape();
        let declaration = unit.enclosing_declaration(usage, shape).ok_or_else(|| {
            ScanError::StructuralMismatch {
                marker: binding.kind,
                shape,
                location: unit.location(usage),
            }
        })?;

        debug!(
            "Evaluating {} on {} in {}",
            binding.descriptor.rule,
            declaration,
            unit.path().display()
        );

        if !binding.rule.violates(declaration, unit)? {
            return Ok(None);
        }

        Ok(Some(violation(unit, usage, declaration, binding)))
    }

    /// Applies the error policy to one verdict.
    fn settle(
        &self,
        verdict: Result<Option<Violation>, ScanError>,
    ) -> Result<Option<Violation>, ScanError> {
        match verdict {
            Err(e @ ScanError::StructuralMismatch { .. }) if self.mode == ScanMode::Strict => Err(e),
            Err(e @ ScanError::StructuralMismatch { .. }) => {
                warn!("Skipping annotation: {}", e);
                Ok(None)
            }
            Err(e @ ScanError::SymbolResolution { .. }) => {
                debug!("Skipping annotation: {}", e);
                Ok(None)
            }
            ok => ok,
        }
    }
}

fn violation(
    unit: &dyn SemanticModel,
    usage: NodeId,
    declaration: NodeId,
    binding: Binding<'_>,
) -> Violation {
    let v = binding.descriptor.violation_at(unit.location(usage));
    let Some(node) = unit.tree().get(declaration) else {
        return v;
    };
    let what = match node.kind() {
        SyntaxKind::Class => "class",
        SyntaxKind::Struct => "struct",
        SyntaxKind::Constructor => "constructor",
        _ => "method",
    };
    let message = match node.name() {
        Some(name) => format!("[{}] applies to {what} `{name}`", binding.kind),
        None => format!("[{}] applies to this {what}", binding.kind),
    };
    v.with_label(Label::new(unit.location(declaration), message))
}

/// Lazy, single-pass scan over one unit.
///
/// Created by [`AnnotationMatcher::scan`].
pub struct Scan<'a> {
    matcher: AnnotationMatcher<'a>,
    unit: &'a dyn SemanticModel,
    nodes: Preorder<'a>,
}

impl Iterator for Scan<'_> {
    type Item = Result<Violation, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.unit.is_generated() {
            return None;
        }
        let tree = self.unit.tree();
        for id in self.nodes.by_ref() {
            if tree.kind(id) != Some(SyntaxKind::Attribute) {
                continue;
            }
            let verdict = self.matcher.evaluate(self.unit, id);
            match self.matcher.settle(verdict) {
                Ok(Some(v)) => return Some(Ok(v)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
