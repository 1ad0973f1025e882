//! Marker registry: one rule per marker kind.

use crate::marker::{DiagnosticDescriptor, MarkerKind};
use crate::rule::{MarkerRule, RuleBox};
use crate::symbols::TypeIdentity;

use std::fmt;

/// A marker kind together with its rule and descriptor.
#[derive(Clone, Copy)]
pub struct Binding<'a> {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Rule evaluated for each usage of the marker.
    pub rule: &'a dyn MarkerRule,
    /// Diagnostic reported on violation.
    pub descriptor: &'static DiagnosticDescriptor,
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("kind", &self.kind)
            .field("descriptor", &self.descriptor.id)
            .finish_non_exhaustive()
    }
}

/// Read-only table binding every [`MarkerKind`] to exactly one rule.
///
/// The constructor takes one rule per kind, so lookups are total.
pub struct MarkerRegistry {
    no_primitive_types: RuleBox,
    immutable: RuleBox,
    poco: RuleBox,
}

impl MarkerRegistry {
    /// Creates a registry from one rule per marker kind.
    #[must_use]
    pub fn new(
        no_primitive_types: impl MarkerRule + 'static,
        immutable: impl MarkerRule + 'static,
        poco: impl MarkerRule + 'static,
    ) -> Self {
        Self {
            no_primitive_types: Box::new(no_primitive_types),
            immutable: Box::new(immutable),
            poco: Box::new(poco),
        }
    }

    /// Returns the binding for `kind`.
    #[must_use]
    pub fn binding(&self, kind: MarkerKind) -> Binding<'_> {
        let rule = match kind {
            MarkerKind::NoPrimitiveTypes => &self.no_primitive_types,
            MarkerKind::Immutable => &self.immutable,
            MarkerKind::Poco => &self.poco,
        };
        Binding {
            kind,
            rule: rule.as_ref(),
            descriptor: kind.descriptor(),
        }
    }

    /// Looks up the binding for a resolved annotation type.
    #[must_use]
    pub fn resolve(&self, ty: &TypeIdentity) -> Option<Binding<'_>> {
        MarkerKind::from_type(ty).map(|kind| self.binding(kind))
    }

    /// All bindings, in diagnostic id order.
    pub fn bindings(&self) -> impl Iterator<Item = Binding<'_>> {
        MarkerKind::ALL.into_iter().map(|kind| self.binding(kind))
    }
}

impl fmt::Debug for MarkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bindings()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ScanError;
    use crate::semantic::SemanticModel;
    use crate::tree::NodeId;

    struct Fixed(bool);

    impl MarkerRule for Fixed {
        fn violates(&self, _: NodeId, _: &dyn SemanticModel) -> Result<bool, ScanError> {
            Ok(self.0)
        }
    }

    #[test]
    fn every_kind_is_bound() {
        let registry = MarkerRegistry::new(Fixed(true), Fixed(false), Fixed(true));
        let ids: Vec<_> = registry.bindings().map(|b| b.descriptor.id).collect();
        assert_eq!(ids, vec!["LE001", "LE002", "LE003"]);
    }

    #[test]
    fn resolve_maps_metadata_name_to_binding() {
        let registry = MarkerRegistry::new(Fixed(true), Fixed(false), Fixed(true));
        let binding = registry
            .resolve(&TypeIdentity::named("LawEnforcer.Immutable"))
            .unwrap();
        assert_eq!(binding.kind, MarkerKind::Immutable);
        assert_eq!(binding.descriptor.rule, "immutable");

        assert!(registry
            .resolve(&TypeIdentity::named("Acme.Immutable"))
            .is_none());
    }
}
