//! Marker kinds and their diagnostic descriptors.

use crate::symbols::TypeIdentity;
use crate::tree::DeclarationShape;
use crate::types::{Location, Severity, Violation};

use std::fmt;

/// Immutable description of the diagnostic a marker rule reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Diagnostic id, `LE` followed by three digits.
    pub id: &'static str,
    /// Kebab-case rule name.
    pub rule: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Message attached to each reported violation.
    pub message: &'static str,
    /// Full description.
    pub description: &'static str,
    /// Category; unused by the built-in markers.
    pub category: &'static str,
    /// Severity of every violation; not configurable.
    pub default_severity: Severity,
    /// Whether the rule runs without opt-in.
    pub enabled_by_default: bool,
}

impl DiagnosticDescriptor {
    /// Creates an error descriptor whose title, message and description are `message`.
    #[must_use]
    pub const fn new(id: &'static str, rule: &'static str, message: &'static str) -> Self {
        Self {
            id,
            rule,
            title: message,
            message,
            description: message,
            category: "",
            default_severity: Severity::Error,
            enabled_by_default: true,
        }
    }

    /// Creates a violation of this descriptor at `location`.
    #[must_use]
    pub fn violation_at(&self, location: Location) -> Violation {
        Violation::new(
            self.id,
            self.rule,
            self.default_severity,
            location,
            self.message,
        )
    }
}

static NO_PRIMITIVE_TYPES: DiagnosticDescriptor = DiagnosticDescriptor::new(
    "LE001",
    "no-primitive-types",
    "Primitive types are not allowed in this method",
);

static IMMUTABLE: DiagnosticDescriptor = DiagnosticDescriptor::new(
    "LE002",
    "immutable",
    "Mutable fields and properties are not allowed in this class or struct",
);

static POCO: DiagnosticDescriptor = DiagnosticDescriptor::new(
    "LE003",
    "poco",
    "Complex features are not allowed since this class or struct is designed to be serializable",
);

/// A marker annotation the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `[NoPrimitiveTypes]` on constructors and methods.
    NoPrimitiveTypes,
    /// `[Immutable]` on classes and structs.
    Immutable,
    /// `[POCO]` on classes and structs.
    Poco,
}

impl MarkerKind {
    /// All marker kinds, in diagnostic id order.
    pub const ALL: [Self; 3] = [Self::NoPrimitiveTypes, Self::Immutable, Self::Poco];

    /// Metadata name of the annotation type.
    #[must_use]
    pub const fn metadata_name(self) -> &'static str {
        match self {
            Self::NoPrimitiveTypes => "LawEnforcer.NoPrimitiveTypesAttribute",
            Self::Immutable => "LawEnforcer.Immutable",
            Self::Poco => "LawEnforcer.POCOAttribute",
        }
    }

    /// Maps a resolved annotation type to a marker kind.
    #[must_use]
    pub fn from_type(ty: &TypeIdentity) -> Option<Self> {
        match ty.metadata_name()? {
            "LawEnforcer.NoPrimitiveTypesAttribute" => Some(Self::NoPrimitiveTypes),
            "LawEnforcer.Immutable" => Some(Self::Immutable),
            "LawEnforcer.POCOAttribute" => Some(Self::Poco),
            _ => None,
        }
    }

    /// Declaration shape the marker may decorate.
    #[must_use]
    pub const fn shape(self) -> DeclarationShape {
        match self {
            Self::NoPrimitiveTypes => DeclarationShape::Callable,
            Self::Immutable | Self::Poco => DeclarationShape::Type,
        }
    }

    /// Descriptor of the diagnostic this marker reports.
    #[must_use]
    pub fn descriptor(self) -> &'static DiagnosticDescriptor {
        match self {
            Self::NoPrimitiveTypes => &NO_PRIMITIVE_TYPES,
            Self::Immutable => &IMMUTABLE,
            Self::Poco => &POCO,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPrimitiveTypes => write!(f, "NoPrimitiveTypes"),
            Self::Immutable => write!(f, "Immutable"),
            Self::Poco => write!(f, "POCO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SpecialType;

    #[test]
    fn descriptors_are_bit_exact() {
        let ids: Vec<_> = MarkerKind::ALL.iter().map(|k| k.descriptor().id).collect();
        assert_eq!(ids, vec!["LE001", "LE002", "LE003"]);

        let d = MarkerKind::Poco.descriptor();
        assert_eq!(
            d.message,
            "Complex features are not allowed since this class or struct is designed to be serializable"
        );
        assert_eq!(d.title, d.message);
        assert_eq!(d.description, d.message);
        assert_eq!(d.default_severity, Severity::Error);
        assert!(d.enabled_by_default);
    }

    #[test]
    fn metadata_names_round_trip() {
        for kind in MarkerKind::ALL {
            let ty = TypeIdentity::named(kind.metadata_name());
            assert_eq!(MarkerKind::from_type(&ty), Some(kind));
        }
    }

    #[test]
    fn unrelated_types_are_not_markers() {
        assert_eq!(MarkerKind::from_type(&TypeIdentity::named("Immutable")), None);
        assert_eq!(
            MarkerKind::from_type(&TypeIdentity::named("System.ObsoleteAttribute")),
            None
        );
        assert_eq!(MarkerKind::from_type(&SpecialType::Object.into()), None);
    }

    #[test]
    fn shapes_follow_marker_targets() {
        assert_eq!(MarkerKind::NoPrimitiveTypes.shape(), DeclarationShape::Callable);
        assert_eq!(MarkerKind::Immutable.shape(), DeclarationShape::Type);
        assert_eq!(MarkerKind::Poco.shape(), DeclarationShape::Type);
    }
}
