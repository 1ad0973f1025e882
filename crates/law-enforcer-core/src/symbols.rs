//! Resolved semantic facts: type identities, accessibility, modifiers and symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known types resolved by identity rather than by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialType {
    /// `System.Object`
    Object,
    /// `System.Enum`
    Enum,
    /// `System.ValueType`
    ValueType,
    /// `System.Void`
    Void,
    /// `System.Boolean`
    Boolean,
    /// `System.Char`
    Char,
    /// `System.SByte`
    SByte,
    /// `System.Byte`
    Byte,
    /// `System.Int16`
    Int16,
    /// `System.UInt16`
    UInt16,
    /// `System.Int32`
    Int32,
    /// `System.UInt32`
    UInt32,
    /// `System.Int64`
    Int64,
    /// `System.UInt64`
    UInt64,
    /// `System.Decimal`
    Decimal,
    /// `System.Single`
    Single,
    /// `System.Double`
    Double,
    /// `System.String`
    String,
    /// `System.IntPtr`
    IntPtr,
    /// `System.UIntPtr`
    UIntPtr,
    /// `System.Array`
    Array,
    /// `System.Nullable<T>`
    Nullable,
    /// `System.DateTime`
    DateTime,
}

/// Identity of a resolved type.
///
/// Two identities are equal only when they denote the same type: a named
/// type called `Int32` is never equal to [`SpecialType::Int32`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeIdentity {
    /// One of the well-known special types.
    Special(SpecialType),
    /// Any other type, keyed by its fully qualified metadata name.
    Named(String),
}

impl TypeIdentity {
    /// Creates a named identity.
    #[must_use]
    pub fn named(metadata_name: impl Into<String>) -> Self {
        Self::Named(metadata_name.into())
    }

    /// Returns the special type, if this is one.
    #[must_use]
    pub fn special(&self) -> Option<SpecialType> {
        match self {
            Self::Special(s) => Some(*s),
            Self::Named(_) => None,
        }
    }

    /// Returns the metadata name of a named type.
    #[must_use]
    pub fn metadata_name(&self) -> Option<&str> {
        match self {
            Self::Special(_) => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<SpecialType> for TypeIdentity {
    fn from(special: SpecialType) -> Self {
        Self::Special(special)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Special(s) => write!(f, "System.{s:?}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// No accessibility applies.
    #[default]
    NotApplicable,
    /// `private`
    Private,
    /// `private protected`
    ProtectedAndInternal,
    /// `protected`
    Protected,
    /// `internal`
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    /// `public`
    Public,
}

/// A single declaration modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// `abstract`
    Abstract,
    /// `static`
    Static,
    /// `virtual`
    Virtual,
    /// `override`
    Override,
    /// `readonly`, or a property without a writing accessor.
    ReadOnly,
    /// Any modifier no rule reads (`sealed`, `partial`, `const`, `new`, ...).
    #[serde(other)]
    Other,
}

impl Modifier {
    const fn bit(self) -> u8 {
        match self {
            Self::Other => 0,
            _ => 1 << self as u8,
        }
    }
}

/// Set of [`Modifier`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy with `modifier` added.
    #[must_use]
    pub const fn with(self, modifier: Modifier) -> Self {
        Self(self.0 | modifier.bit())
    }

    /// Returns true if `modifier` is in the set.
    #[must_use]
    pub const fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// Shorthand for `contains(Modifier::Abstract)`.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        self.contains(Modifier::Abstract)
    }

    /// Shorthand for `contains(Modifier::Static)`.
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.contains(Modifier::Static)
    }

    /// Shorthand for `contains(Modifier::Virtual)`.
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        self.contains(Modifier::Virtual)
    }

    /// Shorthand for `contains(Modifier::Override)`.
    #[must_use]
    pub const fn is_override(self) -> bool {
        self.contains(Modifier::Override)
    }

    /// Shorthand for `contains(Modifier::ReadOnly)`.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        self.contains(Modifier::ReadOnly)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Facts only properties carry.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyFacts {
    /// False for a partial signature without implementation.
    pub is_definition: bool,
    /// Has a writing accessor but no reading one.
    pub is_write_only: bool,
    /// Declared as an indexer.
    pub is_indexer: bool,
    /// Bound to external events.
    pub is_with_events: bool,
    /// Returns by reference.
    pub returns_by_ref: bool,
    /// Accessibility of the reading accessor, if present.
    pub getter: Option<Accessibility>,
    /// Accessibility of the writing accessor (`set` or `init`), if present.
    pub setter: Option<Accessibility>,
}

impl Default for PropertyFacts {
    fn default() -> Self {
        Self {
            is_definition: true,
            is_write_only: false,
            is_indexer: false,
            is_with_events: false,
            returns_by_ref: false,
            getter: None,
            setter: None,
        }
    }
}

/// What kind of entity a symbol declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Class or struct.
    Type,
    /// Method or constructor.
    Method,
    /// One field variable.
    Field,
    /// Parameter.
    Parameter,
    /// Event.
    Event,
    /// Property or indexer.
    Property(PropertyFacts),
}

/// Declared symbol of a declaration node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Simple name.
    pub name: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Declaration modifiers.
    pub modifiers: Modifiers,
    /// Symbol category and category-specific facts.
    pub kind: SymbolKind,
}

impl Symbol {
    /// Creates a symbol with no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, accessibility: Accessibility, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            accessibility,
            modifiers: Modifiers::empty(),
            kind,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Property facts, if this symbol is a property.
    #[must_use]
    pub fn property(&self) -> Option<&PropertyFacts> {
        match &self.kind {
            SymbolKind::Property(facts) => Some(facts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_int32_is_not_special_int32() {
        assert_ne!(
            TypeIdentity::named("Int32"),
            TypeIdentity::Special(SpecialType::Int32)
        );
        assert_eq!(TypeIdentity::named("Int32").special(), None);
    }

    #[test]
    fn type_identity_json_is_tagged_by_identity() {
        let special: TypeIdentity = serde_json::from_str(r#"{"special":"uint64"}"#).unwrap();
        assert_eq!(special, SpecialType::UInt64.into());

        let named: TypeIdentity = serde_json::from_str(r#"{"named":"Acme.Widget"}"#).unwrap();
        assert_eq!(named.metadata_name(), Some("Acme.Widget"));
    }

    #[test]
    fn modifiers_collect_into_set() {
        let mods: Modifiers = [Modifier::Abstract, Modifier::ReadOnly].into_iter().collect();
        assert!(mods.is_abstract());
        assert!(mods.is_read_only());
        assert!(!mods.is_static());
        assert!(!mods.is_virtual());
        assert!(!mods.is_override());
    }

    #[test]
    fn unknown_modifier_names_parse_and_carry_no_bit() {
        let mods: Vec<Modifier> =
            serde_json::from_str(r#"["sealed", "static", "partial"]"#).unwrap();
        assert_eq!(mods, vec![Modifier::Other, Modifier::Static, Modifier::Other]);

        let set: Modifiers = mods.into_iter().collect();
        assert_eq!(set, Modifiers::empty().with(Modifier::Static));
        assert!(!set.contains(Modifier::Other));
    }

    #[test]
    fn accessibility_parses_snake_case() {
        let a: Accessibility = serde_json::from_str(r#""protected_or_internal""#).unwrap();
        assert_eq!(a, Accessibility::ProtectedOrInternal);
    }
}
