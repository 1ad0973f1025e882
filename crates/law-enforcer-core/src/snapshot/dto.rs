//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to a [`UnitOfSource`](crate::UnitOfSource) by the loader.

use crate::symbols::{Accessibility, Modifier, TypeIdentity};
use crate::tree::{AccessorBody, AccessorKind, Span};

use serde::Deserialize;
use std::path::PathBuf;

/// Raw JSON representation of one unit of source.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDto {
    /// Path of the original source file.
    pub path: PathBuf,
    /// Original source text; carried for tooling, ignored by the engine.
    #[serde(default)]
    pub source: Option<String>,
    /// Set by hosts for output of code generators.
    #[serde(default)]
    pub generated: bool,
    /// Top-level declarations in document order.
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

/// A declaration, tagged by its `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDto {
    /// Namespace block.
    Namespace(NamespaceDto),
    /// Class declaration.
    Class(TypeDto),
    /// Struct declaration.
    Struct(TypeDto),
    /// Interface declaration.
    Interface(TypeDto),
    /// Enum declaration.
    Enum(TypeDto),
    /// Method declaration.
    Method(CallableDto),
    /// Constructor declaration.
    Constructor(CallableDto),
    /// Property declaration.
    Property(PropertyDto),
    /// Indexer declaration.
    Indexer(PropertyDto),
    /// Field declaration.
    Field(FieldDto),
    /// Event declaration.
    Event(EventDto),
}

/// Namespace block.
#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceDto {
    /// Namespace name.
    pub name: String,
    /// Span of the block.
    #[serde(default)]
    pub span: Span,
    /// Nested declarations.
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

/// Annotation usage; a missing `type` means the host could not resolve it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationDto {
    /// Resolved annotation type.
    #[serde(rename = "type", default)]
    pub ty: Option<TypeIdentity>,
    /// Span of the usage.
    #[serde(default)]
    pub span: Span,
}

/// Class, struct, interface or enum.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDto {
    /// Type name.
    pub name: String,
    /// Span of the declaration.
    #[serde(default)]
    pub span: Span,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaration modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Annotation usages.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
    /// Direct members.
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

/// Method or constructor.
#[derive(Debug, Clone, Deserialize)]
pub struct CallableDto {
    /// Callable name.
    pub name: String,
    /// Span of the declaration.
    #[serde(default)]
    pub span: Span,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaration modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Annotation usages.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterDto>,
}

/// Callable parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDto {
    /// Parameter name.
    pub name: String,
    /// Resolved parameter type.
    #[serde(rename = "type", default)]
    pub ty: Option<TypeIdentity>,
    /// Span of the parameter.
    #[serde(default)]
    pub span: Span,
}

/// Property or indexer.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDto {
    /// Property name (`this` for indexers).
    pub name: String,
    /// Span of the declaration.
    #[serde(default)]
    pub span: Span,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaration modifiers; read-only is derived from the accessors.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Resolved property type.
    #[serde(rename = "type", default)]
    pub ty: Option<TypeIdentity>,
    /// Annotation usages.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
    /// Accessors in declaration order.
    #[serde(default)]
    pub accessors: Vec<AccessorDto>,
    /// Partial signature without implementation.
    #[serde(default)]
    pub partial: bool,
    /// Returns by reference.
    #[serde(default)]
    pub returns_by_ref: bool,
    /// Bound to external events.
    #[serde(default)]
    pub with_events: bool,
}

/// Property accessor.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessorDto {
    /// Accessor keyword.
    pub kind: AccessorKind,
    /// Body shape.
    #[serde(default)]
    pub body: AccessorBody,
    /// Accessor-level accessibility; defaults to the property's.
    #[serde(default)]
    pub accessibility: Option<Accessibility>,
    /// Span of the accessor.
    #[serde(default)]
    pub span: Span,
}

/// Field declaration with one or more variables.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDto {
    /// Declared variable names.
    pub variables: Vec<String>,
    /// Span of the declaration.
    #[serde(default)]
    pub span: Span,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaration modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Resolved field type.
    #[serde(rename = "type", default)]
    pub ty: Option<TypeIdentity>,
    /// Annotation usages.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
}

/// Event declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    /// Event name.
    pub name: String,
    /// Span of the declaration.
    #[serde(default)]
    pub span: Span,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Declaration modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Annotation usages.
    #[serde(default)]
    pub annotations: Vec<AnnotationDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tagged_members() {
        let dto: UnitDto = serde_json::from_str(
            r#"{
                "path": "P.cs",
                "members": [
                    { "kind": "class", "name": "P", "accessibility": "public",
                      "annotations": [ { "type": { "named": "LawEnforcer.Immutable" } } ],
                      "members": [
                        { "kind": "field", "variables": ["a", "b"], "modifiers": ["read_only"] },
                        { "kind": "property", "name": "X",
                          "accessors": [ { "kind": "get" }, { "kind": "set", "body": "block" } ] }
                      ] }
                ]
            }"#,
        )
        .unwrap();

        let MemberDto::Class(class) = &dto.members[0] else {
            panic!("expected class");
        };
        assert_eq!(class.accessibility, Accessibility::Public);
        assert_eq!(class.members.len(), 2);
        let MemberDto::Property(prop) = &class.members[1] else {
            panic!("expected property");
        };
        assert_eq!(prop.accessors[1].body, AccessorBody::Block);
        assert!(prop.accessors[0].accessibility.is_none());
    }

    #[test]
    fn unknown_member_kind_is_rejected() {
        let result: Result<UnitDto, _> =
            serde_json::from_str(r#"{ "path": "P.cs", "members": [ { "kind": "delegate", "name": "D" } ] }"#);
        assert!(result.is_err());
    }
}
