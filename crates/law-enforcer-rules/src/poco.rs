//! Rule for `[POCO]` classes and structs.
//!
//! A POCO type is public and simple, and holds nothing but trivial public
//! auto-properties:
//!
//! ```ignore
//! [POCO]
//! public class Order
//! {
//!     public int Id { get; set; }
//!     public string Customer { get; set; }
//! }
//! ```
//!
//! A type with no members at all is still a POCO.

use law_enforcer_core::{
    AccessorBody, AccessorKind, Accessibility, MarkerRule, NodeId, ScanError, SemanticModel,
    SyntaxKind,
};
use tracing::trace;

/// Rule code for poco.
pub const CODE: &str = "LE003";

/// Rule name for poco.
pub const NAME: &str = "poco";

/// Requires marked types to be plain serializable data objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poco;

impl Poco {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Public, and none of abstract, static, virtual or override.
    fn is_public_and_simple(
        declaration: NodeId,
        model: &dyn SemanticModel,
    ) -> Result<bool, ScanError> {
        let symbol = model
            .declared_symbol(declaration)
            .ok_or_else(|| ScanError::unresolved(declaration, "type symbol"))?;
        let m = symbol.modifiers;
        Ok(symbol.accessibility == Accessibility::Public
            && !m.is_abstract()
            && !m.is_static()
            && !m.is_virtual()
            && !m.is_override())
    }

    fn is_trivial_property(member: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
        let tree = model.tree();
        if tree.kind(member) != Some(SyntaxKind::Property) {
            return Ok(false);
        }

        // Only a block body counts; `get => field;` still reads as an auto accessor.
        let has_plain = |wanted: AccessorKind| {
            tree.children(member).iter().any(|&id| {
                matches!(
                    tree.kind(id),
                    Some(SyntaxKind::Accessor { kind, body })
                        if kind == wanted && body != AccessorBody::Block
                )
            })
        };
        if !has_plain(AccessorKind::Get) || !has_plain(AccessorKind::Set) {
            return Ok(false);
        }

        let symbol = model
            .declared_symbol(member)
            .ok_or_else(|| ScanError::unresolved(member, "property symbol"))?;
        let Some(facts) = symbol.property() else {
            return Err(ScanError::unresolved(member, "property facts"));
        };
        let m = symbol.modifiers;

        Ok(symbol.accessibility == Accessibility::Public
            && facts.is_definition
            && !m.is_abstract()
            && !m.is_read_only()
            && !facts.is_write_only
            && !facts.is_indexer
            && !facts.is_with_events
            && !facts.returns_by_ref
            && !m.is_override()
            && !m.is_virtual()
            && facts.setter == Some(Accessibility::Public)
            && facts.getter == Some(Accessibility::Public))
    }
}

impl MarkerRule for Poco {
    fn violates(&self, declaration: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
        if !Self::is_public_and_simple(declaration, model)? {
            trace!("{} is not public and simple", declaration);
            return Ok(true);
        }
        for member in model.members(declaration) {
            if !Self::is_trivial_property(member, model)? {
                trace!("{} has complex member {}", declaration, member);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;
    use serde_json::json;

    fn poco(
        accessibility: &str,
        modifiers: serde_json::Value,
        members: serde_json::Value,
    ) -> serde_json::Value {
        json!({
            "path": "R.cs",
            "members": [ { "kind": "class", "name": "R", "accessibility": accessibility,
                "modifiers": modifiers,
                "annotations": [ { "type": { "named": "LawEnforcer.POCOAttribute" },
                                   "span": { "line": 1, "column": 2 } } ],
                "members": members } ]
        })
    }

    fn auto_property(name: &str) -> serde_json::Value {
        json!({ "kind": "property", "name": name, "accessibility": "public",
                "type": { "special": "int32" },
                "accessors": [ { "kind": "get" }, { "kind": "set" } ] })
    }

    #[test]
    fn test_allows_public_auto_properties() {
        let members = json!([auto_property("X"), auto_property("Y")]);
        let violations = check(poco("public", json!([]), members));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allows_empty_public_type() {
        assert!(check(poco("public", json!([]), json!([]))).is_empty());
    }

    #[test]
    fn test_detects_internal_type() {
        let violations = check(poco("internal", json!([]), json!([auto_property("X")])));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].rule, NAME);
    }

    #[test]
    fn test_detects_empty_internal_type() {
        assert_eq!(check(poco("internal", json!([]), json!([]))).len(), 1);
    }

    #[test]
    fn test_detects_abstract_or_static_type() {
        assert_eq!(check(poco("public", json!(["abstract"]), json!([]))).len(), 1);
        assert_eq!(check(poco("public", json!(["static"]), json!([]))).len(), 1);
    }

    #[test]
    fn test_detects_virtual_or_override_type() {
        assert_eq!(check(poco("public", json!(["virtual"]), json!([]))).len(), 1);
        assert_eq!(check(poco("public", json!(["override"]), json!([]))).len(), 1);
    }

    #[test]
    fn test_ignores_unmodelled_type_modifiers() {
        let members = json!([auto_property("X")]);
        assert!(check(poco("public", json!(["sealed", "partial"]), members)).is_empty());
    }

    #[test]
    fn test_struct_is_checked_like_class() {
        let unit = |members: serde_json::Value| {
            json!({
                "path": "S.cs",
                "members": [ { "kind": "struct", "name": "S", "accessibility": "public",
                    "annotations": [ { "type": { "named": "LawEnforcer.POCOAttribute" } } ],
                    "members": members } ]
            })
        };
        assert!(check(unit(json!([auto_property("X")]))).is_empty());

        let violations = check(unit(json!([
            { "kind": "method", "name": "M", "accessibility": "public" }
        ])));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
    }

    #[test]
    fn test_detects_non_property_members() {
        for member in [
            json!({ "kind": "field", "variables": ["x"], "accessibility": "public" }),
            json!({ "kind": "method", "name": "M", "accessibility": "public" }),
            json!({ "kind": "constructor", "name": "R", "accessibility": "public" }),
            json!({ "kind": "event", "name": "E", "accessibility": "public" }),
            json!({ "kind": "indexer", "name": "this", "accessibility": "public",
                    "accessors": [ { "kind": "get" }, { "kind": "set" } ] }),
        ] {
            let violations = check(poco("public", json!([]), json!([member])));
            assert_eq!(violations.len(), 1);
        }
    }

    #[test]
    fn test_detects_getter_only_property() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "get" } ] }
        ])));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_block_accessor_bodies() {
        for accessors in [
            json!([ { "kind": "get", "body": "block" }, { "kind": "set" } ]),
            json!([ { "kind": "get" }, { "kind": "set", "body": "block" } ]),
        ] {
            let violations = check(poco("public", json!([]), json!([
                { "kind": "property", "name": "X", "accessibility": "public",
                  "accessors": accessors }
            ])));
            assert_eq!(violations.len(), 1);
        }
    }

    #[test]
    fn test_allows_expression_bodied_accessors() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "get", "body": "expression" },
                             { "kind": "set", "body": "expression" } ] }
        ])));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_detects_write_only_property() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "set" } ] }
        ])));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_non_public_getter() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "get", "accessibility": "protected" }, { "kind": "set" } ] }
        ])));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_private_setter() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "get" }, { "kind": "set", "accessibility": "private" } ] }
        ])));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_init_accessor() {
        let violations = check(poco("public", json!([]), json!([
            { "kind": "property", "name": "X", "accessibility": "public",
              "accessors": [ { "kind": "get" }, { "kind": "init" } ] }
        ])));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_virtual_or_partial_property() {
        let mut virtual_property = auto_property("X");
        virtual_property["modifiers"] = json!(["virtual"]);
        assert_eq!(check(poco("public", json!([]), json!([virtual_property]))).len(), 1);

        let mut partial_property = auto_property("X");
        partial_property["partial"] = json!(true);
        assert_eq!(check(poco("public", json!([]), json!([partial_property]))).len(), 1);
    }

    #[test]
    fn test_detects_abstract_or_override_property() {
        for modifier in ["abstract", "override"] {
            let mut property = auto_property("X");
            property["modifiers"] = json!([modifier]);
            let violations = check(poco("public", json!([]), json!([property])));
            assert_eq!(violations.len(), 1, "{modifier}");
        }
    }

    #[test]
    fn test_detects_ref_return_or_with_events_property() {
        for fact in ["returns_by_ref", "with_events"] {
            let mut property = auto_property("X");
            property[fact] = json!(true);
            let violations = check(poco("public", json!([]), json!([property])));
            assert_eq!(violations.len(), 1, "{fact}");
        }
    }

    #[test]
    fn test_detects_internal_property() {
        let mut property = auto_property("X");
        property["accessibility"] = json!("internal");
        assert_eq!(check(poco("public", json!([]), json!([property]))).len(), 1);
    }
}
