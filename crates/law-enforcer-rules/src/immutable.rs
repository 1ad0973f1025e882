//! Rule for `[Immutable]` classes and structs.
//!
//! # Detected Patterns
//!
//! - A property with a `set` or `init` accessor
//! - A field variable without `readonly`
//!
//! Indexers, events, methods and nested types are not examined.

use law_enforcer_core::{MarkerRule, NodeId, ScanError, SemanticModel, SyntaxKind};
use tracing::trace;

/// Rule code for immutable.
pub const CODE: &str = "LE002";

/// Rule name for immutable.
pub const NAME: &str = "immutable";

/// Forbids mutable fields and properties on marked types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immutable;

impl Immutable {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_mutable(node: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
        let symbol = model
            .declared_symbol(node)
            .ok_or_else(|| ScanError::unresolved(node, "member symbol"))?;
        Ok(!symbol.modifiers.is_read_only())
    }
}

fn is_variable(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Variable
}

impl MarkerRule for Immutable {
    fn violates(&self, declaration: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
        let tree = model.tree();
        for member in model.members(declaration) {
            let mutable = match tree.kind(member) {
                Some(SyntaxKind::Property) => Self::is_mutable(member, model)?,
                Some(SyntaxKind::Field) => {
                    let mut any = false;
                    for variable in tree.children_where(member, is_variable) {
                        if Self::is_mutable(variable, model)? {
                            any = true;
                            break;
                        }
                    }
                    any
                }
                _ => false,
            };
            if mutable {
                trace!("{} has mutable member {}", declaration, member);
                return Ok(true);
            }
        }
        Ok(false)
    }
}
