//! Rule for `[NoPrimitiveTypes]` constructors and methods.
//!
//! # Detected Patterns
//!
//! - Any parameter whose type is one of the primitive special types
//!
//! # Good Patterns
//!
//! ```ignore
//! [NoPrimitiveTypes]
//! public Order(CustomerId customer, Quantity quantity) { }
//! ```

use law_enforcer_core::{MarkerRule, NodeId, ScanError, SemanticModel, SpecialType};
use tracing::trace;

/// Rule code for no-primitive-types.
pub const CODE: &str = "LE001";

/// Rule name for no-primitive-types.
pub const NAME: &str = "no-primitive-types";

/// Special types a marked callable may not take as parameters.
///
/// Matching is by identity: only the special types themselves, never
/// aliases or user types with the same simple name.
pub const DISALLOWED: [SpecialType; 17] = [
    SpecialType::Boolean,
    SpecialType::Byte,
    SpecialType::Char,
    SpecialType::DateTime,
    SpecialType::Decimal,
    SpecialType::Double,
    SpecialType::Enum,
    SpecialType::Int16,
    SpecialType::Int32,
    SpecialType::Int64,
    SpecialType::Object,
    SpecialType::SByte,
    SpecialType::Single,
    SpecialType::String,
    SpecialType::UInt16,
    SpecialType::UInt32,
    SpecialType::UInt64,
];

/// Forbids primitive parameter types on marked callables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrimitiveTypes;

impl NoPrimitiveTypes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns true if `ty` is on the disallowed list.
    #[must_use]
    pub fn is_disallowed(ty: SpecialType) -> bool {
        DISALLOWED.contains(&ty)
    }
}

impl MarkerRule for NoPrimitiveTypes {
    fn violates(&self, callable: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
        // Every parameter must resolve before a verdict is given.
        let types = model
            .parameters(callable)
            .map(|p| {
                model
                    .resolved_type(p)
                    .ok_or_else(|| ScanError::unresolved(p, "parameter type"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let found = types
            .iter()
            .filter_map(|ty| ty.special())
            .find(|&ty| Self::is_disallowed(ty));
        if let Some(ty) = found {
            trace!("{} takes {:?}", callable, ty);
        }
        Ok(found.is_some())
    }
}
