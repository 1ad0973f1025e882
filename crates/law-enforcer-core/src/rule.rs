//! Rule trait for marker contracts.

use crate::matcher::ScanError;
use crate::semantic::SemanticModel;
use crate::tree::NodeId;

/// Structural predicate bound to one marker kind.
///
/// Rules are pure: the verdict depends only on the declaration and the
/// semantic model, so one instance may be shared across threads and units.
///
/// # Example
///
/// ```ignore
/// use law_enforcer_core::{MarkerRule, NodeId, ScanError, SemanticModel};
///
/// pub struct NoParameters;
///
/// impl MarkerRule for NoParameters {
///     fn violates(&self, callable: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError> {
///         Ok(model.parameters(callable).next().is_some())
///     }
/// }
/// ```
pub trait MarkerRule: Send + Sync {
    /// Returns `Ok(true)` when `declaration` breaks the marker's contract.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::SymbolResolution`] when a fact the verdict needs
    /// is missing from the model.
    fn violates(&self, declaration: NodeId, model: &dyn SemanticModel) -> Result<bool, ScanError>;
}

/// Type alias for boxed `MarkerRule` trait objects.
pub type RuleBox = Box<dyn MarkerRule>;
