//! Symbol facts provider: the semantic view the engine reads.

use crate::symbols::{Symbol, TypeIdentity};
use crate::tree::{Children, DeclarationShape, Node, NodeId, Span, SyntaxKind, SyntaxTree};
use crate::types::Location;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read-only semantic model of one unit of source.
///
/// Hosts that own a parser and resolver implement this trait directly.
/// [`UnitOfSource`] is the in-memory implementation used by the snapshot
/// loader and by tests.
pub trait SemanticModel: Send + Sync {
    /// Path of the source file this unit was parsed from.
    fn path(&self) -> &Path;

    /// The syntax tree.
    fn tree(&self) -> &SyntaxTree;

    /// Fully resolved type of an annotation usage or parameter node.
    fn resolved_type(&self, node: NodeId) -> Option<&TypeIdentity>;

    /// Declared symbol of a declaration node.
    fn declared_symbol(&self, node: NodeId) -> Option<&Symbol>;

    /// Nearest ancestor-or-self of `node` with the requested shape.
    fn enclosing_declaration(&self, node: NodeId, shape: DeclarationShape) -> Option<NodeId> {
        let tree = self.tree();
        tree.ancestors_or_self(node)
            .find(|&id| tree.kind(id).is_some_and(|kind| shape.matches(kind)))
    }

    /// Direct members of a type declaration, in document order.
    fn members(&self, declaration: NodeId) -> Children<'_> {
        self.tree().children_where(declaration, SyntaxKind::is_member)
    }

    /// Parameters of a callable declaration, in document order.
    fn parameters(&self, callable: NodeId) -> Children<'_> {
        self.tree().children_where(callable, SyntaxKind::is_parameter)
    }

    /// True when the unit was produced by a code generator. Generated units
    /// are never reported on.
    fn is_generated(&self) -> bool {
        false
    }

    /// Source location of a node within this unit.
    fn location(&self, node: NodeId) -> Location {
        let span = self.tree().get(node).map(Node::span).unwrap_or_default();
        Location::from_span(self.path().to_path_buf(), span)
    }
}

/// Syntax tree plus side tables for resolved types and declared symbols.
#[derive(Debug, Clone)]
pub struct UnitOfSource {
    path: PathBuf,
    tree: SyntaxTree,
    types: HashMap<NodeId, TypeIdentity>,
    symbols: HashMap<NodeId, Symbol>,
    generated: bool,
}

impl UnitOfSource {
    /// Starts building a unit for `path`.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> UnitBuilder {
        UnitBuilder::new(path)
    }
}

impl SemanticModel for UnitOfSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    fn resolved_type(&self, node: NodeId) -> Option<&TypeIdentity> {
        self.types.get(&node)
    }

    fn declared_symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.symbols.get(&node)
    }

    fn is_generated(&self) -> bool {
        self.generated
    }
}

/// Incremental builder for a [`UnitOfSource`].
///
/// Nodes must be added in document order so that the pre-order walk
/// matches source order.
#[derive(Debug)]
pub struct UnitBuilder {
    unit: UnitOfSource,
}

impl UnitBuilder {
    /// Creates a builder holding an empty compilation unit.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            unit: UnitOfSource {
                path: path.into(),
                tree: SyntaxTree::new(),
                types: HashMap::new(),
                symbols: HashMap::new(),
                generated: false,
            },
        }
    }

    /// Root of the unit.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Adds a node under `parent`.
    pub fn node(
        &mut self,
        parent: NodeId,
        kind: SyntaxKind,
        name: Option<&str>,
        span: Span,
    ) -> NodeId {
        self.unit
            .tree
            .push(parent, kind, name.map(str::to_string), span)
    }

    /// Records the resolved type of `node`.
    pub fn resolve_type(&mut self, node: NodeId, ty: TypeIdentity) -> &mut Self {
        self.unit.types.insert(node, ty);
        self
    }

    /// Records the declared symbol of `node`.
    pub fn declare(&mut self, node: NodeId, symbol: Symbol) -> &mut Self {
        self.unit.symbols.insert(node, symbol);
        self
    }

    /// Adds an annotation usage under `target`, resolved to `ty` when known.
    pub fn annotation(&mut self, target: NodeId, ty: Option<TypeIdentity>, span: Span) -> NodeId {
        let id = self.node(target, SyntaxKind::Attribute, None, span);
        if let Some(ty) = ty {
            self.resolve_type(id, ty);
        }
        id
    }

    /// Marks the unit as generated code.
    pub fn generated(&mut self, generated: bool) -> &mut Self {
        self.unit.generated = generated;
        self
    }

    /// Finishes the unit.
    #[must_use]
    pub fn finish(self) -> UnitOfSource {
        self.unit
    }
}
