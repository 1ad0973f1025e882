//! Arena syntax tree with explicit parent indices.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Ancestor walks are index-chasing loops bounded by tree depth, and the
//! pre-order walk follows document order as long as children are pushed
//! in source order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// The compilation-unit root of every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accessor keyword of a property, indexer or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorKind {
    /// `get`
    Get,
    /// `set`
    Set,
    /// `init`
    Init,
    /// `add`
    Add,
    /// `remove`
    Remove,
}

/// Body shape of an accessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorBody {
    /// No body: `get;`
    #[default]
    None,
    /// Block body: `get { return x; }`
    Block,
    /// Expression body: `get => x;`
    Expression,
}

/// Syntactic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of a unit.
    CompilationUnit,
    /// Namespace block.
    Namespace,
    /// Class declaration.
    Class,
    /// Struct declaration.
    Struct,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Method declaration.
    Method,
    /// Constructor declaration.
    Constructor,
    /// Property declaration.
    Property,
    /// Indexer declaration.
    Indexer,
    /// Field declaration; its declared variables are `Variable` children.
    Field,
    /// One declarator of a field declaration.
    Variable,
    /// Event declaration.
    Event,
    /// Parameter of a callable.
    Parameter,
    /// Accessor of a property, indexer or event.
    Accessor {
        /// Accessor keyword.
        kind: AccessorKind,
        /// Body shape.
        body: AccessorBody,
    },
    /// One annotation usage (`[Immutable]`).
    Attribute,
}

impl SyntaxKind {
    /// Whether nodes of this kind count as members of an enclosing type.
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Interface
                | Self::Enum
                | Self::Method
                | Self::Constructor
                | Self::Property
                | Self::Indexer
                | Self::Field
                | Self::Event
        )
    }

    /// Whether this is a parameter node.
    #[must_use]
    pub fn is_parameter(self) -> bool {
        matches!(self, Self::Parameter)
    }
}

/// Declaration shape a marker is applicable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationShape {
    /// Class or struct.
    Type,
    /// Method or constructor.
    Callable,
}

impl DeclarationShape {
    /// Returns true if `kind` has this shape.
    #[must_use]
    pub fn matches(self, kind: SyntaxKind) -> bool {
        match self {
            Self::Type => matches!(kind, SyntaxKind::Class | SyntaxKind::Struct),
            Self::Callable => matches!(kind, SyntaxKind::Method | SyntaxKind::Constructor),
        }
    }
}

impl fmt::Display for DeclarationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "class or struct"),
            Self::Callable => write!(f, "constructor or method"),
        }
    }
}

/// Source span of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the source file.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span from a line/column position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length.
    #[must_use]
    pub fn with_range(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A single syntax node.
#[derive(Debug, Clone)]
pub struct Node {
    kind: SyntaxKind,
    name: Option<String>,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Syntactic category.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Declared name, if the node has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Parent node; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of syntax nodes rooted at a compilation unit.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    /// Creates a tree holding only the compilation-unit root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: SyntaxKind::CompilationUnit,
                name: None,
                span: Span::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Appends a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not handed out by this tree.
    pub fn push(
        &mut self,
        parent: NodeId,
        kind: SyntaxKind,
        name: Option<String>,
        span: Span,
    ) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes[parent.index()].children.push(id);
        self.nodes.push(Node {
            kind,
            name,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<SyntaxKind> {
        self.get(id).map(Node::kind)
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Children of a node, empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], Node::children)
    }

    /// Walks from `id` up to the root, `id` included.
    #[must_use]
    pub fn ancestors_or_self(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|_| id),
        }
    }

    /// Walks the whole tree in pre-order.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Children of `id` whose kind satisfies `filter`, in document order.
    #[must_use]
    pub fn children_where(&self, id: NodeId, filter: fn(SyntaxKind) -> bool) -> Children<'_> {
        Children {
            tree: self,
            iter: self.children(id).iter(),
            filter,
        }
    }
}

/// Iterator over a node and its ancestors.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a tree.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

/// Filtered iterator over the children of one node.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tree: &'a SyntaxTree,
    iter: std::slice::Iter<'a, NodeId>,
    filter: fn(SyntaxKind) -> bool,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let filter = self.filter;
        self.iter
            .by_ref()
            .copied()
            .find(|&id| tree.kind(id).is_some_and(filter))
    }
}
