/// Syntax tree storage
///
/// Nodes live in an arena owned by [`SyntaxTree`] and refer to each other by
/// [`NodeId`]. Children are appended only through [`TreeBuilder::node`], which
/// also records the parent link; a sealed tree has no mutable API.

use sprout_lexer::{SyntaxKind, Token};
use std::fmt;

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A child slot: either a leaf token or a branching node
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Token(Token),
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    kind: SyntaxKind,
    parent: Option<NodeId>,
    children: Vec<Element>,
}

/// A parsed program: the arena plus its root
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(self.root)
    }

    /// Panics if `id` came from another tree.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        assert!(id.0 < self.nodes.len(), "node {} is not part of this tree", id.0);
        SyntaxNode { tree: self, id }
    }

    /// Number of branching nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Collects nodes bottom-up and seals them into a [`SyntaxTree`]
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node owning `children` and points every child node back at it.
    ///
    /// A child node can be attached only once.
    pub fn node(&mut self, kind: SyntaxKind, children: Vec<Element>) -> NodeId {
        assert!(kind.is_node(), "{} is a token kind", kind);
        let id = NodeId(self.nodes.len());
        for child in &children {
            if let Element::Node(child_id) = child {
                let data = &mut self.nodes[child_id.0];
                assert!(
                    data.parent.is_none(),
                    "{} node {} already has a parent",
                    data.kind,
                    child_id.0
                );
                data.parent = Some(id);
            }
        }
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children,
        });
        id
    }

    /// Seals the arena. The root must not have been attached anywhere.
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        assert!(self.nodes[root.0].parent.is_none(), "root node has a parent");
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}

/// Borrowed view of one node
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn kind(self) -> SyntaxKind {
        self.tree.data(self.id).kind
    }

    pub fn parent(self) -> Option<SyntaxNode<'a>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn child(self, index: usize) -> Option<SyntaxElement<'a>> {
        self.tree
            .data(self.id)
            .children
            .get(index)
            .map(|element| self.wrap(element))
    }

    pub fn children(self) -> impl Iterator<Item = SyntaxElement<'a>> + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |element| SyntaxElement::from_element(tree, element))
    }

    pub fn child_nodes(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.children().filter_map(SyntaxElement::into_node)
    }

    pub fn tokens(self) -> impl Iterator<Item = &'a Token> + 'a {
        self.children().filter_map(SyntaxElement::into_token)
    }

    /// First direct child token of `kind`.
    pub fn token(self, kind: SyntaxKind) -> Option<&'a Token> {
        self.tokens().find(|token| token.kind == kind)
    }

    fn wrap(self, element: &'a Element) -> SyntaxElement<'a> {
        SyntaxElement::from_element(self.tree, element)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Borrowed view of one child slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyntaxElement<'a> {
    Node(SyntaxNode<'a>),
    Token(&'a Token),
}

impl<'a> SyntaxElement<'a> {
    fn from_element(tree: &'a SyntaxTree, element: &'a Element) -> Self {
        match element {
            Element::Token(token) => SyntaxElement::Token(token),
            Element::Node(id) => SyntaxElement::Node(tree.node(*id)),
        }
    }

    pub fn kind(self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind,
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode<'a>> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<&'a Token> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}
