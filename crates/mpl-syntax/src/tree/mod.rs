//! The concrete syntax tree.
//!
//! Nodes live in a single arena owned by [`SyntaxTree`] and refer to each
//! other by [`NodeId`]. Interior nodes are the structural scopes (`Object`,
//! `List`, `Code`, `Label`) plus the `Program` root; every other node is a
//! terminal. All nodes but the root are additionally chained into one
//! document-order sequence that ignores nesting: a scope comes right before
//! its first child, so a label and its name (or a block and its opening
//! delimiter) sit next to each other at the same offset. Walking to the
//! previous or next token never needs to climb the tree.
//!
//! [`Node`] is a cheap copyable handle pairing the tree with an id. All
//! navigation lives on it; see the `query` module for position lookups.

mod dump;
mod line_index;
mod query;

pub use dump::dump;
pub use line_index::LineIndex;
pub use query::{AllAncestors, Strategy, Surroundings};

use text_size::{TextRange, TextSize};

use crate::syntax::SyntaxKind;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stored record of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) line: u32,
    pub(crate) column: u32,
    pub(crate) parent: Option<NodeId>,
    /// `None` for terminals.
    pub(crate) children: Option<Vec<NodeId>>,
    /// Sequence links; unset on the root.
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

/// An immutable syntax tree together with the text it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    text: String,
    nodes: Vec<NodeData>,
    first_symbol: Option<NodeId>,
}

impl SyntaxTree {
    pub(crate) fn new(text: String, nodes: Vec<NodeData>, first_symbol: Option<NodeId>) -> Self {
        Self {
            text,
            nodes,
            first_symbol,
        }
    }

    /// The `Program` root.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.node(NodeId::ROOT)
    }

    /// The full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree and is out of range here.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.index() < self.nodes.len(), "{id:?} is not part of this tree");
        Node { tree: self, id }
    }

    /// Returns the node for `id`, if the tree has one.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The first terminal of the document. Always present: every tree ends
    /// with `EOF`.
    #[must_use]
    pub fn first_token(&self) -> Option<Node<'_>> {
        self.symbols().find(|node| node.is_terminal())
    }

    /// Every node except the root, in sequence order: scopes before their
    /// contents.
    pub fn symbols(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        let first = self.first_symbol.map(|id| self.node(id));
        std::iter::successors(first, |node| node.next_symbol())
    }

    /// All terminals in document order.
    pub fn tokens(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        std::iter::successors(self.first_token(), |token| token.next_token())
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::hash::Hash for Node<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{:?}", self.kind(), self.range())
    }
}

impl<'a> Node<'a> {
    fn data(self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    fn at(self, id: NodeId) -> Node<'a> {
        Node {
            tree: self.tree,
            id,
        }
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(self) -> &'a SyntaxTree {
        self.tree
    }

    /// The arena id of this node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The syntax kind.
    #[must_use]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// The byte range, `[begin, end)`.
    #[must_use]
    pub fn range(self) -> TextRange {
        self.data().range
    }

    /// Inclusive start offset.
    #[must_use]
    pub fn begin(self) -> TextSize {
        self.range().start()
    }

    /// Exclusive end offset.
    #[must_use]
    pub fn end(self) -> TextSize {
        self.range().end()
    }

    /// Zero-based line of the first character.
    #[must_use]
    pub fn line(self) -> u32 {
        self.data().line
    }

    /// Zero-based byte column of the first character.
    #[must_use]
    pub fn column(self) -> u32 {
        self.data().column
    }

    /// The source text this node spans.
    #[must_use]
    pub fn text(self) -> &'a str {
        &self.tree.text[self.range()]
    }

    /// True for leaves.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.data().children.is_none()
    }

    /// True for the `Program` root.
    #[must_use]
    pub fn is_root(self) -> bool {
        self.id == NodeId::ROOT
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// The enclosing structural node; `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Parents up to and including the root, innermost first.
    pub fn ancestors(self) -> impl Iterator<Item = Node<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub(crate) fn child_ids(self) -> &'a [NodeId] {
        self.data().children.as_deref().unwrap_or(&[])
    }

    /// Direct children in document order; empty for terminals.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'a>> + ExactSizeIterator {
        let tree = self.tree;
        self.child_ids().iter().map(move |&id| Node { tree, id })
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(self) -> usize {
        self.child_ids().len()
    }

    /// The child at `index`.
    #[must_use]
    pub fn child(self, index: usize) -> Option<Node<'a>> {
        self.child_ids().get(index).map(|&id| self.at(id))
    }

    /// The first direct child.
    #[must_use]
    pub fn first_child(self) -> Option<Node<'a>> {
        self.child_ids().first().map(|&id| self.at(id))
    }

    /// The last direct child.
    #[must_use]
    pub fn last_child(self) -> Option<Node<'a>> {
        self.child_ids().last().map(|&id| self.at(id))
    }

    /// This node and everything below it, in document order.
    pub fn descendants(self) -> impl Iterator<Item = Node<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().rev());
            Some(node)
        })
    }

    // =========================================================================
    // Sequence
    // =========================================================================

    /// The node before this one in the sequence, scopes included.
    #[must_use]
    pub fn prev_symbol(self) -> Option<Node<'a>> {
        self.data().prev.map(|id| self.at(id))
    }

    /// The node after this one in the sequence, scopes included.
    #[must_use]
    pub fn next_symbol(self) -> Option<Node<'a>> {
        self.data().next.map(|id| self.at(id))
    }

    /// The closest terminal before this node.
    #[must_use]
    pub fn prev_token(self) -> Option<Node<'a>> {
        std::iter::successors(self.prev_symbol(), |node| node.prev_symbol())
            .find(|node| node.is_terminal())
    }

    /// The closest terminal after this node's start. For a scope that is its
    /// opening delimiter.
    #[must_use]
    pub fn next_token(self) -> Option<Node<'a>> {
        std::iter::successors(self.next_symbol(), |node| node.next_symbol())
            .find(|node| node.is_terminal())
    }

    /// The first terminal at or below this node.
    #[must_use]
    pub fn first_token(self) -> Option<Node<'a>> {
        let mut node = self;
        while !node.is_terminal() {
            node = node.first_child()?;
        }
        Some(node)
    }

    /// Terminals from this node to the end of the document.
    pub fn tokens_from(self) -> impl Iterator<Item = Node<'a>> {
        std::iter::successors(self.first_token(), |token| token.next_token())
    }

    /// Terminals from this node back to the start of the document.
    pub fn tokens_back(self) -> impl Iterator<Item = Node<'a>> {
        let start = if self.is_terminal() {
            Some(self)
        } else {
            self.very_last()
        };
        std::iter::successors(start, |token| token.prev_token())
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// True for `Object`, `List`, `Code` and `Label` nodes.
    #[must_use]
    pub fn is_scope(self) -> bool {
        !self.is_terminal() && self.kind().is_scope()
    }

    /// A scope whose last child is its closing delimiter.
    #[must_use]
    pub fn is_closed_scope(self) -> bool {
        self.is_scope() && self.last_child().is_some_and(|last| last.kind().is_scope_end())
    }

    /// A scope that ran out of input before its closing delimiter.
    #[must_use]
    pub fn is_unclosed_scope(self) -> bool {
        self.is_scope() && !self.is_closed_scope()
    }

    /// Opening delimiters, `:` and `:!` included.
    #[must_use]
    pub fn is_scope_start(self) -> bool {
        self.kind().is_scope_start()
    }

    /// Closing delimiters, `;` included.
    #[must_use]
    pub fn is_scope_end(self) -> bool {
        self.kind().is_scope_end()
    }

    /// True for label nodes.
    #[must_use]
    pub fn is_label(self) -> bool {
        self.kind().is_label()
    }

    /// A `name:! ... ;` label.
    #[must_use]
    pub fn is_label_reset(self) -> bool {
        self.is_label() && self.child(1).is_some_and(|c| c.kind() == SyntaxKind::ColonBang)
    }

    /// The `Name` terminal of a label.
    #[must_use]
    pub fn label_name(self) -> Option<Node<'a>> {
        if !self.is_label() {
            return None;
        }
        self.first_child().filter(|c| c.kind() == SyntaxKind::Name)
    }

    /// True for the `Name` terminal that names a label.
    #[must_use]
    pub fn is_label_name(self) -> bool {
        self.parent()
            .and_then(Node::label_name)
            .is_some_and(|name| name == self)
    }

    /// True for the six name terminals.
    #[must_use]
    pub fn looks_like_name(self) -> bool {
        self.kind().looks_like_name()
    }

    /// True for `LF`, `CRLF` and `CR`.
    #[must_use]
    pub fn is_eol(self) -> bool {
        self.kind().is_eol()
    }

    /// True for the `EOF` terminal.
    #[must_use]
    pub fn is_eof(self) -> bool {
        self.kind().is_eof()
    }

    /// True for comments.
    #[must_use]
    pub fn is_comment(self) -> bool {
        self.kind().is_comment()
    }

    /// True for strings.
    #[must_use]
    pub fn is_string(self) -> bool {
        self.kind().is_string()
    }

    /// True for integer literals.
    #[must_use]
    pub fn is_number(self) -> bool {
        self.kind().is_number()
    }

    /// True for real literals.
    #[must_use]
    pub fn is_real(self) -> bool {
        self.kind().is_real()
    }
}
