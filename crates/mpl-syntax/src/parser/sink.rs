//! Tree builder: the event sink that produces a [`SyntaxTree`].
//!
//! The builder keeps a stack of open structural nodes. Only `Object`, `List`,
//! `Code` and `Label` compounds open a node; other compounds only exist in the
//! event stream. Terminals are attached to the innermost open node. Opened
//! scopes and terminals are both appended to the document-wide sequence as
//! they arrive.

use text_size::{TextRange, TextSize};

use crate::parser::event::{EventSink, Position};
use crate::parser::{Parse, SyntaxError};
use crate::syntax::SyntaxKind;
use crate::tree::{NodeData, NodeId, SyntaxTree};

/// The event stream did not describe a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// `finish` was called without a preceding `reset`.
    #[error("tree builder was never reset")]
    NotStarted,
    /// Structural compounds were left open, or more were closed than opened.
    #[error("unbalanced compounds: {open} structural node(s) still open")]
    Unbalanced {
        /// Open nodes on the stack, root included.
        open: usize,
    },
}

/// Builds a [`SyntaxTree`] from parser events.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    text: String,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    first_symbol: Option<NodeId>,
    last_symbol: Option<NodeId>,
    errors: Vec<SyntaxError>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        if let Some(children) = data
            .parent
            .and_then(|parent| self.nodes[parent.index()].children.as_mut())
        {
            children.push(id);
        }
        self.nodes.push(data);
        id
    }

    fn link(&mut self, node: NodeId) {
        self.nodes[node.index()].prev = self.last_symbol;
        match self.last_symbol {
            Some(prev) => self.nodes[prev.index()].next = Some(node),
            None => self.first_symbol = Some(node),
        }
        self.last_symbol = Some(node);
    }

    /// Consumes the builder and returns the parse result.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the builder was never reset or the stack
    /// does not hold exactly the root.
    pub fn finish(self) -> Result<Parse, BuildError> {
        if self.nodes.is_empty() {
            return Err(BuildError::NotStarted);
        }
        if self.stack.len() != 1 {
            return Err(BuildError::Unbalanced {
                open: self.stack.len(),
            });
        }
        let tree = SyntaxTree::new(self.text, self.nodes, self.first_symbol);
        Ok(Parse::new(tree, self.errors))
    }
}

impl EventSink for TreeBuilder {
    fn reset(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.nodes.clear();
        self.stack.clear();
        self.first_symbol = None;
        self.last_symbol = None;
        self.errors.clear();

        let root = self.push(NodeData {
            kind: SyntaxKind::Program,
            range: TextRange::up_to(TextSize::of(text)),
            line: 0,
            column: 0,
            parent: None,
            children: Some(Vec::new()),
            prev: None,
            next: None,
        });
        self.stack.push(root);
    }

    fn start_compound(&mut self, kind: SyntaxKind, start: Position) {
        if !kind.is_structural() {
            return;
        }
        let node = self.push(NodeData {
            kind,
            range: TextRange::empty(start.offset),
            line: start.line,
            column: start.column,
            parent: self.stack.last().copied(),
            children: Some(Vec::new()),
            prev: None,
            next: None,
        });
        self.link(node);
        self.stack.push(node);
    }

    fn end_compound(&mut self, kind: SyntaxKind, end: TextSize) {
        if !kind.is_structural() {
            return;
        }
        let Some(node) = self.stack.pop() else {
            return;
        };
        if self.stack.is_empty() {
            // Ending the root is a protocol error; leave its span alone so
            // `finish` can report it.
            return;
        }
        let data = &mut self.nodes[node.index()];
        data.range = TextRange::new(data.range.start(), end);
    }

    fn terminal(&mut self, kind: SyntaxKind, start: Position, end: TextSize) {
        let node = self.push(NodeData {
            kind,
            range: TextRange::new(start.offset, end),
            line: start.line,
            column: start.column,
            parent: self.stack.last().copied(),
            children: None,
            prev: None,
            next: None,
        });
        self.link(node);
    }

    fn syntax_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: u32) -> Position {
        Position {
            offset: offset.into(),
            line: 0,
            column: offset,
        }
    }

    #[test]
    fn ignores_non_structural_compounds() {
        let mut builder = TreeBuilder::new();
        builder.reset("a");
        builder.start_compound(SyntaxKind::Program, at(0));
        builder.start_compound(SyntaxKind::NameExpression, at(0));
        builder.terminal(SyntaxKind::Name, at(0), 1.into());
        builder.end_compound(SyntaxKind::NameExpression, 1.into());
        builder.end_compound(SyntaxKind::Program, 1.into());
        builder.terminal(SyntaxKind::EOF, at(1), 1.into());

        let parse = builder.finish().unwrap();
        let root = parse.root();
        let kinds: Vec<_> = root.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, [SyntaxKind::Name, SyntaxKind::EOF]);
        assert_eq!(root.range(), TextRange::up_to(1.into()));
    }

    #[test]
    fn scopes_precede_their_children_in_sequence() {
        let mut builder = TreeBuilder::new();
        builder.reset("{a}");
        builder.start_compound(SyntaxKind::Object, at(0));
        builder.terminal(SyntaxKind::LCurly, at(0), 1.into());
        builder.terminal(SyntaxKind::Name, at(1), 2.into());
        builder.terminal(SyntaxKind::RCurly, at(2), 3.into());
        builder.end_compound(SyntaxKind::Object, 3.into());
        builder.terminal(SyntaxKind::EOF, at(3), 3.into());

        let parse = builder.finish().unwrap();
        let tree = parse.tree();
        let kinds: Vec<_> = tree.symbols().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::Object,
                SyntaxKind::LCurly,
                SyntaxKind::Name,
                SyntaxKind::RCurly,
                SyntaxKind::EOF,
            ]
        );
        assert_eq!(tree.first_token().unwrap().kind(), SyntaxKind::LCurly);
        assert_eq!(tree.tokens().count(), 4);
        let curly = tree.first_token().unwrap();
        assert_eq!(curly.prev_token(), None);
        assert_eq!(curly.prev_symbol().unwrap().kind(), SyntaxKind::Object);
    }

    #[test]
    fn unbalanced_stream_is_an_error() {
        let mut builder = TreeBuilder::new();
        builder.reset("{");
        builder.start_compound(SyntaxKind::Object, at(0));
        builder.terminal(SyntaxKind::LCurly, at(0), 1.into());
        assert_eq!(
            builder.finish().unwrap_err(),
            BuildError::Unbalanced { open: 2 }
        );
    }

    #[test]
    fn closing_the_root_is_an_error() {
        let mut builder = TreeBuilder::new();
        builder.reset("");
        builder.end_compound(SyntaxKind::Object, 0.into());
        assert_eq!(
            builder.finish().unwrap_err(),
            BuildError::Unbalanced { open: 0 }
        );
    }

    #[test]
    fn finish_without_reset() {
        assert_eq!(
            TreeBuilder::new().finish().unwrap_err(),
            BuildError::NotStarted
        );
    }

    #[test]
    fn reset_discards_previous_state() {
        let mut builder = TreeBuilder::new();
        builder.reset("{");
        builder.start_compound(SyntaxKind::Object, at(0));
        builder.reset("");
        builder.terminal(SyntaxKind::EOF, at(0), 0.into());
        let parse = builder.finish().unwrap();
        assert_eq!(parse.tree().node_count(), 2);
        assert!(parse.ok());
    }
}
