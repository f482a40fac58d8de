//! Position queries over the tree.
//!
//! Children of a structural node are ordered and non-overlapping, so every
//! lookup is one binary search per level. A child *covers* an offset when the
//! offset falls inside it, when the child is empty and sits exactly at the
//! offset, or when the child is a scope still open at end of input and the
//! offset is its end. The last rule keeps a caret typed right after an
//! unterminated `{` inside that block.

use text_size::{TextRange, TextSize};

use super::Node;

/// Which nodes [`Node::surroundings`] reports when several nodes of the
/// sequence start at the same offset.
///
/// A scope starts where its first child does, so `a: 1;` has a run of
/// `Label` and `Name` at offset 0. "Near" picks the first node of such a run
/// (the outermost scope), "far" the last (the terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Nearest token on the left, farthest on the right.
    NearLeftFarRight,
    /// Nearest on both sides.
    NearLeftNearRight,
    /// Farthest on the left, nearest on the right.
    FarLeftNearRight,
    /// Farthest on both sides.
    FarLeftFarRight,
}

/// The tokens touching an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surroundings<'a> {
    /// The node ending at or containing the offset.
    pub left: Option<Node<'a>>,
    /// The node starting at or containing the offset.
    pub right: Option<Node<'a>>,
}

fn covers(child: Node<'_>, offset: TextSize) -> bool {
    let range = child.range();
    if range.start() > offset {
        return false;
    }
    offset < range.end()
        || (range.is_empty() && range.start() == offset)
        || (offset == range.end() && child.is_unclosed_scope())
}

/// Iterator over the nested nodes covering an offset, outermost first.
#[derive(Debug, Clone)]
pub struct AllAncestors<'a> {
    current: Option<Node<'a>>,
    offset: TextSize,
}

impl<'a> Iterator for AllAncestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let node = self.current?.oldest_ancestor(self.offset);
        self.current = node;
        node
    }
}

impl<'a> Node<'a> {
    /// Finds the direct child covering `offset`, or where such a child would
    /// be inserted.
    fn search_children(self, offset: TextSize) -> (usize, bool) {
        let children = self.child_ids();
        let tree = self.tree;
        let index = children.partition_point(|&id| {
            let child = tree.node(id);
            !covers(child, offset) && child.begin() < offset
        });
        let found = children
            .get(index)
            .is_some_and(|&id| covers(tree.node(id), offset));
        (index, found)
    }

    /// The direct child covering `offset`.
    #[must_use]
    pub fn oldest_ancestor(self, offset: TextSize) -> Option<Node<'a>> {
        match self.search_children(offset) {
            (index, true) => self.child(index),
            (_, false) => None,
        }
    }

    /// The chain of nested nodes covering `offset`, from the direct child of
    /// this node down to the innermost one (usually a terminal).
    #[must_use]
    pub fn all_ancestors(self, offset: TextSize) -> AllAncestors<'a> {
        AllAncestors {
            current: Some(self),
            offset,
        }
    }

    /// The innermost node covering `offset`.
    #[must_use]
    pub fn youngest_ancestor(self, offset: TextSize) -> Option<Node<'a>> {
        self.all_ancestors(offset).last()
    }

    /// Nodes covering `range.start()` whose span reaches `range.end()`,
    /// outermost first.
    pub fn ancestors_covering(self, range: TextRange) -> impl Iterator<Item = Node<'a>> {
        self.all_ancestors(range.start())
            .take_while(move |node| node.end() >= range.end())
    }

    /// The outermost node containing `range`.
    #[must_use]
    pub fn oldest_ancestor_covering(self, range: TextRange) -> Option<Node<'a>> {
        self.ancestors_covering(range).next()
    }

    /// The innermost node containing `range`.
    #[must_use]
    pub fn youngest_ancestor_covering(self, range: TextRange) -> Option<Node<'a>> {
        self.ancestors_covering(range).last()
    }

    /// The final terminal below this node; the node itself for terminals.
    #[must_use]
    pub fn very_last(self) -> Option<Node<'a>> {
        let mut node = self;
        while !node.is_terminal() {
            node = node.last_child()?;
        }
        Some(node)
    }

    /// Walks back over the sequence while nodes start at the same offset as
    /// this one.
    #[must_use]
    pub fn first_at_same_position(self) -> Node<'a> {
        let begin = self.begin();
        let mut node = self;
        while let Some(prev) = node.prev_symbol().filter(|prev| prev.begin() == begin) {
            node = prev;
        }
        node
    }

    /// Walks forward over the sequence while nodes start at the same offset
    /// as this one.
    #[must_use]
    pub fn last_at_same_position(self) -> Node<'a> {
        let begin = self.begin();
        let mut node = self;
        while let Some(next) = node.next_symbol().filter(|next| next.begin() == begin) {
            node = next;
        }
        node
    }

    /// The token containing `offset`, or else the first token after it.
    ///
    /// At the very end of the document this is the `EOF` terminal.
    #[must_use]
    pub fn after_position(self, offset: TextSize) -> Option<Node<'a>> {
        if self.child_count() == 0 {
            return None;
        }
        if self.is_root() && self.end() == offset {
            if let Some(last) = self.very_last().filter(|last| last.is_eof()) {
                return Some(last);
            }
        }

        let mut found = None;
        let mut current = self;
        while current.child_count() > 0 {
            let (index, _) = current.search_children(offset);
            let Some(child) = current.child(index) else {
                break;
            };
            found = Some(child);
            current = child;
        }

        // Stopped on a scope that is still open at `offset`: continue with the
        // token following its contents.
        let found = found?;
        if found.is_terminal() {
            Some(found)
        } else {
            let last = found.very_last()?;
            Some(last.next_token().unwrap_or(last))
        }
    }

    /// The last node of the run starting where [`Node::after_position`]
    /// lands; a terminal.
    #[must_use]
    pub fn far_right(self, offset: TextSize) -> Option<Node<'a>> {
        self.after_position(offset).map(Node::last_at_same_position)
    }

    /// The first node of the run starting where [`Node::after_position`]
    /// lands. This is the outermost scope opening there, if any.
    #[must_use]
    pub fn near_right(self, offset: TextSize) -> Option<Node<'a>> {
        self.after_position(offset).map(Node::first_at_same_position)
    }

    /// The node before `offset` in [`Strategy::NearLeftNearRight`] terms.
    #[must_use]
    pub fn near_left(self, offset: TextSize) -> Option<Node<'a>> {
        self.surroundings(offset, Strategy::NearLeftNearRight).left
    }

    /// The node before `offset` in [`Strategy::FarLeftFarRight`] terms.
    #[must_use]
    pub fn far_left(self, offset: TextSize) -> Option<Node<'a>> {
        self.surroundings(offset, Strategy::FarLeftFarRight).left
    }

    /// The nodes on both sides of `offset`.
    ///
    /// If the right node strictly contains the offset it is reported on both
    /// sides.
    /// Past the last token, `left` is the document's final terminal and
    /// `right` is `None`.
    #[must_use]
    pub fn surroundings(self, offset: TextSize, strategy: Strategy) -> Surroundings<'a> {
        let right = match strategy {
            Strategy::NearLeftFarRight | Strategy::FarLeftFarRight => self.far_right(offset),
            Strategy::NearLeftNearRight | Strategy::FarLeftNearRight => self.near_right(offset),
        };
        let Some(right) = right else {
            return Surroundings {
                left: self.very_last(),
                right: None,
            };
        };

        if right.begin() < offset {
            return Surroundings {
                left: Some(right),
                right: Some(right),
            };
        }

        let left = match strategy {
            Strategy::NearLeftFarRight => right.first_at_same_position().prev_symbol(),
            Strategy::NearLeftNearRight => right.prev_symbol(),
            Strategy::FarLeftNearRight => right.prev_symbol().map(Node::first_at_same_position),
            Strategy::FarLeftFarRight => right
                .first_at_same_position()
                .prev_symbol()
                .map(Node::first_at_same_position),
        };
        Surroundings {
            left,
            right: Some(right),
        }
    }
}
