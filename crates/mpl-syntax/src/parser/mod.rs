//! Parser for MPL.
//!
//! This module provides a hand-written, character-driven recursive descent
//! parser. It does not tokenize up front: the grammar reads characters
//! directly, which lets number and escape errors be reported with the exact
//! text they concern.
//!
//! # Architecture
//!
//! 1. **Scanning and parsing**: the grammar walks the text once and reports a
//!    stream of events (compound start/end, terminal, syntax error) to an
//!    [`EventSink`].
//! 2. **Tree building**: [`TreeBuilder`] turns the events into an arena
//!    [`SyntaxTree`](crate::tree::SyntaxTree), keeping only the structural
//!    compounds as interior nodes.
//!
//! The parser is total: every input, however malformed, produces a tree and a
//! list of errors.

#![allow(clippy::module_inception)]

pub mod event;
mod grammar;
mod parser;
mod sink;
mod source;

pub use event::{Event, EventSink, Position};
pub use sink::{BuildError, TreeBuilder};

use text_size::TextRange;

use crate::syntax::SyntaxKind;
use crate::tree::{Node, SyntaxTree};

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested blocks and labels. Deeper regions are
    /// reported once and kept as a single error terminal.
    ///
    /// Values above [`ParseOptions::MAX_SUPPORTED_NESTING_DEPTH`] are treated
    /// as that maximum.
    pub max_nesting_depth: u32,
}

impl ParseOptions {
    /// Nesting depth used when nothing else is configured.
    pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 256;

    /// Largest nesting depth the parser honors. Blocks are parsed
    /// recursively, and this bound keeps a parse within a 2 MiB thread stack.
    pub const MAX_SUPPORTED_NESTING_DEPTH: u32 = 512;

    /// The nesting depth a parse with these options actually enforces.
    #[must_use]
    pub fn nesting_limit(self) -> u32 {
        self.max_nesting_depth.min(Self::MAX_SUPPORTED_NESTING_DEPTH)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Parses source text into a syntax tree using default options.
#[must_use]
pub fn parse(text: &str) -> Parse {
    parse_with(text, &ParseOptions::default())
}

/// Parses source text into a syntax tree.
///
/// # Panics
///
/// Panics if the grammar emits an unbalanced event stream, which is a bug in
/// this crate rather than a property of the input.
#[must_use]
pub fn parse_with(text: &str, options: &ParseOptions) -> Parse {
    let mut builder = TreeBuilder::new();
    parse_events(text, options, &mut builder);
    match builder.finish() {
        Ok(parse) => parse,
        Err(err) => panic!("parser produced an invalid event stream: {err}"),
    }
}

/// Runs the grammar over `text`, reporting every event to `sink`.
pub fn parse_events<S: EventSink>(text: &str, options: &ParseOptions, sink: &mut S) {
    parser::Parser::new(text, options, sink).parse();
}

/// Result of parsing source text.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<SyntaxError>,
}

impl Parse {
    pub(crate) fn new(tree: SyntaxTree, errors: Vec<SyntaxError>) -> Self {
        Self { tree, errors }
    }

    /// Returns the root `Program` node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root()
    }

    /// Returns the underlying tree.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Returns the parsed source text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.tree.text()
    }

    /// Returns the syntax errors in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Returns `true` if parsing produced no errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A recoverable syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The byte range the error concerns. Empty for unterminated constructs,
    /// in which case it sits at the construct's start.
    pub range: TextRange,
    /// The production or token being parsed when the error was found.
    pub token: SyntaxKind,
    /// Human-readable description.
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(range: TextRange, token: SyntaxKind, message: impl Into<String>) -> Self {
        Self {
            range,
            token,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in {} at {}..{}",
            self.message,
            self.token,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

impl std::error::Error for SyntaxError {}
