//! `mpl-syntax` - Scanner, parser, and concrete syntax tree for MPL.
//!
//! This crate provides the syntactic layer every MPL tool builds on:
//!
//! - **Parser**: A character-driven recursive descent parser that reports an
//!   event stream (compound start/end, terminal, syntax error)
//! - **Tree builder**: Turns the event stream into an arena-backed tree
//! - **Queries**: Position lookups (ancestors covering an offset, the tokens
//!   surrounding a caret) over the tree
//!
//! # Design Principles
//!
//! - **Total**: Every input parses; malformed text becomes error terminals and
//!   an ordered error list
//! - **Position-complete**: Every node records its byte range plus the line
//!   and column it starts on
//! - **Immutable per version**: A tree never changes after it is built; a new
//!   text version means a new parse
//!
//! # Example
//!
//! ```
//! use mpl_syntax::{parse, SyntaxKind};
//! use text_size::TextSize;
//!
//! let parse = parse("foo: 1 2; (foo)");
//! assert!(parse.ok());
//!
//! let root = parse.root();
//! let label = root.first_child().unwrap();
//! assert_eq!(label.kind(), SyntaxKind::Label);
//! assert_eq!(label.label_name().unwrap().text(), "foo");
//!
//! let name = root.youngest_ancestor(TextSize::from(12)).unwrap();
//! assert_eq!(name.kind(), SyntaxKind::Name);
//! assert_eq!(name.text(), "foo");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod parser;
pub mod syntax;
pub mod tree;

pub use parser::{
    parse, parse_events, parse_with, Event, EventSink, Parse, ParseOptions, Position, SyntaxError,
    TreeBuilder,
};
pub use syntax::SyntaxKind;
pub use tree::{dump, LineIndex, Node, NodeId, Strategy, Surroundings, SyntaxTree};
