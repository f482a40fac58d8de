//! `mpl-ide` - editor features for MPL.
//!
//! This crate builds on the concrete syntax tree from `mpl-syntax`:
//!
//! - **Documents**: Versioned buffers with a lazy re-parse cache
//! - **Symbols**: Label listings and completion candidates
//! - **Go to Definition**: Resolve a name to the label declaring it
//! - **Text Structure**: Word extents and expanding selections
//!
//! # Architecture
//!
//! Apart from [`Document`], every feature is a pure function over a
//! [`mpl_syntax::Parse`] and an offset or range.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod goto_def;
pub mod symbols;
pub mod text_structure;

pub use document::{Buffer, CacheState, Document, EditError, ParseCache, TextSource};
pub use goto_def::{
    find_definitions, goto_definition, goto_definition_in_files, name_at, Definition,
    DefinitionResult, FileId,
};
pub use symbols::{completion_names, extract_name, label_symbols, labels, LabelSymbol};
pub use text_structure::{enclosing_span, word_extent};
