//! Subcommand implementations.

pub mod check;
pub mod definition;
pub mod symbols;
pub mod tree;

use mpl_syntax::LineIndex;
use text_size::TextSize;

/// 1-based line and byte column for display.
pub(crate) fn display_position(index: &LineIndex, offset: TextSize) -> (u32, u32) {
    let (line, column) = index.line_col(offset);
    (line + 1, column + 1)
}
