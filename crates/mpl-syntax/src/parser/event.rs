//! Parser events.
//!
//! The parser reports its progress to an [`EventSink`] as a flat stream of
//! compound starts and ends, terminals and syntax errors. The tree builder is
//! one such sink; a `Vec<Event>` records the stream verbatim for any other
//! consumer.

use text_size::TextSize;

use crate::parser::SyntaxError;
use crate::syntax::SyntaxKind;

/// A location in the source: byte offset plus zero-based line and column.
///
/// The column is the byte distance from the start of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: TextSize,
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based byte column within the line.
    pub column: u32,
}

/// Receives the parser's event stream.
///
/// Events arrive strictly in source order. Every `start_compound` is matched
/// by an `end_compound` of the same kind, and all terminals are emitted
/// between their enclosing compound's start and end.
pub trait EventSink {
    /// Called once before any other event with the text about to be parsed.
    fn reset(&mut self, text: &str);

    /// A grammar production begins at `start`.
    fn start_compound(&mut self, kind: SyntaxKind, start: Position);

    /// The most recently started production of `kind` ends at `end`.
    fn end_compound(&mut self, kind: SyntaxKind, end: TextSize);

    /// A token spanning `[start.offset, end)`.
    fn terminal(&mut self, kind: SyntaxKind, start: Position, end: TextSize);

    /// A recoverable syntax error.
    fn syntax_error(&mut self, error: SyntaxError);

    /// Called once after the final event.
    fn complete(&mut self) {}
}

/// A recorded parser event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Parsing of a text of this length begins.
    Reset {
        /// Length of the input.
        len: TextSize,
    },
    /// A compound starts.
    StartCompound {
        /// The production.
        kind: SyntaxKind,
        /// Where it starts.
        start: Position,
    },
    /// A compound ends.
    EndCompound {
        /// The production.
        kind: SyntaxKind,
        /// Exclusive end offset.
        end: TextSize,
    },
    /// A terminal.
    Terminal {
        /// The token kind.
        kind: SyntaxKind,
        /// Where it starts.
        start: Position,
        /// Exclusive end offset.
        end: TextSize,
    },
    /// A syntax error.
    Error(SyntaxError),
    /// Parsing finished.
    Complete,
}

impl EventSink for Vec<Event> {
    fn reset(&mut self, text: &str) {
        self.clear();
        self.push(Event::Reset {
            len: TextSize::of(text),
        });
    }

    fn start_compound(&mut self, kind: SyntaxKind, start: Position) {
        self.push(Event::StartCompound { kind, start });
    }

    fn end_compound(&mut self, kind: SyntaxKind, end: TextSize) {
        self.push(Event::EndCompound { kind, end });
    }

    fn terminal(&mut self, kind: SyntaxKind, start: Position, end: TextSize) {
        self.push(Event::Terminal { kind, start, end });
    }

    fn syntax_error(&mut self, error: SyntaxError) {
        self.push(Event::Error(error));
    }

    fn complete(&mut self) {
        self.push(Event::Complete);
    }
}
