//! Main parser implementation.

use drop_bomb::DropBomb;
use text_size::{TextRange, TextSize};

use crate::parser::event::{EventSink, Position};
use crate::parser::source::Source;
use crate::parser::{ParseOptions, SyntaxError};
use crate::syntax::SyntaxKind;

/// The parser state.
pub(crate) struct Parser<'src, 'sink> {
    pub(crate) source: Source<'src>,
    text: &'src str,
    sink: &'sink mut dyn EventSink,
    pub(crate) depth: u32,
    pub(crate) max_depth: u32,
}

/// An open compound. Completing it emits the matching `end_compound`.
pub(crate) struct Marker {
    kind: SyntaxKind,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(mut self, parser: &mut Parser<'_, '_>) {
        self.bomb.defuse();
        let end = parser.source.offset();
        parser.sink.end_compound(self.kind, end);
    }
}

impl<'src, 'sink> Parser<'src, 'sink> {
    pub(crate) fn new(
        text: &'src str,
        options: &ParseOptions,
        sink: &'sink mut dyn EventSink,
    ) -> Self {
        Self {
            source: Source::new(text),
            text,
            sink,
            depth: 0,
            max_depth: options.nesting_limit(),
        }
    }

    pub(crate) fn parse(mut self) {
        self.sink.reset(self.text);
        self.parse_program(None);

        // The loop in `parse_program` only stops early at a closing character,
        // and the top level has none.
        debug_assert!(self.source.at_end());

        let end = self.source.position();
        self.sink.terminal(SyntaxKind::EOF, end, end.offset);
        self.sink.complete();
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> Option<char> {
        self.source.current()
    }

    pub(crate) fn at(&self, c: char) -> bool {
        self.source.at(c)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn position(&self) -> Position {
        self.source.position()
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.source.offset()
    }

    pub(crate) fn start(&mut self, kind: SyntaxKind) -> Marker {
        let start = self.position();
        self.start_at(kind, start)
    }

    /// Opens a compound at an earlier position, for productions recognized
    /// only after some of their text was scanned.
    pub(crate) fn start_at(&mut self, kind: SyntaxKind, start: Position) -> Marker {
        self.sink.start_compound(kind, start);
        Marker {
            kind,
            bomb: DropBomb::new("uncompleted compound"),
        }
    }

    /// Consumes `chars` characters as a single terminal.
    pub(crate) fn token(&mut self, kind: SyntaxKind, chars: usize) {
        let start = self.position();
        self.source.bump_n(chars);
        self.terminal_from(kind, start);
    }

    /// Emits a terminal spanning from `start` to the cursor.
    pub(crate) fn terminal_from(&mut self, kind: SyntaxKind, start: Position) {
        let end = self.offset();
        self.sink.terminal(kind, start, end);
    }

    pub(crate) fn terminal_to(&mut self, kind: SyntaxKind, start: Position, end: TextSize) {
        self.sink.terminal(kind, start, end);
    }

    pub(crate) fn error_at(&mut self, range: TextRange, token: SyntaxKind, message: &str) {
        self.sink
            .syntax_error(SyntaxError::new(range, token, message));
    }

    /// Reports an error covering the text from `start` to the cursor.
    pub(crate) fn error_from(&mut self, start: TextSize, token: SyntaxKind, message: &str) {
        let range = TextRange::new(start, self.offset());
        self.error_at(range, token, message);
    }

    /// Reports an empty-range error at the cursor.
    pub(crate) fn error_here(&mut self, token: SyntaxKind, message: &str) {
        let range = TextRange::empty(self.offset());
        self.error_at(range, token, message);
    }

    // =========================================================================
    // Whitespace and line breaks
    // =========================================================================

    pub(crate) fn at_whitespace(&self) -> bool {
        self.current().is_some_and(is_whitespace)
    }

    /// Consumes a run of whitespace, emitting line breaks as terminals.
    pub(crate) fn eat_whitespace(&mut self) {
        loop {
            match self.current() {
                Some(' ' | '\t') => {
                    self.source.bump();
                }
                Some('\n') => self.token(SyntaxKind::LF, 1),
                Some('\r') if self.source.nth(1) == Some('\n') => {
                    self.token(SyntaxKind::CRLF, 2);
                }
                Some('\r') => {
                    self.orphan_cr();
                    self.token(SyntaxKind::CR, 1);
                }
                _ => break,
            }
        }
    }

    /// Consumes a line break that is part of a literal. A lone `\r` is still
    /// reported.
    pub(crate) fn eat_line_break_in_literal(&mut self) {
        if self.at('\r') && self.source.nth(1) != Some('\n') {
            self.orphan_cr();
        }
        self.source.bump();
    }

    fn orphan_cr(&mut self) {
        let start = self.offset();
        let range = TextRange::at(start, TextSize::from(1));
        self.error_at(
            range,
            SyntaxKind::CR,
            "carriage return is not followed by a line feed",
        );
    }
}

/// Whitespace separating expressions.
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters that may start or continue a name.
pub(crate) fn is_mpl_letter(c: char) -> bool {
    !c.is_ascii_digit() && !"\t\n\r !\"#()+-.:;@[]{}".contains(c)
}
