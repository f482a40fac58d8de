//! Objects, lists, code blocks and labels.
//!
//! All four share one shape: an opening terminal, a nested program, and a
//! closing terminal that may be missing. Nesting is bounded by
//! `ParseOptions::max_nesting_depth`; a region past the bound is kept as one
//! error terminal instead of being parsed.

use text_size::TextRange;

use crate::parser::event::Position;
use crate::parser::parser::{is_whitespace, Parser};
use crate::syntax::SyntaxKind;

impl Parser<'_, '_> {
    /// Parses `{...}`, `(...)` or `[...]` depending on `kind`.
    pub(crate) fn parse_bracketed(&mut self, kind: SyntaxKind) {
        let (open, close, closer) = match kind {
            SyntaxKind::Object => (SyntaxKind::LCurly, SyntaxKind::RCurly, '}'),
            SyntaxKind::List => (SyntaxKind::LParen, SyntaxKind::RParen, ')'),
            _ => (SyntaxKind::LBrack, SyntaxKind::RBrack, ']'),
        };
        let start = self.position();
        if self.depth >= self.max_depth {
            self.skip_too_deep(kind, start);
            return;
        }

        let marker = self.start(kind);
        self.token(open, 1);
        self.parse_block_body(kind, start, close, closer);
        marker.complete(self);
    }

    /// Parses a label whose name was already scanned from `start`. The cursor
    /// is on the `:`.
    pub(crate) fn parse_label(&mut self, start: Position) {
        let reset = self.source.at_str(":!");
        let kind = if reset {
            SyntaxKind::LabelReset
        } else {
            SyntaxKind::Label
        };
        if self.depth >= self.max_depth {
            self.skip_too_deep(kind, start);
            return;
        }

        let marker = self.start_at(SyntaxKind::Label, start);
        let name_end = self.offset();
        self.terminal_to(SyntaxKind::Name, start, name_end);
        if reset {
            self.token(SyntaxKind::ColonBang, 2);
        } else {
            self.token(SyntaxKind::Colon, 1);
        }
        self.parse_block_body(kind, start, SyntaxKind::Semicolon, ';');
        marker.complete(self);
    }

    fn parse_block_body(
        &mut self,
        kind: SyntaxKind,
        start: Position,
        close: SyntaxKind,
        closer: char,
    ) {
        self.depth += 1;
        self.parse_program(Some(closer));
        if self.at(closer) {
            self.token(close, 1);
        } else {
            let message = format!("expected {close} to close {kind}");
            self.error_at(TextRange::empty(start.offset), kind, &message);
        }
        self.depth -= 1;
    }

    /// Consumes the balanced region opened at the cursor without descending
    /// into it, and emits it as a single error terminal.
    ///
    /// Comments, strings and raw strings are skipped whole, so delimiters
    /// inside them do not count. A string only starts where an expression
    /// could start: after whitespace, an opening delimiter or a label colon.
    fn skip_too_deep(&mut self, kind: SyntaxKind, start: Position) {
        let (open, close) = match kind {
            SyntaxKind::Object => ('{', '}'),
            SyntaxKind::List => ('(', ')'),
            SyntaxKind::Code => ('[', ']'),
            _ => (':', ';'),
        };

        let mut level = 0_u32;
        let mut separated = true;
        while let Some(c) = self.current() {
            match c {
                '#' => self.skip_comment(),
                '"' if separated => self.skip_string(),
                '«' if separated => self.skip_raw_string(),
                _ => {
                    self.source.bump();
                    if c == ':' && self.at('!') {
                        self.source.bump();
                    }
                    if c == open {
                        level += 1;
                    } else if c == close {
                        level = level.saturating_sub(1);
                        if level == 0 {
                            break;
                        }
                    }
                }
            }
            separated = is_whitespace(c) || "{([:".contains(c);
        }

        let message = format!("nesting depth limit of {} exceeded", self.max_depth);
        self.error_from(start.offset, kind, &message);
        self.terminal_from(SyntaxKind::SomeError, start);
    }
}
