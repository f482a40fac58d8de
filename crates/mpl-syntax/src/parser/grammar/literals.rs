//! Strings, numbers and comments.
//!
//! A malformed number is reported once and the text scanned for it is kept as
//! a `SomeError` terminal. Broken strings are still `String` terminals.

use text_size::{TextRange, TextSize};

use crate::parser::parser::{is_mpl_letter, Parser};
use crate::syntax::SyntaxKind;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

impl Parser<'_, '_> {
    // =========================================================================
    // Strings
    // =========================================================================

    /// `"..."` with backslash escapes. Line breaks are allowed inside.
    pub(crate) fn parse_string(&mut self) {
        let start = self.position();
        self.source.bump();

        let mut closed = false;
        while let Some(c) = self.current() {
            match c {
                '"' => {
                    self.source.bump();
                    closed = true;
                    break;
                }
                '\\' => {
                    let escape = self.offset();
                    self.source.bump();
                    self.parse_escape(escape);
                }
                '\n' | '\r' => self.eat_line_break_in_literal(),
                _ => {
                    self.source.bump();
                }
            }
        }

        if !closed {
            self.error_at(
                TextRange::empty(start.offset),
                SyntaxKind::String,
                "unterminated string",
            );
        }
        self.terminal_from(SyntaxKind::String, start);
    }

    fn parse_escape(&mut self, escape: TextSize) {
        match self.current() {
            // reported as an unterminated string
            None => {}
            Some('\n' | '\r') => {
                let range = TextRange::at(escape, TextSize::from(1));
                self.error_at(range, SyntaxKind::String, "line break after escape character");
            }
            Some('"' | '\\' | 'n' | 'r' | 't' | '0'..='9' | 'A'..='F') => {
                self.source.bump();
            }
            Some(_) => {
                self.source.bump();
                self.error_from(escape, SyntaxKind::String, "unknown escape sequence");
            }
        }
    }

    /// `«...»`; nested pairs are part of the string.
    pub(crate) fn parse_raw_string(&mut self) {
        let start = self.position();
        self.source.bump();

        let mut level = 1_u32;
        while let Some(c) = self.current() {
            match c {
                '«' => {
                    level += 1;
                    self.source.bump();
                }
                '»' => {
                    self.source.bump();
                    level -= 1;
                    if level == 0 {
                        break;
                    }
                }
                '\n' | '\r' => self.eat_line_break_in_literal(),
                _ => {
                    self.source.bump();
                }
            }
        }

        if level != 0 {
            self.error_at(
                TextRange::empty(start.offset),
                SyntaxKind::String,
                "unterminated raw string",
            );
        }
        self.terminal_from(SyntaxKind::String, start);
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    // These follow the termination rules of the parsers above but only move
    // the cursor. Problems inside are not reported.

    /// Moves past a string, including its closing `"` if present.
    pub(crate) fn skip_string(&mut self) {
        self.source.bump();
        while let Some(c) = self.source.bump() {
            match c {
                '"' => break,
                '\\' => {
                    self.source.bump();
                }
                _ => {}
            }
        }
    }

    /// Moves past a raw string and the strings nested in it.
    pub(crate) fn skip_raw_string(&mut self) {
        self.source.bump();
        let mut level = 1_u32;
        while let Some(c) = self.source.bump() {
            match c {
                '«' => level += 1,
                '»' => {
                    level -= 1;
                    if level == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    /// Moves to the line break ending a comment.
    pub(crate) fn skip_comment(&mut self) {
        self.source.bump_while(|c| c != '\n' && c != '\r');
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    pub(crate) fn parse_number(&mut self) {
        let start = self.position();
        let kind = self.scan_number(start.offset);
        self.terminal_from(kind, start);
    }

    fn scan_number(&mut self, start: TextSize) -> SyntaxKind {
        let mut signed = false;
        if self.source.at_str("0x") {
            self.source.bump_n(2);
            if !self.current().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.error_from(
                    start,
                    SyntaxKind::Number,
                    "expected hexadecimal digits after '0x'",
                );
                return SyntaxKind::SomeError;
            }
            self.source.bump_while(|c| c.is_ascii_hexdigit());
        } else {
            if self.source.at_any("+-") {
                signed = true;
                self.source.bump();
            }
            if self.at('0') {
                self.source.bump();
            } else {
                self.source.bump_while(is_digit);
            }
        }

        if self.source.at_any(".Ee") {
            self.scan_real_tail(start)
        } else if self.source.at_any("in") {
            self.scan_integer_suffix(start, signed)
        } else {
            SyntaxKind::Number
        }
    }

    fn scan_integer_suffix(&mut self, start: TextSize, signed: bool) -> SyntaxKind {
        let unsigned = self.at('n');
        self.source.bump();

        if self.source.at_any("8x") {
            self.source.bump();
        } else if ["16", "32", "64"].iter().any(|w| self.source.at_str(w)) {
            self.source.bump_n(2);
        } else {
            self.error_from(
                start,
                SyntaxKind::Number,
                "expected 8, x, 16, 32 or 64 after the integer suffix",
            );
            return SyntaxKind::SomeError;
        }

        if signed && unsigned {
            self.error_from(start, SyntaxKind::Number, "unsigned numbers cannot have a sign");
            return SyntaxKind::SomeError;
        }
        SyntaxKind::Number
    }

    fn scan_real_tail(&mut self, start: TextSize) -> SyntaxKind {
        if self.at('.') {
            self.source.bump();
            if self.current().is_some_and(is_digit) {
                self.source.bump_while(is_digit);
            } else {
                // `0.name` is not a member access on a number
                if self.current().is_some_and(is_mpl_letter) {
                    self.source.bump_while(|c| {
                        is_mpl_letter(c) || c.is_ascii_digit() || "!+-.@".contains(c)
                    });
                }
                self.error_from(start, SyntaxKind::Real, "expected a digit after '.'");
                return SyntaxKind::SomeError;
            }
        }

        if self.source.at_any("Ee") {
            self.source.bump();
            if self.source.at_any("+-") {
                self.source.bump();
            }
            if self.at('0') {
                self.source.bump();
            } else if self.current().is_some_and(is_digit) {
                self.source.bump_while(is_digit);
            } else {
                self.error_from(start, SyntaxKind::Real, "expected a digit in the exponent");
                return SyntaxKind::SomeError;
            }
        }

        if self.at('r') {
            self.source.bump();
            if self.source.at_str("32") || self.source.at_str("64") {
                self.source.bump_n(2);
            } else {
                self.error_from(start, SyntaxKind::Real, "expected 32 or 64 after 'r'");
                return SyntaxKind::SomeError;
            }
        }

        SyntaxKind::Real
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// `#` up to the line break. Trailing spaces and tabs are not part of the
    /// terminal.
    pub(crate) fn parse_comment(&mut self) {
        let start = self.position();
        self.source.bump();
        let mut end = self.offset();
        while let Some(c) = self.current() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.source.bump();
            if c != ' ' && c != '\t' {
                end = self.offset();
            }
        }
        self.terminal_to(SyntaxKind::Comment, start, end);
    }
}
