//! Grammar rules for MPL.
//!
//! - `mod.rs` - programs and expression dispatch
//! - `blocks.rs` - objects, lists, code blocks and labels
//! - `names.rs` - names, prefixed names and member names
//! - `literals.rs` - strings, numbers and comments
//!
//! Every rule consumes at least one character, so the program loop always
//! makes progress.

mod blocks;
mod literals;
mod names;

use crate::syntax::SyntaxKind;

use super::parser::{is_mpl_letter, is_whitespace, Parser};

/// Characters that start an expression which needs no whitespace before it.
const NON_WS_SEPARABLE_START: &str = "#(.[{,";

impl Parser<'_, '_> {
    /// Parses expressions until end of input or until `closer` is reached.
    /// The closer itself is left for the caller.
    pub(crate) fn parse_program(&mut self, closer: Option<char>) {
        let marker = self.start(SyntaxKind::Program);
        self.eat_whitespace();

        if !self.at_closer(closer) {
            self.parse_expression();
            while !self.at_closer(closer) {
                if self.at_whitespace() {
                    self.eat_whitespace();
                    if !self.at_closer(closer) {
                        self.parse_expression();
                    }
                } else {
                    self.parse_non_ws_separable_expression();
                }
            }
        }

        marker.complete(self);
    }

    fn at_closer(&self, closer: Option<char>) -> bool {
        self.at_end() || closer.is_some_and(|c| self.at(c))
    }

    fn parse_expression(&mut self) {
        let marker = self.start(SyntaxKind::Expression);
        if self.source.at_any(NON_WS_SEPARABLE_START) {
            self.parse_non_ws_separable_expression();
        } else {
            self.parse_ws_separable_expression();
        }
        marker.complete(self);
    }

    fn parse_ws_separable_expression(&mut self) {
        let marker = self.start(SyntaxKind::WSSeparableExpression);
        let next_is_digit = self.source.nth(1).is_some_and(|c| c.is_ascii_digit());
        match self.current() {
            Some('"') => self.parse_string(),
            Some('«') => self.parse_raw_string(),
            Some('+' | '-') if next_is_digit => self.parse_number(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('!' | '@') if self.source.nth(1) == Some(':') => self.parse_label_or_name(),
            Some('!' | '@') => self.parse_name_expression(),
            Some('+' | '-') => self.parse_label_or_name(),
            Some(c) if is_mpl_letter(c) => self.parse_label_or_name(),
            _ => {
                // Skip to the next whitespace so one bad word costs one error.
                let start = self.position();
                self.source.bump_while(|c| !is_whitespace(c));
                self.error_from(
                    start.offset,
                    SyntaxKind::WSSeparableExpression,
                    "expected a name, number, string or label",
                );
                self.terminal_from(SyntaxKind::SomeError, start);
            }
        }
        marker.complete(self);
    }

    fn parse_non_ws_separable_expression(&mut self) {
        let marker = self.start(SyntaxKind::NonWSSeparableExpression);
        match self.current() {
            Some('{') => self.parse_bracketed(SyntaxKind::Object),
            Some('(') => self.parse_bracketed(SyntaxKind::List),
            Some('[') => self.parse_bracketed(SyntaxKind::Code),
            Some('.') => self.parse_member_name_expression(),
            Some('#') => self.parse_comment(),
            Some(',') => self.token(SyntaxKind::Comma, 1),
            _ => {
                let start = self.position();
                self.source.bump();
                self.error_from(
                    start.offset,
                    SyntaxKind::NonWSSeparableExpression,
                    "expected whitespace or a bracket, '.', '#' or ','",
                );
                self.terminal_from(SyntaxKind::SomeError, start);
            }
        }
        marker.complete(self);
    }
}
