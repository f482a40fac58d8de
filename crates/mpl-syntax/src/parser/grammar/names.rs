//! Names, prefixed names and member names.

use crate::parser::parser::{is_mpl_letter, Parser};
use crate::syntax::SyntaxKind;

fn is_name_continue(c: char) -> bool {
    is_mpl_letter(c) || c.is_ascii_digit() || c == '+' || c == '-'
}

impl Parser<'_, '_> {
    /// A name that becomes a label if a `:` follows it.
    pub(crate) fn parse_label_or_name(&mut self) {
        let start = self.position();
        self.parse_name();
        if self.at(':') {
            self.parse_label(start);
        } else {
            let marker = self.start_at(SyntaxKind::NameExpression, start);
            self.terminal_from(SyntaxKind::Name, start);
            marker.complete(self);
        }
    }

    /// `@name` or `!name`. A sigil with nothing name-like after it is a bare
    /// `Name`.
    pub(crate) fn parse_name_expression(&mut self) {
        let marker = self.start(SyntaxKind::NameExpression);
        let start = self.position();
        let kind = if self.at('@') {
            SyntaxKind::NameRead
        } else {
            SyntaxKind::NameWrite
        };
        self.source.bump();

        let named = self
            .current()
            .is_some_and(|c| "!+-.@".contains(c) || is_mpl_letter(c));
        if named {
            self.parse_name();
            self.terminal_from(kind, start);
        } else {
            self.terminal_from(SyntaxKind::Name, start);
        }
        marker.complete(self);
    }

    /// `.name`, `.@name` or `.!name`.
    pub(crate) fn parse_member_name_expression(&mut self) {
        let marker = self.start(SyntaxKind::MemberNameExpression);
        let start = self.position();
        self.source.bump();

        let kind = match self.current() {
            Some('@') => {
                self.source.bump();
                SyntaxKind::NameReadMember
            }
            Some('!') => {
                self.source.bump();
                SyntaxKind::NameWriteMember
            }
            _ => SyntaxKind::NameMember,
        };
        self.parse_member_name();
        self.terminal_from(kind, start);
        marker.complete(self);
    }

    /// The text of a name: a lone sigil, a run of dots, or a member name.
    fn parse_name(&mut self) {
        match self.current() {
            Some('@' | '!') => {
                self.source.bump();
            }
            Some('.') => self.source.bump_while(|c| c == '.'),
            _ => self.parse_member_name(),
        }
    }

    fn parse_member_name(&mut self) {
        match self.current() {
            Some('+' | '-') => {
                self.source.bump();
                if self.current().is_some_and(|c| is_mpl_letter(c) || c == '+' || c == '-') {
                    self.source.bump();
                    self.source.bump_while(is_name_continue);
                }
            }
            Some(c) if is_mpl_letter(c) => {
                self.source.bump();
                self.source.bump_while(is_name_continue);
            }
            _ => self.error_here(SyntaxKind::Name, "expected a member name"),
        }
    }
}
