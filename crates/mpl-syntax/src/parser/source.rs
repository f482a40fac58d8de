//! Character source for the parser.
//!
//! `Source` owns the cursor over the input text together with the line
//! bookkeeping. Every consumed character goes through [`Source::bump`], so the
//! reported line and column stay correct regardless of which grammar rule
//! consumed a line break.

use text_size::TextSize;

use crate::parser::event::Position;

pub(crate) struct Source<'src> {
    text: &'src str,
    offset: usize,
    line: u32,
    line_start: usize,
}

impl<'src> Source<'src> {
    pub(crate) fn new(text: &'src str) -> Self {
        Self {
            text,
            offset: 0,
            line: 0,
            line_start: 0,
        }
    }

    fn rest(&self) -> &'src str {
        &self.text[self.offset..]
    }

    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Looks `n` characters past the current one.
    pub(crate) fn nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(crate) fn at(&self, c: char) -> bool {
        self.current() == Some(c)
    }

    pub(crate) fn at_any(&self, set: &str) -> bool {
        self.current().is_some_and(|c| set.contains(c))
    }

    pub(crate) fn at_str(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub(crate) fn offset(&self) -> TextSize {
        to_text_size(self.offset)
    }

    pub(crate) fn len(&self) -> TextSize {
        to_text_size(self.text.len())
    }

    pub(crate) fn position(&self) -> Position {
        Position {
            offset: self.offset(),
            line: self.line,
            column: u32::try_from(self.offset - self.line_start).unwrap_or(u32::MAX),
        }
    }

    /// Consumes one character, starting a new line after `\n` or a lone `\r`.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.offset += c.len_utf8();
        let line_break = match c {
            '\n' => true,
            '\r' => !self.at('\n'),
            _ => false,
        };
        if line_break {
            self.line += 1;
            self.line_start = self.offset;
        }
        Some(c)
    }

    pub(crate) fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    pub(crate) fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.current().is_some_and(&mut pred) {
            self.bump();
        }
    }
}

pub(crate) fn to_text_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::Source;

    #[test]
    fn tracks_lines_across_breaks() {
        let mut source = Source::new("a\nb\r\nc\rd");
        source.bump_n(2);
        assert_eq!(source.position().line, 1);
        assert_eq!(source.position().column, 0);
        // `\r` of a CRLF pair does not start the line on its own
        source.bump_n(2);
        assert_eq!(source.position().line, 1);
        source.bump();
        assert_eq!(source.position().line, 2);
        source.bump_n(2);
        let pos = source.position();
        assert_eq!((pos.line, pos.column, u32::from(pos.offset)), (3, 0, 7));
        source.bump();
        assert!(source.at_end());
        assert_eq!(source.bump(), None);
    }

    #[test]
    fn columns_are_bytes() {
        let mut source = Source::new("«x");
        source.bump();
        assert_eq!(source.position().column, 2);
        assert_eq!(source.nth(0), Some('x'));
        assert_eq!(source.nth(1), None);
    }
}
