//! Offset to line/column conversion.

use text_size::TextSize;

/// Maps byte offsets to zero-based `(line, column)` pairs and back.
///
/// Line breaks are recognized the way the parser does: `\n`, `\r\n`, and a
/// lone `\r`. Columns count bytes from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes the line starts of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(0);
        for (idx, &byte) in bytes.iter().enumerate() {
            let line_break = match byte {
                b'\n' => true,
                b'\r' => bytes.get(idx + 1) != Some(&b'\n'),
                _ => false,
            };
            if line_break {
                line_starts.push(idx + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Number of lines; an empty text has one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts an offset to a 0-based line and byte column. Offsets past the
    /// end are clamped to the end.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let offset = usize::from(offset).min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        let col = offset.saturating_sub(line_start);
        (
            u32::try_from(line_idx).unwrap_or(u32::MAX),
            u32::try_from(col).unwrap_or(u32::MAX),
        )
    }

    /// Converts a 0-based line and byte column back to an offset. Returns
    /// `None` if the line does not exist or the column runs past the start of
    /// the next line.
    #[must_use]
    pub fn offset(&self, line: u32, column: u32) -> Option<TextSize> {
        let line = usize::try_from(line).ok()?;
        let start = *self.line_starts.get(line)?;
        let limit = self.line_starts.get(line + 1).copied().unwrap_or(self.len);
        let offset = start.checked_add(usize::try_from(column).ok()?)?;
        if offset > limit {
            return None;
        }
        u32::try_from(offset).ok().map(TextSize::from)
    }
}

#[cfg(test)]
mod tests {
    use super::LineIndex;
    use text_size::TextSize;

    #[test]
    fn mixed_line_breaks() {
        let index = LineIndex::new("ab\ncd\r\nef\rgh");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(TextSize::from(0)), (0, 0));
        assert_eq!(index.line_col(TextSize::from(4)), (1, 1));
        assert_eq!(index.line_col(TextSize::from(7)), (2, 0));
        assert_eq!(index.line_col(TextSize::from(11)), (3, 1));
        assert_eq!(index.line_col(TextSize::from(99)), (3, 2));
    }

    #[test]
    fn offset_round_trips() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(1, 1), Some(TextSize::from(4)));
        assert_eq!(index.offset(1, 2), Some(TextSize::from(5)));
        assert_eq!(index.offset(1, 3), None);
        assert_eq!(index.offset(2, 0), None);
    }
}
