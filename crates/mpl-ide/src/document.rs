//! Versioned text buffers and the re-parse cache.
//!
//! A [`ParseCache`] remembers the version of the text it last parsed. Asking
//! for the tree of a newer version re-parses the whole text synchronously and
//! drops the old tree. Until then the old tree stays readable through
//! [`ParseCache::cached`], which is what an editor wants while the user is
//! still typing.

use text_size::{TextRange, TextSize};
use tracing::debug;

use mpl_syntax::{parse_with, Node, Parse, ParseOptions, SyntaxError};

/// Text with a modification counter.
pub trait TextSource {
    /// Changes whenever the text changes.
    fn version(&self) -> u64;

    /// The current text.
    fn text(&self) -> &str;
}

/// Why an edit was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The range reaches past the end of the text.
    #[error("edit range {range:?} is outside of text of length {len:?}")]
    OutOfBounds {
        /// The requested range.
        range: TextRange,
        /// Length of the text.
        len: TextSize,
    },
    /// The range splits a multi-byte character.
    #[error("edit range {range:?} does not fall on character boundaries")]
    NotCharBoundary {
        /// The requested range.
        range: TextRange,
    },
}

/// An owned, editable text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    version: u64,
}

impl Buffer {
    /// Creates a buffer at version 0.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            version: 0,
        }
    }

    /// Replaces the whole text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.version += 1;
    }

    /// Replaces `range` with `replacement`.
    ///
    /// # Errors
    ///
    /// Returns an [`EditError`] if the range is out of bounds or splits a
    /// character. The buffer is left untouched in that case.
    pub fn edit(&mut self, range: TextRange, replacement: &str) -> Result<(), EditError> {
        let len = TextSize::of(self.text.as_str());
        if range.end() > len {
            return Err(EditError::OutOfBounds { range, len });
        }
        let (start, end) = (usize::from(range.start()), usize::from(range.end()));
        if !self.text.is_char_boundary(start) || !self.text.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { range });
        }
        self.text.replace_range(start..end, replacement);
        self.version += 1;
        Ok(())
    }
}

impl TextSource for Buffer {
    fn version(&self) -> u64 {
        self.version
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Freshness of a cached tree relative to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing has been parsed yet.
    Empty,
    /// The cached tree matches the current text.
    Fresh,
    /// The text changed since the cached tree was built.
    Stale,
}

/// Lazily re-parses a [`TextSource`] when its version moves.
#[derive(Debug, Clone, Default)]
pub struct ParseCache {
    parse: Option<Parse>,
    version: Option<u64>,
    options: ParseOptions,
}

impl ParseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            parse: None,
            version: None,
            options,
        }
    }

    /// Options used for every re-parse.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Compares the cached version with `source`.
    pub fn state<S: TextSource + ?Sized>(&self, source: &S) -> CacheState {
        match (&self.parse, self.version) {
            (None, _) => CacheState::Empty,
            (Some(_), Some(version)) if version == source.version() => CacheState::Fresh,
            (Some(_), _) => CacheState::Stale,
        }
    }

    /// True unless the cached tree matches `source`.
    pub fn is_outdated<S: TextSource + ?Sized>(&self, source: &S) -> bool {
        self.state(source) != CacheState::Fresh
    }

    /// Returns the tree for the current text, re-parsing first if needed.
    pub fn get<S: TextSource + ?Sized>(&mut self, source: &S) -> &Parse {
        let version = source.version();
        if self.version != Some(version) {
            self.parse = None;
            self.version = Some(version);
        }
        let options = self.options;
        self.parse.get_or_insert_with(|| {
            let parse = parse_with(source.text(), &options);
            debug!(
                version,
                len = source.text().len(),
                errors = parse.errors().len(),
                "re-parsed document"
            );
            parse
        })
    }

    /// Re-parses if outdated. Returns whether a parse happened.
    pub fn refresh<S: TextSource + ?Sized>(&mut self, source: &S) -> bool {
        let outdated = self.is_outdated(source);
        if outdated {
            self.get(source);
        }
        outdated
    }

    /// The last tree built, even if the text has changed since.
    #[must_use]
    pub fn cached(&self) -> Option<&Parse> {
        self.parse.as_ref()
    }

    /// Forces the next [`ParseCache::get`] to re-parse. The old tree stays
    /// readable until then.
    pub fn invalidate(&mut self) {
        self.version = None;
    }
}

/// A buffer together with its parse cache.
#[derive(Debug, Clone, Default)]
pub struct Document {
    buffer: Buffer,
    cache: ParseCache,
}

impl Document {
    /// Creates a document with default parse options.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_options(text, ParseOptions::default())
    }

    /// Creates a document with explicit parse options.
    pub fn with_options(text: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            buffer: Buffer::new(text),
            cache: ParseCache::new(options),
        }
    }

    /// The current text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// The current version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.buffer.version()
    }

    /// Replaces the whole text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer.set_text(text);
    }

    /// Applies an edit to the text.
    ///
    /// # Errors
    ///
    /// See [`Buffer::edit`].
    pub fn edit(&mut self, range: TextRange, replacement: &str) -> Result<(), EditError> {
        self.buffer.edit(range, replacement)
    }

    /// The tree for the current text.
    pub fn parse(&mut self) -> &Parse {
        self.cache.get(&self.buffer)
    }

    /// The root of the tree for the current text.
    pub fn root(&mut self) -> Node<'_> {
        self.parse().root()
    }

    /// Syntax errors of the current text.
    pub fn errors(&mut self) -> &[SyntaxError] {
        self.parse().errors()
    }

    /// True if the cached tree matches the current text.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.cache.state(&self.buffer) == CacheState::Fresh
    }

    /// Freshness of the cached tree.
    #[must_use]
    pub fn state(&self) -> CacheState {
        self.cache.state(&self.buffer)
    }

    /// The last tree built, possibly for an older version of the text.
    #[must_use]
    pub fn cached(&self) -> Option<&Parse> {
        self.cache.cached()
    }
}
