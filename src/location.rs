//! Source position and location tracking.
//!
//! A [`SourcePosition`] is a raw byte offset into the original input. A
//! [`SourceLocation`] is the human-readable line/column pair derived from a
//! position by walking the input once during tokenization.

use std::fmt;

/// A byte offset into the source input. Monotonically increases as the
/// tokenizer advances; never decreases except when a cursor is reset to an
/// earlier [`crate::cursor::CursorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SourcePosition(pub usize);

impl SourcePosition {
    #[must_use]
    pub fn offset(&self) -> usize {
        self.0
    }
}

/// A resolved line/column pair, plus an optional source file tag used when a
/// stylesheet was parsed from a named file or URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceLocation {
    /// Line number, 0-based.
    pub line: u32,
    /// Column, counted in UTF-16 code units, 1-based.
    pub column: u32,
    /// Optional file or URL this location belongs to.
    pub file: Option<String>,
}

impl SourceLocation {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            file: None,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line + 1, self.column)
        } else {
            write!(f, "{}:{}", self.line + 1, self.column)
        }
    }
}

/// Tracks line/column as the tokenizer walks the input, so a [`SourcePosition`]
/// can be resolved to a [`SourceLocation`] without re-scanning from the start.
#[derive(Debug, Clone)]
pub(crate) struct LineColTracker {
    file: Option<String>,
    /// Byte offset of the start of each line seen so far, index is the (0-based) line number.
    line_starts: Vec<usize>,
}

impl LineColTracker {
    pub(crate) fn new(file: Option<String>) -> Self {
        Self {
            file,
            line_starts: vec![0],
        }
    }

    /// Record a newline at the given offset (offset of the character *after* the LF).
    pub(crate) fn record_newline(&mut self, offset_after_lf: usize) {
        self.line_starts.push(offset_after_lf);
    }

    /// Resolves a byte offset to a `SourceLocation`. `input` is needed to count
    /// UTF-16 code units between the line start and the offset.
    pub(crate) fn resolve(&self, input: &str, offset: usize) -> SourceLocation {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = input
            .get(line_start..offset)
            .unwrap_or("")
            .encode_utf16()
            .count() as u32
            + 1;
        SourceLocation {
            line: line_idx as u32,
            column,
            file: self.file.clone(),
        }
    }
}
