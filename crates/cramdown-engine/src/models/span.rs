use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the parsed source text.
///
/// All parsed nodes store the span they were built from, enabling lossless
/// round-trip: slicing the source with any span reproduces the exact bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. An inverted span counts as empty.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` overlaps this span by at least one byte.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        other.start < self.end && other.end > self.start
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Returns a copy of this span shifted right by `offset` bytes.
    #[must_use]
    pub fn shifted(self, offset: usize) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Slices `text` with this span.
    ///
    /// Panics if the span is out of bounds or splits a UTF-8 boundary; spans
    /// produced by the scanners are always valid for the text they came from.
    #[must_use]
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}
