//! Span module - source location tracking.
//!
//! A [`Span`] is the sole ground-truth linkage between a tree node and the
//! original source text: every lexer, parser, and lowerer node carries one.
//! Offsets are half-open `[start, end)` byte intervals; `end` is exclusive
//! and, for tokens, includes any trailing whitespace consumed while
//! tokenising that lexeme.

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// A unique identifier for a source file.
///
/// `FileId`s are assigned sequentially as files are added to a [`SourceMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    pub const DUMMY: FileId = FileId(0);

    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl Default for FileId {
    #[inline]
    fn default() -> Self {
        Self::DUMMY
    }
}

/// Half-open byte interval `[start, end)` in a source file, plus the
/// human-readable line/column of `start` for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
    pub file_id: FileId,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
        file_id: FileId::DUMMY,
    };

    #[inline]
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id: FileId::DUMMY,
        }
    }

    #[inline]
    pub fn with_file(start: usize, end: usize, file_id: FileId, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id,
        }
    }

    /// A zero-width span anchored at `offset`, used for the synthetic empty
    /// `Modifiers` node (invariant 1): no modifier token was present, so the
    /// node collapses to a point at the following token's start.
    #[inline]
    pub fn empty_at(offset: usize, line: u32, column: u32) -> Self {
        Self::new(offset, offset, line, column)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Merge two spans into the span that spans both: `start` = min of both
    /// starts, `end` = max of both ends. This is how every branch node's
    /// extents are derived from its children (invariant 1).
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        let (start_span, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: start_span.line,
            column: start_span.column,
            file_id: self.file_id,
        }
    }

    /// Fold [`Span::merge`] over an iterator of child spans. Panics if the
    /// iterator is empty — a branch node without children is a parser bug,
    /// not a representable tree (invariant 2: no branch has `null` children).
    pub fn merge_all(spans: impl IntoIterator<Item = Span>) -> Span {
        let mut spans = spans.into_iter();
        let first = spans
            .next()
            .expect("merge_all requires at least one span");
        spans.fold(first, Span::merge)
    }

    #[inline]
    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_min_start_max_end() {
        let a = Span::new(10, 20, 1, 5);
        let b = Span::new(5, 15, 1, 1);
        let merged = a.merge(b);
        assert_eq!(merged.start, 5);
        assert_eq!(merged.end, 20);
    }

    #[test]
    fn merge_all_folds_three_spans() {
        let spans = [Span::new(10, 20, 1, 1), Span::new(0, 5, 1, 1), Span::new(30, 35, 1, 1)];
        let merged = Span::merge_all(spans);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 35);
    }

    #[test]
    fn empty_at_is_zero_width() {
        let span = Span::empty_at(42, 3, 7);
        assert!(span.is_empty());
        assert_eq!(span.start, 42);
    }

    #[test]
    fn contains_is_half_open() {
        let span = Span::new(10, 20, 1, 1);
        assert!(span.contains(10));
        assert!(!span.contains(20));
    }
}
