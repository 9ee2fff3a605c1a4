use std::borrow::Cow;
use std::ops::Range;

use xi_rope::Rope;

/// A byte range `[start, end)` into the rope.
///
/// Blocks store spans rather than copied source text; slicing the rope with
/// a block's span reproduces its exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    /// The source text under this span.
    pub fn text(self, rope: &Rope) -> Cow<'_, str> {
        rope.slice_to_cow(self.range())
    }
}
