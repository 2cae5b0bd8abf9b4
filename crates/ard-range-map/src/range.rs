use std::{fmt, ops::Range};

/// Index type of the linear domain.
pub type IndexType = usize;

/// Half-open range `[begin, end)` over the linear index domain.
///
/// A range with `begin >= end` is empty. Intersecting two disjoint ranges produces an empty
/// range instead of failing.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexRange {
    pub begin: IndexType,
    pub end: IndexType,
}

impl IndexRange {
    #[inline(always)]
    pub const fn new(begin: IndexType, end: IndexType) -> Self {
        Self { begin, end }
    }

    /// A zero length range sitting at `index`.
    #[inline(always)]
    pub const fn empty_at(index: IndexType) -> Self {
        Self {
            begin: index,
            end: index,
        }
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    #[inline(always)]
    pub const fn len(&self) -> IndexType {
        if self.is_empty() {
            0
        } else {
            self.end - self.begin
        }
    }

    #[inline(always)]
    pub const fn includes(&self, index: IndexType) -> bool {
        self.begin <= index && index < self.end
    }

    /// Returns `true` if the two ranges share at least one index.
    #[inline(always)]
    pub fn intersects(&self, other: &IndexRange) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Returns `true` if every index of `other` is also in `self`. Empty ranges are contained
    /// by everything.
    #[inline(always)]
    pub fn contains(&self, other: &IndexRange) -> bool {
        other.is_empty() || (self.begin <= other.begin && other.end <= self.end)
    }

    /// The overlap of the two ranges. Disjoint ranges produce an empty range positioned at
    /// the larger of the two starts.
    #[inline(always)]
    pub fn intersect(&self, other: &IndexRange) -> IndexRange {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end).max(begin);
        IndexRange { begin, end }
    }

    #[inline(always)]
    pub fn as_range(&self) -> Range<IndexType> {
        self.begin..self.end
    }
}

impl From<Range<IndexType>> for IndexRange {
    #[inline(always)]
    fn from(value: Range<IndexType>) -> Self {
        IndexRange::new(value.start, value.end)
    }
}

impl From<IndexRange> for Range<IndexType> {
    #[inline(always)]
    fn from(value: IndexRange) -> Self {
        value.begin..value.end
    }
}

impl fmt::Debug for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}
