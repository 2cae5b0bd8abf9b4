use crate::range::{IndexRange, IndexType};

/// What lives at a particular index of a range map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slot {
    /// The index is inside a stored range.
    Known(IndexRange),
    /// The index is not stored. The range is the whole gap containing the index, bounded by the
    /// neighboring stored ranges (or by the start and limit of the domain).
    Gap(IndexRange),
}

impl Slot {
    #[inline(always)]
    pub fn extent(&self) -> IndexRange {
        match self {
            Slot::Known(range) | Slot::Gap(range) => *range,
        }
    }

    #[inline(always)]
    pub fn is_known(&self) -> bool {
        matches!(self, Slot::Known(_))
    }
}

/// Ordered container of non-overlapping `(IndexRange, Value)` pairs over the domain
/// `[0, limit)`.
///
/// Stored ranges are always pairwise disjoint and ordered by their start. Indices that are not
/// covered by a stored range are "unknown".
pub trait RangeMap {
    type Value: Clone;

    /// Exclusive upper bound of the index domain.
    fn limit(&self) -> IndexType;

    /// Number of stored ranges.
    fn len(&self) -> usize;

    /// Incremented by every mutation. Used to detect stale cursors.
    fn revision(&self) -> u64;

    /// Finds the slot containing `index`. Indices at or past the limit produce an empty gap.
    fn locate(&self, index: IndexType) -> Slot;

    /// The stored range containing `index`, along with its value.
    fn get(&self, index: IndexType) -> Option<(IndexRange, &Self::Value)>;

    /// Stores `value` over exactly `range`.
    ///
    /// Stored ranges that partially overlap `range` are split so their parts outside of `range`
    /// keep the old value. Gaps covered by `range` become known. `range` must lie within the
    /// domain.
    fn overwrite_range(&mut self, range: IndexRange, value: Self::Value);

    /// Forgets every stored range.
    fn clear(&mut self);

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every stored range in ascending order.
    #[inline(always)]
    fn iter(&self) -> Entries<'_, Self>
    where
        Self: Sized,
    {
        Entries::new(self, IndexRange::new(0, self.limit()))
    }

    /// Iterates over the stored ranges intersecting `range` in ascending order. Ranges are
    /// yielded whole, not clipped to `range`.
    #[inline(always)]
    fn iter_range(&self, range: IndexRange) -> Entries<'_, Self>
    where
        Self: Sized,
    {
        Entries::new(self, range)
    }
}

/// Iterator over the stored ranges of a [`RangeMap`]. Gaps are skipped.
pub struct Entries<'a, M: RangeMap> {
    map: &'a M,
    index: IndexType,
    end: IndexType,
}

impl<'a, M: RangeMap> Entries<'a, M> {
    fn new(map: &'a M, range: IndexRange) -> Self {
        Self {
            map,
            index: range.begin,
            end: range.end.min(map.limit()),
        }
    }
}

impl<'a, M: RangeMap> Iterator for Entries<'a, M> {
    type Item = (IndexRange, &'a M::Value);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.end {
            match self.map.locate(self.index) {
                Slot::Known(range) => {
                    self.index = range.end;
                    return self.map.get(range.begin);
                }
                Slot::Gap(gap) => {
                    // Degenerate gaps only show up past the limit
                    if gap.end <= self.index {
                        break;
                    }
                    self.index = gap.end;
                }
            }
        }

        self.index = self.end;
        None
    }
}
