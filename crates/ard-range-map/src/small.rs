use smallvec::SmallVec;

use crate::{
    map::{RangeMap, Slot},
    range::{IndexRange, IndexType},
    DEFAULT_SMALL_MAP_THRESHOLD,
};

/// Flat range map for small domains.
///
/// Every index of the domain owns a slot holding the extent (stored range or maximal gap) that
/// contains it, so locating an index is a single array lookup. The value of a stored range is
/// kept in the slot of its first index only.
#[derive(Debug, Clone)]
pub struct SmallRangeMap<V> {
    /// Extent containing each index.
    extents: SmallVec<[IndexRange; DEFAULT_SMALL_MAP_THRESHOLD]>,
    /// `Some` only at the first index of a stored range.
    values: SmallVec<[Option<V>; DEFAULT_SMALL_MAP_THRESHOLD]>,
    revision: u64,
}

impl<V: Clone> SmallRangeMap<V> {
    pub fn new(limit: IndexType) -> Self {
        let full = IndexRange::new(0, limit);
        Self {
            extents: std::iter::repeat(full).take(limit).collect(),
            values: std::iter::repeat_with(|| None).take(limit).collect(),
            revision: 0,
        }
    }

    #[inline(always)]
    fn set_extent(&mut self, extent: IndexRange) {
        for slot in &mut self.extents[extent.as_range()] {
            *slot = extent;
        }
    }
}

impl<V: Clone> RangeMap for SmallRangeMap<V> {
    type Value = V;

    #[inline(always)]
    fn limit(&self) -> IndexType {
        self.extents.len()
    }

    fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    #[inline(always)]
    fn revision(&self) -> u64 {
        self.revision
    }

    #[inline(always)]
    fn locate(&self, index: IndexType) -> Slot {
        match self.extents.get(index) {
            Some(extent) if self.values[extent.begin].is_some() => Slot::Known(*extent),
            Some(extent) => Slot::Gap(*extent),
            None => Slot::Gap(IndexRange::empty_at(index)),
        }
    }

    #[inline(always)]
    fn get(&self, index: IndexType) -> Option<(IndexRange, &V)> {
        let extent = *self.extents.get(index)?;
        self.values[extent.begin]
            .as_ref()
            .map(|value| (extent, value))
    }

    fn overwrite_range(&mut self, range: IndexRange, value: V) {
        debug_assert!(range.end <= self.limit());
        if range.is_empty() {
            return;
        }

        let first = self.extents[range.begin];
        let last = self.extents[range.end - 1];

        // Whatever sticks out past the end keeps the old value (or stays a gap)
        let tail = if last.end > range.end {
            Some(self.values[last.begin].clone())
        } else {
            None
        };

        // Leading part of the first extent. Its value already lives at `first.begin`
        if first.begin < range.begin {
            self.set_extent(IndexRange::new(first.begin, range.begin));
        }

        self.set_extent(range);
        for slot in &mut self.values[range.as_range()] {
            *slot = None;
        }
        self.values[range.begin] = Some(value);

        if let Some(tail) = tail {
            self.set_extent(IndexRange::new(range.end, last.end));
            self.values[range.end] = tail;
        }

        self.revision += 1;
    }

    fn clear(&mut self) {
        let full = IndexRange::new(0, self.limit());
        self.set_extent(full);
        for slot in &mut self.values {
            *slot = None;
        }
        self.revision += 1;
    }
}
