use crate::{
    map::{RangeMap, Slot},
    range::{IndexRange, IndexType},
    small::SmallRangeMap,
    sparse::SparseRangeMap,
};

/// Range map that picks its back-end from the size of the domain.
///
/// Hot paths should match on the variants and run generic code against the unwrapped map so
/// the per-index dispatch disappears. Everything else can use the [`RangeMap`] implementation
/// directly.
#[derive(Debug, Clone)]
pub enum BothRangeMap<V> {
    Small(SmallRangeMap<V>),
    Sparse(SparseRangeMap<V>),
}

impl<V: Clone> BothRangeMap<V> {
    /// Domains with at most `small_threshold` indices get the flat back-end.
    pub fn new(limit: IndexType, small_threshold: usize) -> Self {
        if limit <= small_threshold {
            BothRangeMap::Small(SmallRangeMap::new(limit))
        } else {
            BothRangeMap::Sparse(SparseRangeMap::new(limit))
        }
    }

    #[inline(always)]
    pub fn uses_small_map(&self) -> bool {
        matches!(self, BothRangeMap::Small(_))
    }
}

impl<V: Clone> RangeMap for BothRangeMap<V> {
    type Value = V;

    #[inline(always)]
    fn limit(&self) -> IndexType {
        match self {
            BothRangeMap::Small(map) => map.limit(),
            BothRangeMap::Sparse(map) => map.limit(),
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        match self {
            BothRangeMap::Small(map) => map.len(),
            BothRangeMap::Sparse(map) => map.len(),
        }
    }

    #[inline(always)]
    fn revision(&self) -> u64 {
        match self {
            BothRangeMap::Small(map) => map.revision(),
            BothRangeMap::Sparse(map) => map.revision(),
        }
    }

    #[inline(always)]
    fn locate(&self, index: IndexType) -> Slot {
        match self {
            BothRangeMap::Small(map) => map.locate(index),
            BothRangeMap::Sparse(map) => map.locate(index),
        }
    }

    #[inline(always)]
    fn get(&self, index: IndexType) -> Option<(IndexRange, &V)> {
        match self {
            BothRangeMap::Small(map) => map.get(index),
            BothRangeMap::Sparse(map) => map.get(index),
        }
    }

    #[inline(always)]
    fn overwrite_range(&mut self, range: IndexRange, value: V) {
        match self {
            BothRangeMap::Small(map) => map.overwrite_range(range, value),
            BothRangeMap::Sparse(map) => map.overwrite_range(range, value),
        }
    }

    #[inline(always)]
    fn clear(&mut self) {
        match self {
            BothRangeMap::Small(map) => map.clear(),
            BothRangeMap::Sparse(map) => map.clear(),
        }
    }
}
