use std::{
    collections::BTreeMap,
    ops::Bound::{Excluded, Unbounded},
};

use smallvec::SmallVec;

use crate::{
    map::{RangeMap, Slot},
    range::{IndexRange, IndexType},
};

/// Range map for large domains.
///
/// Stored ranges are kept in a B-tree keyed by their start, so storage is proportional to the
/// number of distinct ranges instead of the size of the domain.
#[derive(Debug, Clone)]
pub struct SparseRangeMap<V> {
    /// Range start -> (range end, value).
    ranges: BTreeMap<IndexType, (IndexType, V)>,
    limit: IndexType,
    revision: u64,
}

impl<V: Clone> SparseRangeMap<V> {
    pub fn new(limit: IndexType) -> Self {
        Self {
            ranges: BTreeMap::default(),
            limit,
            revision: 0,
        }
    }

    /// The stored range starting at or before `index`.
    #[inline(always)]
    fn floor(&self, index: IndexType) -> Option<(IndexType, IndexType)> {
        self.ranges
            .range(..=index)
            .next_back()
            .map(|(begin, (end, _))| (*begin, *end))
    }
}

impl<V: Clone> RangeMap for SparseRangeMap<V> {
    type Value = V;

    #[inline(always)]
    fn limit(&self) -> IndexType {
        self.limit
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline(always)]
    fn revision(&self) -> u64 {
        self.revision
    }

    fn locate(&self, index: IndexType) -> Slot {
        if index >= self.limit {
            return Slot::Gap(IndexRange::empty_at(index));
        }

        let gap_begin = match self.floor(index) {
            Some((begin, end)) if end > index => return Slot::Known(IndexRange::new(begin, end)),
            Some((_, end)) => end,
            None => 0,
        };

        // Nothing contains `index`, so the next range (if any) starts strictly after it
        let gap_end = self
            .ranges
            .range((Excluded(index), Unbounded))
            .next()
            .map(|(begin, _)| *begin)
            .unwrap_or(self.limit);

        Slot::Gap(IndexRange::new(gap_begin, gap_end))
    }

    fn get(&self, index: IndexType) -> Option<(IndexRange, &V)> {
        self.ranges
            .range(..=index)
            .next_back()
            .filter(|(_, (end, _))| *end > index)
            .map(|(begin, (end, value))| (IndexRange::new(*begin, *end), value))
    }

    fn overwrite_range(&mut self, range: IndexRange, value: V) {
        debug_assert!(range.end <= self.limit);
        if range.is_empty() {
            return;
        }

        // Every stored range overlapping the new one
        let mut overlapping = SmallVec::<[IndexType; 4]>::new();
        if let Some((begin, end)) = self.floor(range.begin) {
            if begin < range.begin && end > range.begin {
                overlapping.push(begin);
            }
        }
        overlapping.extend(self.ranges.range(range.begin..range.end).map(|(begin, _)| *begin));

        for begin in overlapping {
            let (end, old) = match self.ranges.remove(&begin) {
                Some(entry) => entry,
                None => continue,
            };

            match (begin < range.begin, end > range.end) {
                // The new range punches a hole in the middle of an old one
                (true, true) => {
                    self.ranges.insert(range.end, (end, old.clone()));
                    self.ranges.insert(begin, (range.begin, old));
                }
                (true, false) => {
                    self.ranges.insert(begin, (range.begin, old));
                }
                (false, true) => {
                    self.ranges.insert(range.end, (end, old));
                }
                (false, false) => {}
            }
        }

        self.ranges.insert(range.begin, (range.end, value));
        self.revision += 1;
    }

    fn clear(&mut self) {
        self.ranges.clear();
        self.revision += 1;
    }
}
