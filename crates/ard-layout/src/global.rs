use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ard_range_map::{
    apply_range, BothRangeMap, IndexRange, IndexType, PreferSource, RangeCursor, RangeMap,
};
use ard_subresource::prelude::RangeGenerator;

use crate::layout::ImageLayout;

pub type GlobalLayoutMap = BothRangeMap<ImageLayout>;

/// Device-wide layouts of one image, shared between threads.
///
/// Readers run concurrently. Writers are exclusive. A panic while a guard is held does not leave
/// the map unusable, the next lock simply takes over the poisoned guard.
#[derive(Debug)]
pub struct GlobalImageLayoutMap {
    map: RwLock<GlobalLayoutMap>,
}

impl GlobalImageLayoutMap {
    pub fn new(subresource_count: IndexType, small_map_threshold: usize) -> Self {
        Self {
            map: RwLock::new(BothRangeMap::new(subresource_count, small_map_threshold)),
        }
    }

    #[inline(always)]
    pub fn read(&self) -> RwLockReadGuard<'_, GlobalLayoutMap> {
        self.map.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[inline(always)]
    pub fn write(&self) -> RwLockWriteGuard<'_, GlobalLayoutMap> {
        self.map
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of subresources covered.
    #[inline(always)]
    pub fn limit(&self) -> IndexType {
        self.read().limit()
    }

    /// Writes `layout` over `range`. Returns `true` if anything changed.
    pub fn set_layout(&self, range: IndexRange, layout: ImageLayout) -> bool {
        let mut map = self.write();
        apply_range(
            &mut *map,
            &mut RangeCursor::new(),
            range,
            &mut PreferSource(layout),
        )
    }

    /// Writes `layout` over every range produced by `generator`, under a single write lock.
    pub fn set_layout_generator(&self, generator: RangeGenerator, layout: ImageLayout) -> bool {
        let mut map = self.write();
        let mut cursor = RangeCursor::new();
        let mut changed = false;
        for range in generator {
            changed |= apply_range(&mut *map, &mut cursor, range, &mut PreferSource(layout));
        }
        changed
    }

    /// Layout at a single subresource index.
    #[inline(always)]
    pub fn layout_at(&self, index: IndexType) -> Option<ImageLayout> {
        self.read().get(index).map(|(_, layout)| *layout)
    }

    /// `true` if `pred` holds for any stored range intersecting `range`. Stored ranges are
    /// passed whole.
    pub fn any_in_range(
        &self,
        range: IndexRange,
        mut pred: impl FnMut(IndexRange, ImageLayout) -> bool,
    ) -> bool {
        let map = self.read();
        let found = map
            .iter_range(range)
            .any(|(stored, layout)| pred(stored, *layout));
        found
    }

    /// Like [`GlobalImageLayoutMap::any_in_range`], for every range of `generator`.
    pub fn any_in_generator(
        &self,
        generator: RangeGenerator,
        mut pred: impl FnMut(IndexRange, ImageLayout) -> bool,
    ) -> bool {
        let map = self.read();
        for range in generator {
            if map
                .iter_range(range)
                .any(|(stored, layout)| pred(stored, *layout))
            {
                return true;
            }
        }
        false
    }
}
