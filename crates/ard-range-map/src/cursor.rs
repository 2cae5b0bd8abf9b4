use crate::{
    map::{RangeMap, Slot},
    range::IndexType,
};

/// Resumable seek position into a [`RangeMap`].
///
/// Remembers the last slot it found. Consecutive seeks that land inside that slot skip the
/// lookup entirely, which is the common case when a range generator walks the array layers of
/// consecutive mip levels that all sit inside one stored range. The cursor checks the map's
/// revision before reusing anything, so a stale cursor is only slower, never wrong.
///
/// A cursor belongs to a single map. It does not remember which map it was seeked in, so using
/// it with another map whose revision happens to match returns that other map's stale slot.
/// Use a fresh cursor (or call [`RangeCursor::invalidate`]) when switching maps.
#[derive(Debug, Default, Copy, Clone)]
pub struct RangeCursor {
    slot: Option<Slot>,
    revision: u64,
}

impl RangeCursor {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the slot containing `index`.
    #[inline(always)]
    pub fn seek<M: RangeMap>(&mut self, map: &M, index: IndexType) -> Slot {
        if let Some(slot) = self.slot {
            if self.revision == map.revision() && slot.extent().includes(index) {
                return slot;
            }
        }

        let slot = map.locate(index);
        self.slot = Some(slot);
        self.revision = map.revision();
        slot
    }

    /// Records a slot that the caller just wrote into `map`.
    #[inline(always)]
    pub fn settle<M: RangeMap>(&mut self, map: &M, slot: Slot) {
        self.slot = Some(slot);
        self.revision = map.revision();
    }

    #[inline(always)]
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
