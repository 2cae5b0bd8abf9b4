use crate::{
    cursor::RangeCursor,
    map::{RangeMap, Slot},
    range::IndexRange,
};

/// Decides what [`apply_range`] writes into a map.
pub trait RangeUpdater<V> {
    /// Value to store over an unknown `gap`, or `None` to leave the gap alone.
    fn insert(&mut self, gap: IndexRange) -> Option<V>;

    /// Replacement for an `existing` value, or `None` if it should stay as is.
    fn update(&mut self, existing: &V) -> Option<V>;
}

/// Applies `updater` to every index of `range`, returning `true` if anything was written.
///
/// Unknown gaps are filled with the updater's insert value. Stored ranges are handed to the
/// updater and, if it produces a replacement, exactly the part of the stored range that lies
/// within `range` is overwritten. The rest of the stored range keeps its old value.
///
/// `cursor` may be carried across consecutive calls against the same map to avoid repeated
/// lookups. The part of `range` that lies outside of the map's domain is ignored.
pub fn apply_range<M, U>(
    map: &mut M,
    cursor: &mut RangeCursor,
    range: IndexRange,
    updater: &mut U,
) -> bool
where
    M: RangeMap,
    U: RangeUpdater<M::Value> + ?Sized,
{
    let range = range.intersect(&IndexRange::new(0, map.limit()));
    let mut changed = false;
    let mut index = range.begin;

    // Every branch moves `index` forward by at least one
    while index < range.end {
        match cursor.seek(&*map, index) {
            Slot::Gap(gap) => {
                let fill = IndexRange::new(index, gap.end.min(range.end));
                if let Some(value) = updater.insert(fill) {
                    map.overwrite_range(fill, value);
                    cursor.settle(&*map, Slot::Known(fill));
                    changed = true;
                }
                index = fill.end;
            }
            Slot::Known(known) => {
                let replacement = map.get(index).and_then(|(_, value)| updater.update(value));
                match replacement {
                    Some(value) => {
                        let intersected = known.intersect(&range);
                        map.overwrite_range(intersected, value);
                        cursor.settle(&*map, Slot::Known(intersected));
                        changed = true;
                        index = intersected.end;
                    }
                    None => index = known.end,
                }
            }
        }
    }

    changed
}

/// Merges every stored range of `src` into `dst`.
///
/// `make_updater` builds the updater for one source value. Returns `true` if anything in `dst`
/// changed.
pub fn splice<D, S, U, F>(dst: &mut D, src: &S, mut make_updater: F) -> bool
where
    D: RangeMap,
    S: RangeMap,
    U: RangeUpdater<D::Value>,
    F: FnMut(&S::Value) -> U,
{
    let mut cursor = RangeCursor::new();
    let mut changed = false;
    for (range, value) in src.iter() {
        let mut updater = make_updater(value);
        changed |= apply_range(dst, &mut cursor, range, &mut updater);
    }
    changed
}

/// Writes one value over a range. Gaps are filled and differing values are replaced.
#[derive(Debug, Copy, Clone)]
pub struct PreferSource<V>(pub V);

impl<V: Clone + PartialEq> RangeUpdater<V> for PreferSource<V> {
    #[inline(always)]
    fn insert(&mut self, _gap: IndexRange) -> Option<V> {
        Some(self.0.clone())
    }

    #[inline(always)]
    fn update(&mut self, existing: &V) -> Option<V> {
        if *existing != self.0 {
            Some(self.0.clone())
        } else {
            None
        }
    }
}
