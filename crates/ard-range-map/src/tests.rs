use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::*;

/// Panics if the stored ranges of `map` overlap, are empty, or are out of order.
fn check_sanity<M: RangeMap>(map: &M) {
    let mut last_end = 0;
    for (range, _) in map.iter() {
        assert!(!range.is_empty(), "empty stored range {:?}", range);
        assert!(range.begin >= last_end, "overlapping range {:?}", range);
        assert!(range.end <= map.limit());
        last_end = range.end;
    }
}

fn entries<M>(map: &M) -> Vec<(IndexRange, M::Value)>
where
    M: RangeMap,
{
    map.iter().map(|(range, value)| (range, value.clone())).collect()
}

/// Expands a map into one optional value per index.
fn per_index<M>(map: &M) -> Vec<Option<M::Value>>
where
    M: RangeMap,
{
    (0..map.limit())
        .map(|i| map.get(i).map(|(_, value)| value.clone()))
        .collect()
}

#[test]
fn range_intersection() {
    let a = IndexRange::new(2, 8);
    let b = IndexRange::new(6, 12);
    assert_eq!(a.intersect(&b), IndexRange::new(6, 8));
    assert!(a.intersects(&b));

    let c = IndexRange::new(10, 12);
    let empty = a.intersect(&c);
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert!(!a.intersects(&c));

    assert!(a.includes(2));
    assert!(!a.includes(8));
    assert!(a.contains(&IndexRange::new(3, 5)));
    assert!(a.contains(&IndexRange::empty_at(100)));
    assert!(!a.contains(&b));
}

#[test]
fn small_map_split() {
    let mut map = SmallRangeMap::<u32>::new(8);
    assert!(map.is_empty());
    assert_eq!(map.locate(3), Slot::Gap(IndexRange::new(0, 8)));

    map.overwrite_range(IndexRange::new(0, 8), 1);
    map.overwrite_range(IndexRange::new(2, 5), 2);
    check_sanity(&map);

    assert_eq!(
        entries(&map),
        vec![
            (IndexRange::new(0, 2), 1),
            (IndexRange::new(2, 5), 2),
            (IndexRange::new(5, 8), 1),
        ]
    );
    assert_eq!(map.locate(6), Slot::Known(IndexRange::new(5, 8)));
}

#[test]
fn small_map_gaps() {
    let mut map = SmallRangeMap::<u32>::new(10);
    map.overwrite_range(IndexRange::new(4, 6), 7);

    assert_eq!(map.locate(0), Slot::Gap(IndexRange::new(0, 4)));
    assert_eq!(map.locate(5), Slot::Known(IndexRange::new(4, 6)));
    assert_eq!(map.locate(9), Slot::Gap(IndexRange::new(6, 10)));
    assert_eq!(map.locate(10), Slot::Gap(IndexRange::empty_at(10)));

    // Bridging a stored range and the gap after it
    map.overwrite_range(IndexRange::new(5, 8), 3);
    check_sanity(&map);
    assert_eq!(map.locate(4), Slot::Known(IndexRange::new(4, 5)));
    assert_eq!(map.locate(9), Slot::Gap(IndexRange::new(8, 10)));
    assert_eq!(map.len(), 2);

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.locate(5), Slot::Gap(IndexRange::new(0, 10)));
}

#[test]
fn sparse_map_split() {
    let mut map = SparseRangeMap::<u32>::new(1000);
    map.overwrite_range(IndexRange::new(100, 200), 1);
    map.overwrite_range(IndexRange::new(300, 400), 2);

    assert_eq!(map.locate(0), Slot::Gap(IndexRange::new(0, 100)));
    assert_eq!(map.locate(250), Slot::Gap(IndexRange::new(200, 300)));
    assert_eq!(map.locate(999), Slot::Gap(IndexRange::new(400, 1000)));

    // Spans the tail of one range, a gap, and the head of another
    map.overwrite_range(IndexRange::new(150, 350), 3);
    check_sanity(&map);
    assert_eq!(
        entries(&map),
        vec![
            (IndexRange::new(100, 150), 1),
            (IndexRange::new(150, 350), 3),
            (IndexRange::new(350, 400), 2),
        ]
    );

    // Punch a hole in the middle
    map.overwrite_range(IndexRange::new(200, 210), 4);
    check_sanity(&map);
    assert_eq!(map.get(199), Some((IndexRange::new(150, 200), &3)));
    assert_eq!(map.get(205), Some((IndexRange::new(200, 210), &4)));
    assert_eq!(map.get(210), Some((IndexRange::new(210, 350), &3)));
    assert_eq!(map.get(50), None);
}

#[test]
fn iter_range_skips_gaps() {
    let mut map = SparseRangeMap::<u32>::new(100);
    map.overwrite_range(IndexRange::new(10, 20), 1);
    map.overwrite_range(IndexRange::new(40, 50), 2);
    map.overwrite_range(IndexRange::new(90, 100), 3);

    // Ranges come back whole even if the query only clips them
    let found: Vec<_> = map
        .iter_range(IndexRange::new(15, 45))
        .map(|(range, value)| (range, *value))
        .collect();
    assert_eq!(
        found,
        vec![(IndexRange::new(10, 20), 1), (IndexRange::new(40, 50), 2)]
    );

    assert_eq!(map.iter_range(IndexRange::new(20, 40)).count(), 0);
    assert_eq!(map.iter_range(IndexRange::new(60, 500)).count(), 1);
}

#[test]
fn both_map_selection() {
    let small = BothRangeMap::<u32>::new(16, DEFAULT_SMALL_MAP_THRESHOLD);
    assert!(small.uses_small_map());
    let big = BothRangeMap::<u32>::new(17, DEFAULT_SMALL_MAP_THRESHOLD);
    assert!(!big.uses_small_map());
    let forced = BothRangeMap::<u32>::new(4, 0);
    assert!(!forced.uses_small_map());
}

#[test]
fn apply_range_fills_and_updates() {
    let mut map = SmallRangeMap::<u32>::new(8);
    let mut cursor = RangeCursor::new();

    assert!(apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(2, 6),
        &mut PreferSource(1)
    ));
    assert!(!apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(2, 6),
        &mut PreferSource(1)
    ));
    assert!(apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(0, 4),
        &mut PreferSource(2)
    ));
    check_sanity(&map);

    // The gap fill and the overwritten part of the old range stay separate
    assert_eq!(
        entries(&map),
        vec![
            (IndexRange::new(0, 2), 2),
            (IndexRange::new(2, 4), 2),
            (IndexRange::new(4, 6), 1),
        ]
    );
    assert_eq!(
        per_index(&map),
        vec![Some(2), Some(2), Some(2), Some(2), Some(1), Some(1), None, None]
    );
}

#[test]
fn apply_range_clamps_to_domain() {
    let mut map = SparseRangeMap::<u32>::new(32);
    let mut cursor = RangeCursor::new();

    assert!(apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(24, 64),
        &mut PreferSource(5)
    ));
    assert_eq!(entries(&map), vec![(IndexRange::new(24, 32), 5)]);

    assert!(!apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(40, 64),
        &mut PreferSource(5)
    ));
}

/// Only touches values that are already stored.
struct UpdateOnly<V>(V);

impl<V: Copy + PartialEq> RangeUpdater<V> for UpdateOnly<V> {
    fn insert(&mut self, _gap: IndexRange) -> Option<V> {
        None
    }

    fn update(&mut self, existing: &V) -> Option<V> {
        (*existing != self.0).then_some(self.0)
    }
}

#[test]
fn apply_range_leaves_refused_gaps() {
    let mut map = SparseRangeMap::<u32>::new(20);
    map.overwrite_range(IndexRange::new(5, 10), 1);

    let mut cursor = RangeCursor::new();
    assert!(apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(0, 20),
        &mut UpdateOnly(9)
    ));
    assert_eq!(entries(&map), vec![(IndexRange::new(5, 10), 9)]);
}

#[test]
fn stale_cursor_is_harmless() {
    let mut map = SmallRangeMap::<u32>::new(8);
    let mut cursor = RangeCursor::new();
    apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(0, 8),
        &mut PreferSource(1),
    );

    // Mutate behind the cursor's back
    map.overwrite_range(IndexRange::new(3, 4), 2);

    assert_eq!(cursor.seek(&map, 5), Slot::Known(IndexRange::new(4, 8)));
    assert!(apply_range(
        &mut map,
        &mut cursor,
        IndexRange::new(3, 4),
        &mut PreferSource(3)
    ));
    assert_eq!(map.get(3), Some((IndexRange::new(3, 4), &3)));
}

#[test]
fn invalidated_cursor_moves_between_maps() {
    let mut first = SmallRangeMap::<u32>::new(8);
    let mut second = SmallRangeMap::<u32>::new(8);
    first.overwrite_range(IndexRange::new(0, 8), 1);
    second.overwrite_range(IndexRange::new(0, 2), 2);

    let mut cursor = RangeCursor::new();
    assert_eq!(cursor.seek(&first, 1), Slot::Known(IndexRange::new(0, 8)));

    cursor.invalidate();
    assert_eq!(cursor.seek(&second, 1), Slot::Known(IndexRange::new(0, 2)));
    assert_eq!(cursor.seek(&second, 5), second.locate(5));
}

#[test]
fn splice_merges_everything() {
    let mut dst = SmallRangeMap::<u32>::new(10);
    dst.overwrite_range(IndexRange::new(0, 5), 1);

    let mut src = SparseRangeMap::<u32>::new(10);
    src.overwrite_range(IndexRange::new(3, 7), 2);
    src.overwrite_range(IndexRange::new(8, 10), 3);

    assert!(splice(&mut dst, &src, |value| PreferSource(*value)));
    check_sanity(&dst);
    assert_eq!(
        per_index(&dst),
        vec![
            Some(1),
            Some(1),
            Some(1),
            Some(2),
            Some(2),
            Some(2),
            Some(2),
            None,
            Some(3),
            Some(3),
        ]
    );

    assert!(!splice(&mut dst, &src, |value| PreferSource(*value)));
}

#[test]
fn randomized_backend_equivalence() {
    const LIMIT: usize = 24;
    let mut rng = StdRng::seed_from_u64(0xA2D);

    for _ in 0..64 {
        let mut small = SmallRangeMap::<u8>::new(LIMIT);
        let mut sparse = SparseRangeMap::<u8>::new(LIMIT);
        let mut small_cursor = RangeCursor::new();
        let mut sparse_cursor = RangeCursor::new();

        for _ in 0..32 {
            let begin = rng.gen_range(0..LIMIT);
            let end = rng.gen_range(begin..=LIMIT);
            let range = IndexRange::new(begin, end);
            let value = rng.gen_range(0..4u8);

            let (small_changed, sparse_changed) = if rng.gen_bool(0.5) {
                (
                    apply_range(&mut small, &mut small_cursor, range, &mut PreferSource(value)),
                    apply_range(
                        &mut sparse,
                        &mut sparse_cursor,
                        range,
                        &mut PreferSource(value),
                    ),
                )
            } else {
                (
                    apply_range(&mut small, &mut small_cursor, range, &mut UpdateOnly(value)),
                    apply_range(
                        &mut sparse,
                        &mut sparse_cursor,
                        range,
                        &mut UpdateOnly(value),
                    ),
                )
            };

            assert_eq!(small_changed, sparse_changed);
            check_sanity(&small);
            check_sanity(&sparse);
            assert_eq!(entries(&small), entries(&sparse));
        }
    }
}

