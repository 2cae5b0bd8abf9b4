use std::sync::Arc;

use ard_log::{error, trace, warn};
use ard_range_map::{
    apply_range, BothRangeMap, Entries, IndexRange, IndexType, RangeCursor, RangeMap,
    RangeUpdater, SmallRangeMap, SparseRangeMap,
};
use ard_subresource::prelude::*;
use rustc_hash::FxHashMap;

use crate::{
    command_buffer::RecordingContext,
    config::LayoutTrackerConfig,
    entry::LayoutEntry,
    id::ImageId,
    image::{ImageState, ImageViewState},
    layout::ImageLayout,
    snapshot::{InitialLayoutState, SnapshotId, SnapshotStore},
};

pub type LayoutMap = BothRangeMap<LayoutEntry>;

/// Must match between two registries for one to be imported into the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompatibilityKey {
    pub image: ImageId,
    pub aspects: ImageAspects,
}

/// Layouts recorded for one image by one recording context.
#[derive(Debug)]
pub struct ImageLayoutRegistry {
    image: ImageId,
    encoder: Arc<RangeEncoder>,
    layout_map: LayoutMap,
    initial_layout_states: SnapshotStore,
}

impl ImageLayoutRegistry {
    pub fn new(image: &ImageState, config: &LayoutTrackerConfig) -> Self {
        let encoder = image.encoder().clone();
        Self {
            image: image.id(),
            layout_map: BothRangeMap::new(
                encoder.subresource_count(),
                config.small_map_threshold,
            ),
            encoder,
            initial_layout_states: SnapshotStore::new(),
        }
    }

    /// An empty registry for the same image, using the same back-end as `self`.
    pub fn empty_like(&self) -> Self {
        let layout_map = match &self.layout_map {
            BothRangeMap::Small(map) => BothRangeMap::Small(SmallRangeMap::new(map.limit())),
            BothRangeMap::Sparse(map) => BothRangeMap::Sparse(SparseRangeMap::new(map.limit())),
        };

        Self {
            image: self.image,
            encoder: self.encoder.clone(),
            layout_map,
            initial_layout_states: SnapshotStore::new(),
        }
    }

    #[inline(always)]
    pub fn image_id(&self) -> ImageId {
        self.image
    }

    #[inline(always)]
    pub fn encoder(&self) -> &RangeEncoder {
        &self.encoder
    }

    #[inline(always)]
    pub fn layout_map(&self) -> &LayoutMap {
        &self.layout_map
    }

    #[inline(always)]
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.initial_layout_states
    }

    #[inline(always)]
    pub fn compatibility_key(&self) -> CompatibilityKey {
        CompatibilityKey {
            image: self.image,
            aspects: self.encoder.aspect_mask(),
        }
    }

    /// Records a transition of `range` into `layout`.
    ///
    /// `expected_layout` is the layout the subresources must be in before the transition. If
    /// it is `None`, subresources seen for the first time take `layout` as their initial
    /// layout. Returns `true` if any current layout changed or any subresource became known.
    pub fn set_layout(
        &mut self,
        context: &RecordingContext,
        range: &SubresourceRange,
        layout: ImageLayout,
        expected_layout: Option<ImageLayout>,
    ) -> bool {
        puffin::profile_function!();

        let range = self.encoder.normalize(range);
        if !self.encoder.in_range(&range) {
            trace!(
                "ignoring layout transition for image {:?} with out of range selector {:?}",
                self.image,
                range
            );
            return false;
        }

        let template = LayoutEntry::new(Some(expected_layout.unwrap_or(layout)), Some(layout));
        let mut updater = LayoutUpdater::new(
            template,
            context,
            None,
            &mut self.initial_layout_states,
        );
        apply_generator(
            &mut self.layout_map,
            RangeGenerator::new(&self.encoder, &range),
            &mut updater,
        )
    }

    /// Records the layout `range` must be in when the recording starts. Subresources that
    /// already have a known state are left alone.
    pub fn set_initial_layout(
        &mut self,
        context: &RecordingContext,
        range: &SubresourceRange,
        layout: ImageLayout,
    ) {
        puffin::profile_function!();

        let range = self.encoder.normalize(range);
        if !self.encoder.in_range(&range) {
            trace!(
                "ignoring initial layout for image {:?} with out of range selector {:?}",
                self.image,
                range
            );
            return;
        }

        let mut updater = LayoutUpdater::new(
            LayoutEntry::new(Some(layout), None),
            context,
            None,
            &mut self.initial_layout_states,
        );
        apply_generator(
            &mut self.layout_map,
            RangeGenerator::new(&self.encoder, &range),
            &mut updater,
        );
    }

    /// Like [`ImageLayoutRegistry::set_initial_layout`] over the subresources of `view`. The
    /// view is recorded in the snapshot. Views of other images are ignored.
    pub fn set_initial_layout_from_view(
        &mut self,
        context: &RecordingContext,
        layout: ImageLayout,
        view: &ImageViewState,
    ) {
        puffin::profile_function!();

        if view.image().id() != self.image {
            trace!(
                "ignoring view {:?} of image {:?} for image {:?}",
                view.id(),
                view.image().id(),
                self.image
            );
            return;
        }

        let mut updater = LayoutUpdater::new(
            LayoutEntry::new(Some(layout), None),
            context,
            Some(view),
            &mut self.initial_layout_states,
        );
        apply_generator(&mut self.layout_map, view.range_generator(), &mut updater);
    }

    /// `true` if `pred` holds for any known range intersecting `range`. Unknown subresources
    /// are skipped. Ranges are passed whole, not clipped to `range`.
    pub fn any_in_range(
        &self,
        range: &SubresourceRange,
        pred: impl FnMut(IndexRange, &LayoutEntry) -> bool,
    ) -> bool {
        let generator = RangeGenerator::new(&self.encoder, &self.encoder.normalize(range));
        self.any_in_generator(generator, pred)
    }

    /// Like [`ImageLayoutRegistry::any_in_range`] for a prebuilt generator.
    pub fn any_in_generator(
        &self,
        generator: RangeGenerator,
        mut pred: impl FnMut(IndexRange, &LayoutEntry) -> bool,
    ) -> bool {
        for range in generator {
            for (stored, entry) in self.layout_map.iter_range(range) {
                if pred(stored, entry) {
                    return true;
                }
            }
        }
        false
    }

    /// Merges everything `other` knows into `self`.
    ///
    /// Both registries must track the same image. Otherwise nothing happens and `false` is
    /// returned. Snapshots referenced by imported entries are copied into this registry's
    /// store. Returns `true` if anything changed.
    pub fn import_from(&mut self, other: &ImageLayoutRegistry) -> bool {
        puffin::profile_function!();

        let key = self.compatibility_key();
        let other_key = other.compatibility_key();
        if key != other_key {
            warn!(
                "refusing to import layouts of {:?} into a registry for {:?}",
                other_key, key
            );
            return false;
        }

        let mut remap = FxHashMap::<SnapshotId, Option<SnapshotId>>::default();
        let mut cursor = RangeCursor::new();
        let mut changed = false;

        for (range, src) in other.layout_map.iter() {
            let mut updater = SpliceUpdater {
                entry: *src,
                source: &other.initial_layout_states,
                store: &mut self.initial_layout_states,
                remap: &mut remap,
            };
            changed |= apply_range(&mut self.layout_map, &mut cursor, range, &mut updater);
        }

        changed
    }

    /// Every known range in ascending order.
    #[inline(always)]
    pub fn iter(&self) -> Entries<'_, LayoutMap> {
        self.layout_map.iter()
    }

    /// Subresource at a linear index.
    #[inline(always)]
    pub fn decode(&self, index: IndexType) -> Option<Subresource> {
        self.encoder.decode(index)
    }

    /// Known range containing `subresource`.
    pub fn entry_at(&self, subresource: Subresource) -> Option<(IndexRange, &LayoutEntry)> {
        if !self.encoder.in_range_subresource(subresource) {
            return None;
        }
        self.layout_map.get(self.encoder.encode(subresource))
    }

    #[inline(always)]
    pub fn snapshot(&self, id: SnapshotId) -> Option<&InitialLayoutState> {
        self.initial_layout_states.get(id)
    }
}

/// Runs `updater` over every range of `generator`, unwrapping the back-end once.
fn apply_generator<U>(map: &mut LayoutMap, generator: RangeGenerator, updater: &mut U) -> bool
where
    U: RangeUpdater<LayoutEntry>,
{
    match map {
        BothRangeMap::Small(map) => apply_all(map, generator, updater),
        BothRangeMap::Sparse(map) => apply_all(map, generator, updater),
    }
}

#[inline(always)]
fn apply_all<M, U>(map: &mut M, generator: RangeGenerator, updater: &mut U) -> bool
where
    M: RangeMap<Value = LayoutEntry>,
    U: RangeUpdater<LayoutEntry>,
{
    let mut cursor = RangeCursor::new();
    let mut changed = false;
    for range in generator {
        changed |= apply_range(map, &mut cursor, range, updater);
    }
    changed
}

/// Fills unknown subresources with a template entry and moves the current layout of known
/// ones. The snapshot is only allocated once the first gap is filled.
struct LayoutUpdater<'a> {
    template: LayoutEntry,
    context: &'a RecordingContext,
    view: Option<&'a ImageViewState>,
    store: &'a mut SnapshotStore,
    allocated: bool,
}

impl<'a> LayoutUpdater<'a> {
    fn new(
        template: LayoutEntry,
        context: &'a RecordingContext,
        view: Option<&'a ImageViewState>,
        store: &'a mut SnapshotStore,
    ) -> Self {
        Self {
            template,
            context,
            view,
            store,
            allocated: false,
        }
    }
}

impl RangeUpdater<LayoutEntry> for LayoutUpdater<'_> {
    fn insert(&mut self, _gap: IndexRange) -> Option<LayoutEntry> {
        if !self.allocated {
            self.allocated = true;
            match self
                .store
                .push(InitialLayoutState::new(self.context, self.view))
            {
                Ok(id) => self.template.state = Some(id),
                Err(err) => error!("unable to record initial layout state: {err}"),
            }
        }
        Some(self.template)
    }

    fn update(&mut self, existing: &LayoutEntry) -> Option<LayoutEntry> {
        if !existing.current_will_change(self.template.current_layout) {
            return None;
        }

        let mut entry = *existing;
        entry.update(&self.template);
        Some(entry)
    }
}

/// Merges one imported entry. Snapshots are copied into the destination store the first time
/// a destination entry takes them.
struct SpliceUpdater<'a> {
    entry: LayoutEntry,
    source: &'a SnapshotStore,
    store: &'a mut SnapshotStore,
    remap: &'a mut FxHashMap<SnapshotId, Option<SnapshotId>>,
}

impl SpliceUpdater<'_> {
    fn copy_state(&mut self) -> Option<SnapshotId> {
        let id = self.entry.state?;
        let source = self.source;
        let store = &mut *self.store;
        *self.remap.entry(id).or_insert_with(|| {
            let state = source.get(id)?.clone();
            match store.push(state) {
                Ok(copied) => Some(copied),
                Err(err) => {
                    error!("unable to copy initial layout state: {err}");
                    None
                }
            }
        })
    }
}

impl RangeUpdater<LayoutEntry> for SpliceUpdater<'_> {
    fn insert(&mut self, _gap: IndexRange) -> Option<LayoutEntry> {
        let mut entry = self.entry;
        entry.state = self.copy_state();
        Some(entry)
    }

    fn update(&mut self, existing: &LayoutEntry) -> Option<LayoutEntry> {
        let mut src = self.entry;
        src.state = match existing.state {
            Some(_) => None,
            None => self.copy_state(),
        };

        let mut entry = *existing;
        entry.update(&src);
        (entry != *existing).then_some(entry)
    }
}
