use ard_subresource::prelude::SubresourceRange;
use rustc_hash::FxHashMap;

use crate::{
    config::LayoutTrackerConfig,
    id::{CommandBufferId, ImageId},
    image::{ImageState, ImageViewState},
    layout::ImageLayout,
    registry::ImageLayoutRegistry,
};

/// What the layout tracker knows about the recording context issuing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingContext {
    pub id: CommandBufferId,
    pub debug_label: Option<String>,
}

impl RecordingContext {
    pub fn new(debug_label: Option<String>) -> Self {
        Self {
            id: CommandBufferId::next(),
            debug_label,
        }
    }
}

/// Layouts recorded by one recording context, one registry per image.
#[derive(Debug)]
pub struct CommandBufferLayouts {
    context: RecordingContext,
    config: LayoutTrackerConfig,
    registries: FxHashMap<ImageId, ImageLayoutRegistry>,
}

impl CommandBufferLayouts {
    pub fn new(context: RecordingContext, config: LayoutTrackerConfig) -> Self {
        Self {
            context,
            config,
            registries: FxHashMap::default(),
        }
    }

    #[inline(always)]
    pub fn context(&self) -> &RecordingContext {
        &self.context
    }

    #[inline(always)]
    pub fn registry(&self, image: ImageId) -> Option<&ImageLayoutRegistry> {
        self.registries.get(&image)
    }

    /// Registry for `image`, created empty on first use.
    pub fn registry_mut(&mut self, image: &ImageState) -> &mut ImageLayoutRegistry {
        let config = &self.config;
        self.registries
            .entry(image.id())
            .or_insert_with(|| ImageLayoutRegistry::new(image, config))
    }

    pub fn set_layout(
        &mut self,
        image: &ImageState,
        range: &SubresourceRange,
        layout: ImageLayout,
        expected_layout: Option<ImageLayout>,
    ) -> bool {
        let config = &self.config;
        self.registries
            .entry(image.id())
            .or_insert_with(|| ImageLayoutRegistry::new(image, config))
            .set_layout(&self.context, range, layout, expected_layout)
    }

    pub fn set_initial_layout(
        &mut self,
        image: &ImageState,
        range: &SubresourceRange,
        layout: ImageLayout,
    ) {
        let config = &self.config;
        self.registries
            .entry(image.id())
            .or_insert_with(|| ImageLayoutRegistry::new(image, config))
            .set_initial_layout(&self.context, range, layout);
    }

    pub fn set_initial_layout_from_view(&mut self, view: &ImageViewState, layout: ImageLayout) {
        let config = &self.config;
        let image = view.image();
        self.registries
            .entry(image.id())
            .or_insert_with(|| ImageLayoutRegistry::new(image, config))
            .set_initial_layout_from_view(&self.context, layout, view);
    }

    /// Merges everything `secondary` recorded into this recording, as happens when this
    /// recording executes `secondary`. Returns `true` if anything changed.
    pub fn execute_commands(&mut self, secondary: &CommandBufferLayouts) -> bool {
        puffin::profile_function!();

        let mut changed = false;
        for (image, src) in &secondary.registries {
            let dst = self
                .registries
                .entry(*image)
                .or_insert_with(|| src.empty_like());
            changed |= dst.import_from(src);
        }
        changed
    }

    /// Forgets everything recorded so far. The context keeps its identity.
    pub fn reset(&mut self) {
        self.registries.clear();
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (&ImageId, &ImageLayoutRegistry)> {
        self.registries.iter()
    }
}
