use std::sync::Arc;

use ard_log::trace;
use ard_subresource::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::LayoutTrackerConfig,
    global::GlobalImageLayoutMap,
    id::{ImageId, ViewId},
    layout::ImageLayout,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCreateInfo {
    pub aspects: ImageAspects,
    pub mip_levels: u32,
    pub array_layers: u32,
    pub initial_layout: ImageLayout,
    pub debug_name: Option<String>,
}

impl Default for ImageCreateInfo {
    fn default() -> Self {
        Self {
            aspects: ImageAspects::COLOR,
            mip_levels: 1,
            array_layers: 1,
            initial_layout: ImageLayout::Undefined,
            debug_name: None,
        }
    }
}

/// Everything the layout tracker knows about an image outside of any recording.
#[derive(Debug)]
pub struct ImageState {
    id: ImageId,
    create_info: ImageCreateInfo,
    encoder: Arc<RangeEncoder>,
    layout_map: Arc<GlobalImageLayoutMap>,
}

impl ImageState {
    /// Creates the image with every subresource in `create_info.initial_layout`.
    pub fn new(create_info: ImageCreateInfo, config: &LayoutTrackerConfig) -> Self {
        let encoder = Arc::new(RangeEncoder::new(
            create_info.aspects,
            create_info.mip_levels,
            create_info.array_layers,
        ));
        let layout_map = Self::fresh_layout_map(&encoder, &create_info, config);

        Self {
            id: ImageId::next(),
            create_info,
            encoder,
            layout_map,
        }
    }

    /// Creates an image bound to the same memory as `alias`.
    ///
    /// Aliases with identical aspects, mip levels and array layers share one device-wide layout
    /// map. Otherwise the new image gets its own map.
    pub fn new_aliased(
        create_info: ImageCreateInfo,
        config: &LayoutTrackerConfig,
        alias: &ImageState,
    ) -> Self {
        let encoder = Arc::new(RangeEncoder::new(
            create_info.aspects,
            create_info.mip_levels,
            create_info.array_layers,
        ));

        // Same aspects, mip levels and array layers, so indices mean the same subresource
        let layout_map = if *encoder == *alias.encoder {
            alias.layout_map.clone()
        } else {
            Self::fresh_layout_map(&encoder, &create_info, config)
        };

        Self {
            id: ImageId::next(),
            create_info,
            encoder,
            layout_map,
        }
    }

    fn fresh_layout_map(
        encoder: &RangeEncoder,
        create_info: &ImageCreateInfo,
        config: &LayoutTrackerConfig,
    ) -> Arc<GlobalImageLayoutMap> {
        let map = GlobalImageLayoutMap::new(
            encoder.subresource_count(),
            config.small_map_threshold,
        );
        map.set_layout_generator(RangeGenerator::full(encoder), create_info.initial_layout);
        Arc::new(map)
    }

    #[inline(always)]
    pub fn id(&self) -> ImageId {
        self.id
    }

    #[inline(always)]
    pub fn create_info(&self) -> &ImageCreateInfo {
        &self.create_info
    }

    #[inline(always)]
    pub fn encoder(&self) -> &Arc<RangeEncoder> {
        &self.encoder
    }

    #[inline(always)]
    pub fn layout_map(&self) -> &Arc<GlobalImageLayoutMap> {
        &self.layout_map
    }

    /// `true` if both images write into the same device-wide layout map.
    #[inline(always)]
    pub fn shares_layout_map(&self, other: &ImageState) -> bool {
        Arc::ptr_eq(&self.layout_map, &other.layout_map)
    }

    #[inline(always)]
    pub fn normalize(&self, range: &SubresourceRange) -> SubresourceRange {
        self.encoder.normalize(range)
    }

    /// Generator over `range`. Empty if `range` does not fit the image.
    #[inline(always)]
    pub fn range_generator(&self, range: &SubresourceRange) -> RangeGenerator {
        RangeGenerator::new(&self.encoder, &self.normalize(range))
    }

    /// Records that `range` is now in `layout` device-wide. Returns `true` if anything changed.
    pub fn set_image_layout(&self, range: &SubresourceRange, layout: ImageLayout) -> bool {
        let range = self.normalize(range);
        if !self.encoder.in_range(&range) {
            trace!(
                "ignoring layout update for image {:?} with out of range selector {:?}",
                self.id,
                range
            );
            return false;
        }

        self.layout_map
            .set_layout_generator(RangeGenerator::new(&self.encoder, &range), layout)
    }

    /// Device-wide layout of a single subresource.
    pub fn layout_of(&self, subresource: Subresource) -> Option<ImageLayout> {
        if !self.encoder.in_range_subresource(subresource) {
            return None;
        }
        self.layout_map.layout_at(self.encoder.encode(subresource))
    }
}

/// A view into a subset of an image's subresources.
#[derive(Debug, Clone)]
pub struct ImageViewState {
    id: ViewId,
    image: Arc<ImageState>,
    subresource_range: SubresourceRange,
    range_generator: RangeGenerator,
}

impl ImageViewState {
    pub fn new(image: Arc<ImageState>, subresource_range: &SubresourceRange) -> Self {
        let subresource_range = image.normalize(subresource_range);
        let range_generator = RangeGenerator::new(image.encoder(), &subresource_range);

        Self {
            id: ViewId::next(),
            image,
            subresource_range,
            range_generator,
        }
    }

    #[inline(always)]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[inline(always)]
    pub fn image(&self) -> &Arc<ImageState> {
        &self.image
    }

    /// The normalized range the view covers.
    #[inline(always)]
    pub fn subresource_range(&self) -> &SubresourceRange {
        &self.subresource_range
    }

    /// Fresh generator over the view's subresources.
    #[inline(always)]
    pub fn range_generator(&self) -> RangeGenerator {
        self.range_generator.clone()
    }
}
