use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::aspect::ImageAspects;

/// Selects every mip level from `base_mip_level` to the last one of the image.
pub const REMAINING_MIP_LEVELS: u32 = u32::MAX;

/// Selects every array layer from `base_array_layer` to the last one of the image.
pub const REMAINING_ARRAY_LAYERS: u32 = u32::MAX;

/// A single subresource of an image.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subresource {
    /// Exactly one aspect bit.
    pub aspect: ImageAspects,
    pub mip_level: u32,
    pub array_layer: u32,
}

/// Selects a block of subresources: every combination of the given aspects, mip levels and
/// array layers.
///
/// The counts may use [`REMAINING_MIP_LEVELS`] and [`REMAINING_ARRAY_LAYERS`]. Such a range must
/// be normalized against an image (see
/// [`RangeEncoder::normalize`](crate::encoder::RangeEncoder::normalize)) before it denotes
/// concrete subresources.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubresourceRange {
    pub aspects: ImageAspects,
    pub base_mip_level: u32,
    pub level_count: u32,
    pub base_array_layer: u32,
    pub layer_count: u32,
}

impl SubresourceRange {
    /// Every subresource of the given aspects.
    #[inline(always)]
    pub const fn all(aspects: ImageAspects) -> Self {
        Self {
            aspects,
            base_mip_level: 0,
            level_count: REMAINING_MIP_LEVELS,
            base_array_layer: 0,
            layer_count: REMAINING_ARRAY_LAYERS,
        }
    }

    /// Just `subresource`.
    #[inline(always)]
    pub const fn single(subresource: Subresource) -> Self {
        Self {
            aspects: subresource.aspect,
            base_mip_level: subresource.mip_level,
            level_count: 1,
            base_array_layer: subresource.array_layer,
            layer_count: 1,
        }
    }

    /// Mip levels covered. Only meaningful once normalized.
    #[inline(always)]
    pub fn mip_levels(&self) -> Range<u32> {
        self.base_mip_level..self.base_mip_level.saturating_add(self.level_count)
    }

    /// Array layers covered. Only meaningful once normalized.
    #[inline(always)]
    pub fn array_layers(&self) -> Range<u32> {
        self.base_array_layer..self.base_array_layer.saturating_add(self.layer_count)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.aspects.is_empty() || self.level_count == 0 || self.layer_count == 0
    }
}
