use ard_range_map::{IndexRange, IndexType};
use smallvec::SmallVec;

use crate::{
    aspect::ImageAspects,
    range::{Subresource, SubresourceRange, REMAINING_ARRAY_LAYERS, REMAINING_MIP_LEVELS},
};

/// Maps the subresources of one image onto the linear domain `[0, subresource_count)`.
///
/// Subresources are ordered by aspect (in ascending bit order), then mip level, then array
/// layer, so all array layers of one aspect and mip level are contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEncoder {
    aspect_mask: ImageAspects,
    aspects: SmallVec<[ImageAspects; 4]>,
    mip_levels: u32,
    array_layers: u32,
    aspect_size: IndexType,
    mip_size: IndexType,
}

impl RangeEncoder {
    pub fn new(aspects: ImageAspects, mip_levels: u32, array_layers: u32) -> Self {
        let aspect_list = aspects
            .iter()
            .filter(|aspect| aspect.is_single())
            .collect::<SmallVec<[ImageAspects; 4]>>();
        let mip_size = array_layers as IndexType;

        Self {
            aspect_mask: aspects,
            aspects: aspect_list,
            mip_levels,
            array_layers,
            aspect_size: mip_size * mip_levels as IndexType,
            mip_size,
        }
    }

    #[inline(always)]
    pub fn aspect_mask(&self) -> ImageAspects {
        self.aspect_mask
    }

    /// Individual aspects of the image in encoding order.
    #[inline(always)]
    pub fn aspects(&self) -> &[ImageAspects] {
        &self.aspects
    }

    #[inline(always)]
    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    #[inline(always)]
    pub fn array_layers(&self) -> u32 {
        self.array_layers
    }

    /// Number of indices occupied by one aspect.
    #[inline(always)]
    pub fn aspect_size(&self) -> IndexType {
        self.aspect_size
    }

    /// Number of indices occupied by one mip level of one aspect.
    #[inline(always)]
    pub fn mip_size(&self) -> IndexType {
        self.mip_size
    }

    /// Size of the linear domain.
    #[inline(always)]
    pub fn subresource_count(&self) -> IndexType {
        self.aspect_size * self.aspects.len()
    }

    /// Selector covering every subresource of the image.
    #[inline(always)]
    pub fn full_range(&self) -> SubresourceRange {
        SubresourceRange {
            aspects: self.aspect_mask,
            base_mip_level: 0,
            level_count: self.mip_levels,
            base_array_layer: 0,
            layer_count: self.array_layers,
        }
    }

    /// Position of `aspect` in the encoding order.
    #[inline(always)]
    pub fn aspect_index(&self, aspect: ImageAspects) -> Option<usize> {
        self.aspects.iter().position(|a| *a == aspect)
    }

    /// Linear index of a subresource. The subresource must be in range.
    #[inline(always)]
    pub fn encode(&self, subresource: Subresource) -> IndexType {
        debug_assert!(self.in_range_subresource(subresource));
        let aspect_index = self.aspect_index(subresource.aspect).unwrap_or_default();
        aspect_index * self.aspect_size
            + subresource.mip_level as IndexType * self.mip_size
            + subresource.array_layer as IndexType
    }

    /// Subresource at a linear index, or `None` if the index is past the domain.
    pub fn decode(&self, index: IndexType) -> Option<Subresource> {
        if index >= self.subresource_count() {
            return None;
        }

        let aspect = self.aspects[index / self.aspect_size];
        let within_aspect = index % self.aspect_size;

        Some(Subresource {
            aspect,
            mip_level: (within_aspect / self.mip_size) as u32,
            array_layer: (within_aspect % self.mip_size) as u32,
        })
    }

    /// `true` if `range` is non-empty, only names aspects of the image and stays within its mip
    /// levels and array layers. `range` must already be normalized.
    pub fn in_range(&self, range: &SubresourceRange) -> bool {
        !range.is_empty()
            && self.aspect_mask.contains(range.aspects)
            && range.mip_levels().end <= self.mip_levels
            && range.array_layers().end <= self.array_layers
    }

    #[inline(always)]
    pub fn in_range_subresource(&self, subresource: Subresource) -> bool {
        subresource.aspect.is_single()
            && self.aspect_mask.contains(subresource.aspect)
            && subresource.mip_level < self.mip_levels
            && subresource.array_layer < self.array_layers
    }

    /// Resolves the "remaining" counts of `range` against this image and replaces a `COLOR`
    /// aspect with the planes of a multi-planar image.
    pub fn normalize(&self, range: &SubresourceRange) -> SubresourceRange {
        let mut out = *range;

        if out.level_count == REMAINING_MIP_LEVELS {
            out.level_count = self.mip_levels.saturating_sub(out.base_mip_level);
        }

        if out.layer_count == REMAINING_ARRAY_LAYERS {
            out.layer_count = self.array_layers.saturating_sub(out.base_array_layer);
        }

        if self.aspect_mask.is_multi_planar() && out.aspects.contains(ImageAspects::COLOR) {
            out.aspects.remove(ImageAspects::COLOR);
            out.aspects |= self.aspect_mask & ImageAspects::PLANES;
        }

        out
    }

    /// Linear range of a single aspect, or an empty range if the image does not have it.
    pub fn aspect_range(&self, aspect: ImageAspects) -> IndexRange {
        match self.aspect_index(aspect) {
            Some(idx) => IndexRange::new(idx * self.aspect_size, (idx + 1) * self.aspect_size),
            None => IndexRange::empty_at(self.subresource_count()),
        }
    }
}
