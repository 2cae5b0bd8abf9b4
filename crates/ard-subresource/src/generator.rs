use ard_range_map::{IndexRange, IndexType};
use smallvec::SmallVec;

use crate::{encoder::RangeEncoder, range::SubresourceRange};

/// Largest contiguous unit a generator can emit in one step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Granularity {
    /// Every mip level and array layer is selected. Runs of consecutive aspects merge.
    Aspect,
    /// Every array layer is selected. One range per aspect covers all selected mips.
    MipLevel,
    /// One range per aspect and mip level.
    ArrayLayer,
}

/// Produces the linear ranges covered by a subresource selector.
///
/// The generator is a plain iterator. Cloning it before iterating gives a copy that starts
/// over. A selector that is out of bounds for the image produces no ranges.
#[derive(Debug, Clone)]
pub struct RangeGenerator {
    /// Linear start of each selected aspect, merged into runs when possible.
    aspect_bases: SmallVec<[(IndexType, IndexType); 4]>,
    granularity: Granularity,
    mip_size: IndexType,
    base_mip: u32,
    mip_count: u32,
    base_layer: u32,
    layer_count: u32,
    aspect_cursor: usize,
    mip_cursor: u32,
}

impl Default for RangeGenerator {
    fn default() -> Self {
        Self {
            aspect_bases: SmallVec::new(),
            granularity: Granularity::Aspect,
            mip_size: 0,
            base_mip: 0,
            mip_count: 0,
            base_layer: 0,
            layer_count: 0,
            aspect_cursor: 0,
            mip_cursor: 0,
        }
    }
}

impl RangeGenerator {
    /// Generator over `range`, which must already be normalized.
    pub fn new(encoder: &RangeEncoder, range: &SubresourceRange) -> Self {
        if !encoder.in_range(range) {
            return Self::default();
        }

        let granularity = if range.layer_count == encoder.array_layers() {
            if range.level_count == encoder.mip_levels() {
                Granularity::Aspect
            } else {
                Granularity::MipLevel
            }
        } else {
            Granularity::ArrayLayer
        };

        // (start, length in indices) per selected aspect
        let mut aspect_bases = SmallVec::<[(IndexType, IndexType); 4]>::new();
        for (idx, aspect) in encoder.aspects().iter().enumerate() {
            if !range.aspects.contains(*aspect) {
                continue;
            }

            let base = idx * encoder.aspect_size();
            if granularity == Granularity::Aspect {
                if let Some(last) = aspect_bases.last_mut() {
                    if last.0 + last.1 == base {
                        last.1 += encoder.aspect_size();
                        continue;
                    }
                }
            }
            aspect_bases.push((base, encoder.aspect_size()));
        }

        Self {
            aspect_bases,
            granularity,
            mip_size: encoder.mip_size(),
            base_mip: range.base_mip_level,
            mip_count: range.level_count,
            base_layer: range.base_array_layer,
            layer_count: range.layer_count,
            aspect_cursor: 0,
            mip_cursor: 0,
        }
    }

    /// Generator over every subresource of the image.
    #[inline(always)]
    pub fn full(encoder: &RangeEncoder) -> Self {
        Self::new(encoder, &encoder.full_range())
    }

    /// `true` if the generator has nothing left to produce.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.aspect_cursor >= self.aspect_bases.len()
    }
}

impl Iterator for RangeGenerator {
    type Item = IndexRange;

    fn next(&mut self) -> Option<IndexRange> {
        let (aspect_base, aspect_len) = *self.aspect_bases.get(self.aspect_cursor)?;

        match self.granularity {
            Granularity::Aspect => {
                self.aspect_cursor += 1;
                Some(IndexRange::new(aspect_base, aspect_base + aspect_len))
            }
            Granularity::MipLevel => {
                self.aspect_cursor += 1;
                let begin = aspect_base + self.base_mip as IndexType * self.mip_size;
                Some(IndexRange::new(
                    begin,
                    begin + self.mip_count as IndexType * self.mip_size,
                ))
            }
            Granularity::ArrayLayer => {
                let mip = (self.base_mip + self.mip_cursor) as IndexType;
                let begin = aspect_base + mip * self.mip_size + self.base_layer as IndexType;

                self.mip_cursor += 1;
                if self.mip_cursor == self.mip_count {
                    self.mip_cursor = 0;
                    self.aspect_cursor += 1;
                }

                Some(IndexRange::new(begin, begin + self.layer_count as IndexType))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let aspects_left = self.aspect_bases.len().saturating_sub(self.aspect_cursor);
        let left = match self.granularity {
            Granularity::Aspect | Granularity::MipLevel => aspects_left,
            Granularity::ArrayLayer if aspects_left == 0 => 0,
            Granularity::ArrayLayer => {
                aspects_left * self.mip_count as usize - self.mip_cursor as usize
            }
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeGenerator {}
