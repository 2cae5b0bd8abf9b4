use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Aspects of an image. Bit values match `VkImageAspectFlagBits`.
    #[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[serde(transparent)]
    pub struct ImageAspects: u32 {
        const COLOR    = 0b0000001;
        const DEPTH    = 0b0000010;
        const STENCIL  = 0b0000100;
        const METADATA = 0b0001000;
        const PLANE_0  = 0b0010000;
        const PLANE_1  = 0b0100000;
        const PLANE_2  = 0b1000000;
    }
}

impl ImageAspects {
    pub const DEPTH_STENCIL: Self = Self::DEPTH.union(Self::STENCIL);
    pub const PLANES: Self = Self::PLANE_0.union(Self::PLANE_1).union(Self::PLANE_2);

    /// Aspects of a multi-planar image with `plane_count` planes.
    #[inline(always)]
    pub fn planes(plane_count: u32) -> Self {
        match plane_count {
            0 => Self::empty(),
            1 => Self::PLANE_0,
            2 => Self::PLANE_0 | Self::PLANE_1,
            _ => Self::PLANES,
        }
    }

    #[inline(always)]
    pub fn is_multi_planar(self) -> bool {
        self.intersects(Self::PLANES)
    }

    /// `true` if exactly one aspect bit is set.
    #[inline(always)]
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }
}
