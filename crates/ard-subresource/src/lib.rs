/// Linear addressing of image subresources.
///
/// An image is made of subresources addressed by aspect, mip level and array layer. The
/// [`RangeEncoder`](encoder::RangeEncoder) flattens those into the index domain used by
/// `ard-range-map`, and the [`RangeGenerator`](generator::RangeGenerator) turns a selector into
/// the (few) contiguous index ranges it covers.
pub mod aspect;
pub mod encoder;
pub mod generator;
pub mod range;


pub mod prelude {
    pub use crate::aspect::ImageAspects;
    pub use crate::encoder::RangeEncoder;
    pub use crate::generator::RangeGenerator;
    pub use crate::range::{
        Subresource, SubresourceRange, REMAINING_ARRAY_LAYERS, REMAINING_MIP_LEVELS,
    };
    pub use ard_range_map::{IndexRange, IndexType};
}
