/// Interval maps keyed by half-open ranges over a linear index domain.
///
/// Two containers implement the [`RangeMap`] interface. [`SmallRangeMap`] is a flat table with
/// one slot per index and is meant for domains with a handful of indices. [`SparseRangeMap`] is
/// a B-tree keyed by range start and scales to large domains. [`BothRangeMap`] picks one of the
/// two at construction time based on the size of the domain.
///
/// All mutation goes through [`apply_range`], which is written once against the interface.
pub mod both;
pub mod cursor;
pub mod map;
pub mod range;
pub mod small;
pub mod sparse;
pub mod update;

#[cfg(test)]
mod tests;

pub use both::*;
pub use cursor::*;
pub use map::*;
pub use range::*;
pub use small::*;
pub use sparse::*;
pub use update::*;

/// Domains with at most this many indices use the flat back-end by default.
pub const DEFAULT_SMALL_MAP_THRESHOLD: usize = 16;
