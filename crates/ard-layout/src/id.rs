use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicU32, Ordering},
};

/// Declares a process-unique id type backed by its own counter.
macro_rules! unique_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Creates a new id that differs from every id created before it.
            #[inline(always)]
            pub fn next() -> Self {
                static COUNTER: AtomicU32 = AtomicU32::new(1);
                Self(next_non_zero(&COUNTER))
            }

            #[inline(always)]
            pub fn as_idx(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }
    };
}

#[inline(always)]
fn next_non_zero(counter: &AtomicU32) -> NonZeroU32 {
    let id = counter.fetch_add(1, Ordering::Relaxed);
    debug_assert!(id != 0, "id counter wrapped");
    NonZeroU32::new(id).unwrap_or(NonZeroU32::MIN)
}

unique_id!(
    /// Identity of an image.
    ImageId
);

unique_id!(
    /// Identity of an image view.
    ViewId
);

unique_id!(
    /// Identity of a recording context.
    CommandBufferId
);

unique_id!(
    /// Identity of a snapshot store. Keeps snapshot handles from resolving against a store
    /// that did not issue them.
    StoreId
);
