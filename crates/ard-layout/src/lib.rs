/// Per-subresource image layout tracking.
///
/// Every image owns a device-wide [`GlobalImageLayoutMap`](global::GlobalImageLayoutMap)
/// shared by every thread that submits work. Each recording context keeps a
/// [`CommandBufferLayouts`](command_buffer::CommandBufferLayouts) holding one
/// [`ImageLayoutRegistry`](registry::ImageLayoutRegistry) per image it touched. A registry
/// remembers, for every subresource, the layout the recording expects on entry, the layout the
/// recording leaves behind, and a snapshot of who first set the expectation.
pub mod command_buffer;
pub mod config;
pub mod entry;
pub mod global;
pub mod id;
pub mod image;
pub mod layout;
pub mod registry;
pub mod snapshot;


pub mod prelude {
    pub use crate::command_buffer::{CommandBufferLayouts, RecordingContext};
    pub use crate::config::LayoutTrackerConfig;
    pub use crate::entry::LayoutEntry;
    pub use crate::global::GlobalImageLayoutMap;
    pub use crate::id::{CommandBufferId, ImageId, ViewId};
    pub use crate::image::{ImageCreateInfo, ImageState, ImageViewState};
    pub use crate::layout::ImageLayout;
    pub use crate::registry::{CompatibilityKey, ImageLayoutRegistry, LayoutMap};
    pub use crate::snapshot::{InitialLayoutState, SnapshotError, SnapshotId, SnapshotStore};
    pub use ard_subresource::prelude::*;
}
