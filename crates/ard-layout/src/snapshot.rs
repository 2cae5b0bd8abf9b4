use ard_subresource::prelude::ImageAspects;
use thiserror::Error;

use crate::{
    command_buffer::RecordingContext,
    id::{CommandBufferId, StoreId, ViewId},
    image::ImageViewState,
};

/// Diagnostic record of who first set the initial layout of some subresources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialLayoutState {
    pub command_buffer: CommandBufferId,
    /// Debug label active on the recording context at the time.
    pub label: Option<String>,
    /// View the layout was imported through, if any.
    pub image_view: Option<ViewId>,
    /// Aspects of the view. Empty when there was no view.
    pub aspect_mask: ImageAspects,
}

impl InitialLayoutState {
    pub fn new(context: &RecordingContext, view: Option<&ImageViewState>) -> Self {
        Self {
            command_buffer: context.id,
            label: context.debug_label.clone(),
            image_view: view.map(|view| view.id()),
            aspect_mask: view
                .map(|view| view.subresource_range().aspects)
                .unwrap_or(ImageAspects::empty()),
        }
    }
}

/// Handle to a snapshot inside a [`SnapshotStore`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotId {
    store: StoreId,
    index: u32,
}

impl SnapshotId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("out of memory while growing snapshot storage")]
    OutOfMemory,
    #[error("snapshot storage has no handles left")]
    Exhausted,
}

/// Append-only arena of snapshots owned by one registry.
///
/// Handles stay valid for as long as the store lives. A handle only resolves against the store
/// that issued it.
#[derive(Debug)]
pub struct SnapshotStore {
    id: StoreId,
    snapshots: Vec<InitialLayoutState>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            id: StoreId::next(),
            snapshots: Vec::default(),
        }
    }

    pub fn push(&mut self, state: InitialLayoutState) -> Result<SnapshotId, SnapshotError> {
        let index = u32::try_from(self.snapshots.len()).map_err(|_| SnapshotError::Exhausted)?;
        if index == u32::MAX {
            return Err(SnapshotError::Exhausted);
        }

        self.snapshots
            .try_reserve(1)
            .map_err(|_| SnapshotError::OutOfMemory)?;
        self.snapshots.push(state);

        Ok(SnapshotId {
            store: self.id,
            index,
        })
    }

    #[inline(always)]
    pub fn get(&self, id: SnapshotId) -> Option<&InitialLayoutState> {
        if id.store != self.id {
            return None;
        }
        self.snapshots.get(id.index())
    }

    /// `true` if `id` was issued by this store.
    #[inline(always)]
    pub fn owns(&self, id: SnapshotId) -> bool {
        id.store == self.id
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, InitialLayoutState> {
        self.snapshots.iter()
    }
}
