use crate::{layout::ImageLayout, snapshot::SnapshotId};

/// Layout state of a run of subresources within one recording.
///
/// `None` means "unspecified". Once the initial layout or the snapshot are set they never
/// change. The current layout follows every transition.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayoutEntry {
    /// Layout the recording expects the subresources to be in when it starts executing.
    pub initial_layout: Option<ImageLayout>,
    /// Layout the subresources are in after the last recorded command.
    pub current_layout: Option<ImageLayout>,
    /// Who first recorded the initial layout.
    pub state: Option<SnapshotId>,
}

impl LayoutEntry {
    #[inline(always)]
    pub fn new(initial_layout: Option<ImageLayout>, current_layout: Option<ImageLayout>) -> Self {
        Self {
            initial_layout,
            current_layout,
            state: None,
        }
    }

    /// `true` if merging `new_layout` would move the current layout.
    #[inline(always)]
    pub fn current_will_change(&self, new_layout: Option<ImageLayout>) -> bool {
        new_layout.is_some() && self.current_layout != new_layout
    }

    /// Merges `src` into `self`. Returns `true` if the current layout changed.
    pub fn update(&mut self, src: &LayoutEntry) -> bool {
        let mut updated_current = false;
        if self.current_will_change(src.current_layout) {
            self.current_layout = src.current_layout;
            updated_current = true;
        }

        if self.initial_layout.is_none() {
            self.initial_layout = src.initial_layout;
        }

        if self.state.is_none() {
            self.state = src.state;
        }

        updated_current
    }
}
