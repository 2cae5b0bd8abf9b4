use ard_range_map::DEFAULT_SMALL_MAP_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTrackerConfig {
    /// Images with at most this many subresources track layouts in a flat table instead of a
    /// tree.
    pub small_map_threshold: usize,
}

impl Default for LayoutTrackerConfig {
    fn default() -> Self {
        Self {
            small_map_threshold: DEFAULT_SMALL_MAP_THRESHOLD,
        }
    }
}
