pub mod settings;

#[cfg(test)]
mod tests;

pub mod log {
    pub use ard_log::*;
}

pub mod range_map {
    pub use ard_range_map::*;
}

pub mod subresource {
    pub use ard_subresource::*;
}

pub mod layout {
    pub use ard_layout::*;
}

pub mod prelude {
    pub use crate::settings::{SettingsError, ValidationSettings};
    pub use ard_layout::prelude::*;
}

use settings::ValidationSettings;

/// Installs logging from `settings`. Should be called once, before any image is tracked.
pub fn init(settings: &ValidationSettings) -> Result<(), ard_log::LogInitError> {
    ard_log::init(&settings.log)?;
    ard_log::info!(
        "image layout tracking ready (small map threshold {})",
        settings.layouts.small_map_threshold
    );
    Ok(())
}
