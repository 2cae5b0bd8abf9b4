use std::path::Path;

use ard_layout::config::LayoutTrackerConfig;
use ard_log::LogSettings;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the validation layer reads from its settings file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub log: LogSettings,
    pub layouts: LayoutTrackerConfig,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("unable to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

impl ValidationSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(ron::de::from_reader(reader)?)
    }

    pub fn from_ron(src: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(src)?)
    }

    pub fn to_ron(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        ron::ser::to_writer_pretty(writer, self, PrettyConfig::default())?;
        Ok(())
    }
}
