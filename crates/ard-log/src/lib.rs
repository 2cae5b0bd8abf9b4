use std::path::PathBuf;

// Re-export logging functions for convenience.
pub use log::*;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{runtime::ConfigErrors, Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Logs below this level are dropped.
    pub level: LevelFilter,
    /// Mirror logs to stdout.
    pub console: bool,
    /// Directory receiving one log file per run. No file is written when `None`.
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            console: true,
            directory: Some(PathBuf::from("./logs")),
        }
    }
}

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("unable to open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid logging configuration: {0}")]
    Config(#[from] ConfigErrors),
    #[error("a logger is already installed: {0}")]
    SetLogger(#[from] SetLoggerError),
}

/// Initializes logging. Should be called before any other logging functions. Panics are
/// logged once this returns.
pub fn init(settings: &LogSettings) -> Result<(), LogInitError> {
    let mut config = Config::builder();
    let mut root = Root::builder();

    // Output to console
    if settings.console {
        let stdout = ConsoleAppender::builder().build();
        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    // Output to log file. Name of the file is based on the current time.
    if let Some(directory) = &settings.directory {
        let now = chrono::Local::now();
        let log_file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
            .build(directory.join(format!("{}.txt", now.format("%Y-%m-%d %H-%M-%S"))))?;
        config = config.appender(Appender::builder().build("log_file", Box::new(log_file)));
        root = root.appender("log_file");
    }

    let config = config.build(root.build(settings.level))?;
    log4rs::init_config(config)?;

    log_panics::init();

    Ok(())
}
