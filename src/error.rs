//! Errors from the preference store. The reader itself has no failure paths.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the config file failed
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid JSON for `Config`
    #[error("config file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// No usable config location on this system
    #[error("no config directory available")]
    NoLocation,
}

pub type Result<T> = std::result::Result<T, StoreError>;
