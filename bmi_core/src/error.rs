//! Errors surfaced by the BMI log.
//!
//! History reads and writes never reach the caller as errors; the store logs
//! them and degrades to an empty or unsaved history. What remains here is for
//! config loading, backends and CSV export.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem failure in a backend, config file or export target
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// History blob that is not a JSON array, or a record that fails to encode
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `config.toml` that does not parse
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Parsed config with an unusable value, e.g. a history key that cannot
    /// name a file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend refused the request, e.g. a key that cannot name a file
    #[error("Storage error: {0}")]
    Storage(String),
}
