//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a config file to disk.
    #[error("failed to write config {path}: {source}")]
    Write {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config file held invalid RON.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying RON error with position information.
        source: ron::error::SpannedError,
    },

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
