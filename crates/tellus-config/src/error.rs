//! Configuration error types.

use std::path::PathBuf;

/// Errors from loading, saving, or parsing the config file. The I/O and
/// parse variants carry the offending path so a bad `config.ron` names
/// itself in the log.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config at {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Serialization failure has no file involved yet; nothing was written.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
