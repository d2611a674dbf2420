//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for sokoni-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a key-value store cannot read or write an entry.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The backing file could not be read, written or removed.
    #[error("history store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The recent-search list could not be serialized.
    #[error("failed to encode recent searches: {0}")]
    Encode(#[from] serde_json::Error),
}
