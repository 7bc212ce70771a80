//! Error types for the observer's I/O boundary.
//!
//! The projection path itself is total and never fails. Errors only arise
//! when event batches or configuration are read from outside the process.

use crate::config::ConfigError;

/// Errors that can occur while feeding the timeline.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// An event record or batch could not be decoded.
    #[error("failed to decode event at line {line}: {source}")]
    Decode {
        /// One-based input line that failed.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// One element of a JSON array batch is not a valid event.
    #[error("failed to decode event at array element {position}: {source}")]
    DecodeElement {
        /// One-based position of the element in the array.
        position: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading an input file failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
