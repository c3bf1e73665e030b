//! Error types for base shifting.

use thiserror::Error;

/// Result type alias for base shift operations
pub type Result<T> = std::result::Result<T, ShiftError>;

/// Error type for base shift operations
#[derive(Error, Debug)]
pub enum ShiftError {
    /// A stream ended in the middle of a 4-line FASTQ record
    #[error("Malformed {stream} FASTQ: input ended after {lines} of 4 lines of record {record}")]
    MalformedRecord {
        /// Label of the stream (e.g. "source", "destination")
        stream: String,
        /// 1-based number of the incomplete record
        record: u64,
        /// Number of lines of the record that were present
        lines: usize,
    },

    /// The superset stream ended before a record with the wanted id was found
    #[error("{stream} stream exhausted before finding read '{read_id}' (inputs not in the same order, or read missing)")]
    StreamExhausted {
        /// Label of the superset stream
        stream: String,
        /// The normalized read id that was never matched
        read_id: String,
    },

    /// Unrecognized configuration value or an invalid combination of modes
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Read or write failure on an underlying stream
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
