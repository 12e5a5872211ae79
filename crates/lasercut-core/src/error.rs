//! Error types for the core crate.
//!
//! Jobs are validated before any driver emits a single line, so every
//! problem a job can carry is reported here rather than half-way through
//! a command stream.

use std::io;
use thiserror::Error;

/// Errors raised while loading or validating a laser job.
#[derive(Error, Debug)]
pub enum JobError {
    /// A vector part declares a resolution that cannot be used for unit conversion.
    #[error("Invalid resolution in part {part}: {dpi} DPI")]
    InvalidResolution {
        /// Index of the offending part.
        part: usize,
        /// The declared resolution.
        dpi: f64,
    },

    /// A move or line command carries a NaN or infinite coordinate.
    #[error("Non-finite coordinate in part {part}, command {command}")]
    NonFiniteCoordinate {
        /// Index of the offending part.
        part: usize,
        /// Index of the offending command within the part.
        command: usize,
    },

    /// A power or speed percentage lies outside 0..=100.
    #[error("{field} out of range in part {part}, command {command}: {value} (valid: 0..100)")]
    PercentageOutOfRange {
        /// Either `power` or `speed`.
        field: &'static str,
        /// The offending value.
        value: f64,
        /// Index of the offending part.
        part: usize,
        /// Index of the offending command within the part.
        command: usize,
    },

    /// I/O error while reading a job file.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for job operations.
pub type JobResult<T> = Result<T, JobError>;
