//! Error types for the drivers crate.
//!
//! This module provides structured error types for property access,
//! G-code emission and driver profile persistence.

use crate::property::PropertyKind;
use lasercut_core::JobError;
use std::io;
use thiserror::Error;

/// Errors that can occur while driving a job or managing driver profiles.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Writing to the command stream failed.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A property could not be applied.
    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    /// The job was rejected before emission.
    #[error("Job error: {0}")]
    Job(#[from] JobError),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A profile names a driver model that does not exist.
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),
}

/// Errors related to reading and writing driver properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The value has the wrong type for the key.
    #[error("Type mismatch for '{key}': expected {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: PropertyKind,
        found: PropertyKind,
    },

    /// The value has the right type but is not acceptable for the key.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Result type alias for property operations.
pub type PropertyResult<T> = Result<T, PropertyError>;
