//! # LaserCut Core
//!
//! Core types and utilities shared by the LaserCut driver crates.
//! Provides the vector job model, job validation errors and the
//! pixel/millimetre unit conversions every driver relies on.

pub mod error;
pub mod job;
pub mod units;

pub use error::{JobError, JobResult};
pub use job::{LaserJob, PowerSpeedFocusFrequency, VectorCommand, VectorPart};
pub use units::{px_to_mm, MM_PER_INCH};
