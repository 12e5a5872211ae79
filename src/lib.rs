//! # LaserCut
//!
//! G-code drivers for laser cutters and pen plotters, with a DexArm
//! pen-plotter driver.
//!
//! ## Architecture
//!
//! LaserCut is organized as a workspace with multiple crates:
//!
//! 1. **lasercut-core** - Job model, vector commands, unit conversion
//! 2. **lasercut-drivers** - Driver variants, settings, profiles, job runner
//! 3. **lasercut** - Command line front end that integrates both crates

pub use lasercut_core::{
    px_to_mm, JobError, JobResult, LaserJob, PowerSpeedFocusFrequency, VectorCommand, VectorPart,
    MM_PER_INCH,
};

pub use lasercut_drivers::{
    export_job, write_job, DexArmDriver, DriverError, DriverKind, DriverProfile, DriverResult,
    GcodeSetting, GcodeSettings, GcodeWriter, GenericGcodeDriver, JobSummary, LineEnd,
    MarlinDriver, MotionCommandEmitter, MotionState, PropertyError, PropertyKind, PropertyValue,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout free for G-code
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
