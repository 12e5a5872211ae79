//! # LaserCut Drivers
//!
//! G-code driver variants for laser cutters and pen plotters.
//!
//! - [`GenericGcodeDriver`]: plain `G0`/`G1` output with power and feed fields
//! - [`MarlinDriver`]: Marlin firmware defaults, homing and spindle stop
//! - [`DexArmDriver`]: DexArm pen plotter, lifting and dropping the pen on Z
//!
//! Every driver implements [`MotionCommandEmitter`]. Settings are read and
//! written through a string-keyed property interface, persisted with
//! [`DriverProfile`], and jobs are streamed with [`write_job`].

pub mod dexarm;
pub mod emitter;
pub mod error;
pub mod generic;
pub mod job_runner;
pub mod marlin;
pub mod motion;
pub mod profile;
pub mod property;
pub mod registry;
pub mod settings;
pub mod template;
pub mod writer;

pub use dexarm::{DexArmDriver, DexArmSetting};
pub use emitter::MotionCommandEmitter;
pub use error::{DriverError, DriverResult, PropertyError, PropertyResult};
pub use generic::GenericGcodeDriver;
pub use job_runner::{export_job, write_job, JobSummary};
pub use marlin::MarlinDriver;
pub use motion::MotionState;
pub use profile::DriverProfile;
pub use property::{PropertyKind, PropertyValue};
pub use registry::DriverKind;
pub use settings::{GcodeSetting, GcodeSettings, LineEnd};
pub use writer::GcodeWriter;
