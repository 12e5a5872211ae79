//! Motion command emitter trait
//!
//! The capability interface implemented by every driver variant. A host
//! holds drivers as `Box<dyn MotionCommandEmitter>`, enumerates and edits
//! their settings through the property methods, and hands them to the job
//! runner, which owns the [`MotionState`] for the duration of a job.

use crate::error::PropertyResult;
use crate::motion::MotionState;
use crate::property::{PropertyKind, PropertyValue};
use crate::settings::GcodeSettings;
use crate::writer::GcodeWriter;
use lasercut_core::PowerSpeedFocusFrequency;
use std::io;

pub trait MotionCommandEmitter: Send + Sync {
    /// Display name of the driver model.
    fn model_name(&self) -> &'static str;

    /// Shared G-code configuration.
    fn settings(&self) -> &GcodeSettings;

    fn settings_mut(&mut self) -> &mut GcodeSettings;

    /// Keys of the settings this driver exposes, in dialog order.
    fn property_keys(&self) -> Vec<&'static str>;

    /// Read a setting by key. Unknown keys yield `None`.
    fn get_property(&self, key: &str) -> Option<PropertyValue>;

    /// Declared value kind of a setting. Unknown keys yield `None`.
    fn property_kind(&self, key: &str) -> Option<PropertyKind>;

    /// Write a setting by key.
    ///
    /// Unknown keys are ignored. A value of the wrong type fails with
    /// [`crate::PropertyError::TypeMismatch`].
    fn set_property(&mut self, key: &str, value: &PropertyValue) -> PropertyResult<()>;

    /// Emit a travel move to `(x, y)`, given in pixels at `resolution` DPI.
    fn move_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()>;

    /// Emit a drawing move to `(x, y)`, given in pixels at `resolution` DPI.
    fn line_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()>;

    /// Record the power and speed requested for the following lines.
    fn set_current_property(&self, state: &mut MotionState, property: &PowerSpeedFocusFrequency) {
        state.next_power = Some(property.power / 100.0 * self.settings().spindle_max);
        state.next_speed = Some(property.speed);
    }

    /// Commands sent before the first part of a job.
    fn pre_job_commands(&self) -> Vec<String> {
        self.settings().pre_job_commands()
    }

    /// Commands sent after the last part of a job.
    fn post_job_commands(&self) -> Vec<String> {
        self.settings().post_job_commands()
    }

    /// An independent copy of this driver with the same configuration.
    fn box_clone(&self) -> Box<dyn MotionCommandEmitter>;

    /// Copy every exposed setting that `source` also has a value for.
    ///
    /// Stops at the first value this driver rejects.
    fn copy_properties_from(&mut self, source: &dyn MotionCommandEmitter) -> PropertyResult<()> {
        for key in self.property_keys() {
            if let Some(value) = source.get_property(key) {
                self.set_property(key, &value)?;
            }
        }
        Ok(())
    }
}

impl Clone for Box<dyn MotionCommandEmitter> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl std::fmt::Debug for dyn MotionCommandEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionCommandEmitter")
            .field("model", &self.model_name())
            .finish_non_exhaustive()
    }
}
