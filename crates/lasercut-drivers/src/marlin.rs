//! Marlin firmware driver
//!
//! Marlin talks over serial only, so the network upload settings are
//! hidden. Jobs home X/Y and switch the spindle off on both ends.

use crate::emitter::MotionCommandEmitter;
use crate::error::PropertyResult;
use crate::generic::GenericGcodeDriver;
use crate::motion::MotionState;
use crate::property::{PropertyKind, PropertyValue};
use crate::settings::{GcodeSetting, GcodeSettings, LineEnd};
use crate::writer::GcodeWriter;
use std::io;

/// Homing and spindle-stop commands appended to the pre-job template.
pub const PRE_JOB_SUFFIX: &str = ",G28 XY,M5";
/// Spindle-stop and homing commands appended to the post-job template.
pub const POST_JOB_SUFFIX: &str = ",M5,G28 XY";

const HIDDEN_SETTINGS: [GcodeSetting; 5] = [
    GcodeSetting::Host,
    GcodeSetting::HttpUploadUrl,
    GcodeSetting::UploadMethod,
    GcodeSetting::AutoPlay,
    GcodeSetting::ApiKey,
];

#[derive(Debug, Clone, PartialEq)]
pub struct MarlinDriver {
    base: GenericGcodeDriver,
}

impl Default for MarlinDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MarlinDriver {
    pub const MODEL_NAME: &'static str = "Marlin";

    pub fn new() -> Self {
        let defaults = GcodeSettings::default();
        let settings = GcodeSettings {
            identification_string: "start".to_string(),
            wait_for_ok: true,
            baud_rate: 115200,
            line_end: LineEnd::Lf,
            init_delay: 1,
            spindle_max: 255.0,
            blank_laser_during_rapids: false,
            upload_method: "serial".to_string(),
            pre_job_gcode: format!("{}{}", defaults.pre_job_gcode, PRE_JOB_SUFFIX),
            post_job_gcode: format!("{}{}", defaults.post_job_gcode, POST_JOB_SUFFIX),
            ..defaults
        };
        Self {
            base: GenericGcodeDriver::with_settings(settings),
        }
    }
}

impl MotionCommandEmitter for MarlinDriver {
    fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn settings(&self) -> &GcodeSettings {
        self.base.settings()
    }

    fn settings_mut(&mut self) -> &mut GcodeSettings {
        self.base.settings_mut()
    }

    fn property_keys(&self) -> Vec<&'static str> {
        let hidden: Vec<&str> = HIDDEN_SETTINGS.iter().map(GcodeSetting::key).collect();
        self.base
            .property_keys()
            .into_iter()
            .filter(|key| !hidden.contains(key))
            .collect()
    }

    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.base.get_property(key)
    }

    fn property_kind(&self, key: &str) -> Option<PropertyKind> {
        self.base.property_kind(key)
    }

    fn set_property(&mut self, key: &str, value: &PropertyValue) -> PropertyResult<()> {
        self.base.set_property(key, value)
    }

    fn move_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        self.base.move_to(out, state, x, y, resolution)
    }

    fn line_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        self.base.line_to(out, state, x, y, resolution)
    }

    fn box_clone(&self) -> Box<dyn MotionCommandEmitter> {
        Box::new(self.clone())
    }
}
