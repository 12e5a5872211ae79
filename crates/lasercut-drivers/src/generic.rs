//! Generic G-code driver
//!
//! Emits `G0` for travel and `G1` for drawing moves, with `S` (power) and
//! `F` (feed) fields only when they change. The Marlin and DexArm drivers
//! build on the helpers here.

use crate::emitter::MotionCommandEmitter;
use crate::error::PropertyResult;
use crate::motion::MotionState;
use crate::property::{PropertyKind, PropertyValue};
use crate::settings::{GcodeSetting, GcodeSettings};
use crate::writer::GcodeWriter;
use std::io;

/// Feed rate for a speed given in percent of `max_speed`, truncated.
pub(crate) fn feed_rate(settings: &GcodeSettings, speed_percent: f64) -> i64 {
    (settings.max_speed * speed_percent / 100.0) as i64
}

/// The optional ` S…` and ` F…` fields of a drawing move, power first.
///
/// Only values that differ from the last emitted ones are included, and
/// the state is updated for every included field.
pub(crate) fn line_fields(settings: &GcodeSettings, state: &mut MotionState) -> String {
    let mut fields = String::new();
    if let Some(power) = state.take_power_change() {
        fields.push_str(&format!(" S{:.6}", power));
    }
    if let Some(speed) = state.take_speed_change() {
        fields.push_str(&format!(" F{}", feed_rate(settings, speed)));
    }
    fields
}

/// Emit the `G0` travel command to an already transformed point.
pub(crate) fn rapid_move(
    settings: &GcodeSettings,
    out: &mut GcodeWriter<'_>,
    state: &mut MotionState,
    x: f64,
    y: f64,
) -> io::Result<()> {
    let travel = settings.travel_speed as i64;
    state.current_speed = Some(settings.travel_speed);
    if settings.blank_laser_during_rapids {
        state.current_power = Some(0.0);
        out.send_line(format_args!("G0 X{:.6} Y{:.6} F{} S0", x, y, travel))
    } else {
        out.send_line(format_args!("G0 X{:.6} Y{:.6} F{}", x, y, travel))
    }
}

/// Driver for controllers that accept plain G-code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericGcodeDriver {
    settings: GcodeSettings,
}

impl GenericGcodeDriver {
    pub const MODEL_NAME: &'static str = "Generic GCode Driver";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: GcodeSettings) -> Self {
        Self { settings }
    }
}

impl MotionCommandEmitter for GenericGcodeDriver {
    fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn settings(&self) -> &GcodeSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut GcodeSettings {
        &mut self.settings
    }

    fn property_keys(&self) -> Vec<&'static str> {
        GcodeSetting::ALL.iter().map(GcodeSetting::key).collect()
    }

    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.settings.get_property(key)
    }

    fn property_kind(&self, key: &str) -> Option<PropertyKind> {
        GcodeSetting::from_key(key).map(|setting| setting.kind())
    }

    fn set_property(&mut self, key: &str, value: &PropertyValue) -> PropertyResult<()> {
        self.settings.set_property(key, value)
    }

    fn move_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        let (x, y) = self.settings.to_machine(x, y, resolution);
        rapid_move(&self.settings, out, state, x, y)
    }

    fn line_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        let (x, y) = self.settings.to_machine(x, y, resolution);
        let fields = line_fields(&self.settings, state);
        out.send_line(format_args!("G1 X{:.6} Y{:.6}{}", x, y, fields))
    }

    fn box_clone(&self) -> Box<dyn MotionCommandEmitter> {
        Box::new(self.clone())
    }
}
