//! DexArm pen-plotter driver
//!
//! The DexArm holds a pen instead of a laser: the pen is lifted (`Z0`) for
//! every travel move and dropped to a configurable depth before every
//! line. Jobs skip Marlin's homing and spindle-stop commands and finish by
//! raising the pen.

use crate::emitter::MotionCommandEmitter;
use crate::error::PropertyResult;
use crate::generic::{line_fields, rapid_move};
use crate::marlin::{MarlinDriver, POST_JOB_SUFFIX, PRE_JOB_SUFFIX};
use crate::motion::MotionState;
use crate::property::{non_negative, PropertyKind, PropertyValue};
use crate::settings::{GcodeSetting, GcodeSettings};
use crate::template;
use crate::writer::GcodeWriter;
use std::io;

/// Command prepended to the post-job template to raise the pen.
const RETURN_TO_Z_ZERO: &str = "G0 Z0";

/// Settings the DexArm adds on top of Marlin's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexArmSetting {
    PenDropDistance,
    LiftPenAfterLine,
}

impl DexArmSetting {
    pub const ALL: [DexArmSetting; 2] = [Self::PenDropDistance, Self::LiftPenAfterLine];

    pub fn key(&self) -> &'static str {
        match self {
            Self::PenDropDistance => "Pen drop distance (mm)",
            Self::LiftPenAfterLine => "Lift pen after every line",
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::PenDropDistance => PropertyKind::Float,
            Self::LiftPenAfterLine => PropertyKind::Boolean,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// Marlin settings the DexArm does not offer: it mirrors the drawing in
/// its own coordinate frame.
const HIDDEN_SETTINGS: [GcodeSetting; 2] = [GcodeSetting::FlipX, GcodeSetting::FlipY];

#[derive(Debug, PartialEq)]
pub struct DexArmDriver {
    base: MarlinDriver,
    /// How far below Z0 the pen is lowered for drawing (mm)
    pen_drop_distance: f64,
    /// Raise the pen after each line instead of only before travel moves
    lift_pen_after_line: bool,
}

impl Default for DexArmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DexArmDriver {
    pub const MODEL_NAME: &'static str = "DexArm Driver";
    pub const DEFAULT_PEN_DROP_DISTANCE: f64 = 10.0;

    pub fn new() -> Self {
        let mut base = MarlinDriver::new();
        let settings = base.settings_mut();
        settings.pre_job_gcode = template::remove_fragment(&settings.pre_job_gcode, PRE_JOB_SUFFIX);
        settings.post_job_gcode = format!(
            "{},{}",
            RETURN_TO_Z_ZERO,
            template::remove_fragment(&settings.post_job_gcode, POST_JOB_SUFFIX)
        );
        Self {
            base,
            pen_drop_distance: Self::DEFAULT_PEN_DROP_DISTANCE,
            lift_pen_after_line: false,
        }
    }

    pub fn pen_drop_distance(&self) -> f64 {
        self.pen_drop_distance
    }

    /// Set how far the pen is lowered. Negative and non-finite distances
    /// are rejected.
    pub fn set_pen_drop_distance(&mut self, distance: f64) -> PropertyResult<()> {
        self.pen_drop_distance = non_negative(DexArmSetting::PenDropDistance.key(), distance)?;
        Ok(())
    }

    pub fn lift_pen_after_line(&self) -> bool {
        self.lift_pen_after_line
    }

    pub fn set_lift_pen_after_line(&mut self, lift: bool) {
        self.lift_pen_after_line = lift;
    }

    /// Copy the whole configuration of `source`, inherited settings included.
    pub fn copy_properties(&mut self, source: &DexArmDriver) {
        *self.base.settings_mut() = source.settings().clone();
        self.pen_drop_distance = source.pen_drop_distance;
        self.lift_pen_after_line = source.lift_pen_after_line;
    }

    fn get(&self, setting: DexArmSetting) -> PropertyValue {
        match setting {
            DexArmSetting::PenDropDistance => self.pen_drop_distance.into(),
            DexArmSetting::LiftPenAfterLine => self.lift_pen_after_line.into(),
        }
    }

    fn set(&mut self, setting: DexArmSetting, value: &PropertyValue) -> PropertyResult<()> {
        let key = setting.key();
        match setting {
            DexArmSetting::PenDropDistance => self.set_pen_drop_distance(value.as_float(key)?),
            DexArmSetting::LiftPenAfterLine => {
                self.set_lift_pen_after_line(value.as_bool(key)?);
                Ok(())
            }
        }
    }

    fn lift_pen(out: &mut GcodeWriter<'_>) -> io::Result<()> {
        out.send_command(RETURN_TO_Z_ZERO)
    }
}

impl Clone for DexArmDriver {
    fn clone(&self) -> Self {
        let mut clone = DexArmDriver::new();
        clone.copy_properties(self);
        clone
    }
}

impl MotionCommandEmitter for DexArmDriver {
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
        let mut keys: Vec<&'static str> = self
            .base
            .property_keys()
            .into_iter()
            .filter(|key| !hidden.contains(key))
            .collect();
        keys.extend(DexArmSetting::ALL.iter().map(DexArmSetting::key));
        keys
    }

    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.base
            .get_property(key)
            .or_else(|| DexArmSetting::from_key(key).map(|setting| self.get(setting)))
    }

    fn property_kind(&self, key: &str) -> Option<PropertyKind> {
        self.base
            .property_kind(key)
            .or_else(|| DexArmSetting::from_key(key).map(|setting| setting.kind()))
    }

    fn set_property(&mut self, key: &str, value: &PropertyValue) -> PropertyResult<()> {
        self.base.set_property(key, value)?;
        match DexArmSetting::from_key(key) {
            Some(setting) => self.set(setting, value),
            None => Ok(()),
        }
    }

    fn move_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        let settings = self.settings();
        let (x, y) = settings.to_machine(x, y, resolution);
        Self::lift_pen(out)?;
        rapid_move(settings, out, state, x, y)
    }

    fn line_to(
        &self,
        out: &mut GcodeWriter<'_>,
        state: &mut MotionState,
        x: f64,
        y: f64,
        resolution: f64,
    ) -> io::Result<()> {
        let settings = self.settings();
        let (x, y) = settings.to_machine(x, y, resolution);
        let fields = line_fields(settings, state);

        out.send_line(format_args!("G0 Z-{}", self.pen_drop_distance))?;
        out.send_line(format_args!("G1 X{:.6} Y{:.6}{}", x, y, fields))?;

        if self.lift_pen_after_line {
            Self::lift_pen(out)?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn MotionCommandEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyError;
    use crate::settings::LineEnd;
    use lasercut_core::PowerSpeedFocusFrequency;

    fn emit<F>(f: F) -> Vec<String>
    where
        F: FnOnce(&mut GcodeWriter<'_>),
    {
        let mut buf = Vec::new();
        {
            let mut out = GcodeWriter::new(&mut buf, LineEnd::Lf);
            f(&mut out);
        }
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_templates_drop_homing_and_raise_pen() {
        let driver = DexArmDriver::new();
        let settings = driver.settings();
        assert_eq!(settings.pre_job_gcode, "G21,G90");
        assert_eq!(settings.post_job_gcode, "G0 Z0,G0 X0 Y0");
        assert!(!settings.pre_job_gcode.contains("G28 XY"));
        assert!(!settings.pre_job_gcode.contains("M5"));
        assert!(settings.post_job_gcode.starts_with("G0 Z0"));
        assert!(!settings.post_job_gcode.contains("M5"));
        assert!(!settings.post_job_gcode.contains("G28 XY"));
    }

    #[test]
    fn test_move_lifts_pen_first() {
        let driver = DexArmDriver::new();
        let mut state = MotionState::new();
        let lines = emit(|out| driver.move_to(out, &mut state, 100.0, 100.0, 100.0).unwrap());
        assert_eq!(lines, vec!["G0 Z0", "G0 X25.400000 Y25.400000 F3600"]);
        assert_eq!(state.current_speed, Some(3600.0));
    }

    #[test]
    fn test_move_with_blanking() {
        let mut driver = DexArmDriver::new();
        driver.settings_mut().blank_laser_during_rapids = true;
        let mut state = MotionState::new();
        let lines = emit(|out| driver.move_to(out, &mut state, 0.0, 0.0, 100.0).unwrap());
        assert_eq!(lines, vec!["G0 Z0", "G0 X0.000000 Y0.000000 F3600 S0"]);
        assert_eq!(state.current_power, Some(0.0));
    }

    #[test]
    fn test_line_drops_pen_without_lifting() {
        let driver = DexArmDriver::new();
        let mut state = MotionState::new();
        let lines = emit(|out| {
            driver.move_to(out, &mut state, 0.0, 0.0, 100.0).unwrap();
            driver.line_to(out, &mut state, 5.0, 5.0, 100.0).unwrap();
        });
        assert_eq!(
            lines,
            vec![
                "G0 Z0",
                "G0 X0.000000 Y0.000000 F3600",
                "G0 Z-10",
                "G1 X1.270000 Y1.270000",
            ]
        );
    }

    #[test]
    fn test_line_lifts_pen_when_configured() {
        let mut driver = DexArmDriver::new();
        driver.set_lift_pen_after_line(true);
        let mut state = MotionState::new();
        let lines = emit(|out| driver.line_to(out, &mut state, 5.0, 5.0, 100.0).unwrap());
        assert_eq!(lines, vec!["G0 Z-10", "G1 X1.270000 Y1.270000", "G0 Z0"]);
    }

    #[test]
    fn test_line_uses_configured_pen_drop() {
        let mut driver = DexArmDriver::new();
        driver.set_pen_drop_distance(2.5).unwrap();
        let mut state = MotionState::new();
        let lines = emit(|out| driver.line_to(out, &mut state, 0.0, 0.0, 100.0).unwrap());
        assert_eq!(lines[0], "G0 Z-2.5");
    }

    #[test]
    fn test_line_fields_power_before_speed() {
        let driver = DexArmDriver::new();
        let mut state = MotionState::new();
        driver.set_current_property(&mut state, &PowerSpeedFocusFrequency::new(100.0, 50.0));
        let lines = emit(|out| {
            driver.line_to(out, &mut state, 0.0, 0.0, 100.0).unwrap();
            driver.line_to(out, &mut state, 100.0, 0.0, 100.0).unwrap();
        });
        // Marlin scales 100% power to S255; 50% of 1200 mm/min is F600
        assert_eq!(lines[1], "G1 X0.000000 Y0.000000 S255.000000 F600");
        assert_eq!(lines[3], "G1 X25.400000 Y0.000000");
    }

    #[test]
    fn test_flip_mirrors_about_bed() {
        let mut driver = DexArmDriver::new();
        driver.settings_mut().flip_x = true;
        driver.settings_mut().flip_y = true;
        let mut state = MotionState::new();
        let lines = emit(|out| driver.line_to(out, &mut state, 100.0, 100.0, 100.0).unwrap());
        assert_eq!(lines[1], "G1 X224.600000 Y254.600000");
    }

    #[test]
    fn test_property_keys() {
        let driver = DexArmDriver::new();
        let keys = driver.property_keys();
        assert!(!keys.contains(&"Flip X Axis"));
        assert!(!keys.contains(&"Flip Y Axis"));
        assert_eq!(
            keys.iter().filter(|k| **k == "Pen drop distance (mm)").count(),
            1
        );
        assert_eq!(
            keys.iter().filter(|k| **k == "Lift pen after every line").count(),
            1
        );
        assert_eq!(
            &keys[keys.len() - 2..],
            &["Pen drop distance (mm)", "Lift pen after every line"]
        );

        let marlin_keys = MarlinDriver::new().property_keys();
        assert_eq!(keys.len(), marlin_keys.len());
        let inherited: Vec<&str> = marlin_keys
            .into_iter()
            .filter(|k| *k != "Flip X Axis" && *k != "Flip Y Axis")
            .collect();
        assert_eq!(&keys[..keys.len() - 2], inherited.as_slice());
    }

    #[test]
    fn test_get_property() {
        let driver = DexArmDriver::new();
        assert_eq!(
            driver.get_property("Pen drop distance (mm)"),
            Some(PropertyValue::Float(10.0))
        );
        assert_eq!(
            driver.get_property("Lift pen after every line"),
            Some(PropertyValue::Boolean(false))
        );
        assert_eq!(
            driver.get_property("Laserbed width"),
            Some(PropertyValue::Float(250.0))
        );
        assert_eq!(driver.get_property("Nonexistent"), None);
    }

    #[test]
    fn test_set_property() {
        let mut driver = DexArmDriver::new();
        driver
            .set_property("Pen drop distance (mm)", &PropertyValue::Float(4.0))
            .unwrap();
        driver
            .set_property("Lift pen after every line", &PropertyValue::Boolean(true))
            .unwrap();
        driver
            .set_property("Laserbed width", &PropertyValue::Float(300.0))
            .unwrap();
        assert_eq!(driver.pen_drop_distance(), 4.0);
        assert!(driver.lift_pen_after_line());
        assert_eq!(driver.settings().bed_width, 300.0);

        // unknown keys are ignored
        driver
            .set_property("Nonexistent", &PropertyValue::Boolean(true))
            .unwrap();
    }

    #[test]
    fn test_set_property_type_mismatch() {
        let mut driver = DexArmDriver::new();
        let err = driver
            .set_property("Pen drop distance (mm)", &PropertyValue::from("deep"))
            .unwrap_err();
        assert!(matches!(
            err,
            PropertyError::TypeMismatch {
                expected: PropertyKind::Float,
                found: PropertyKind::Text,
                ..
            }
        ));
        assert!(driver
            .set_property("Lift pen after every line", &PropertyValue::Integer(1))
            .is_err());
        assert!(driver
            .set_property("Pen drop distance (mm)", &PropertyValue::Float(f64::NAN))
            .is_err());
        assert_eq!(driver.pen_drop_distance(), 10.0);
        assert!(!driver.lift_pen_after_line());
    }

    #[test]
    fn test_negative_pen_drop_rejected() {
        let mut driver = DexArmDriver::new();
        let err = driver
            .set_property("Pen drop distance (mm)", &PropertyValue::Float(-5.0))
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidValue { .. }));
        assert_eq!(driver.pen_drop_distance(), 10.0);

        let mut state = MotionState::new();
        let lines = emit(|out| driver.line_to(out, &mut state, 0.0, 0.0, 100.0).unwrap());
        assert_eq!(lines[0], "G0 Z-10");
        assert!(lines.iter().all(|line| !line.contains("Z--")));
    }

    #[test]
    fn test_zero_pen_drop_keeps_pen_at_surface() {
        let mut driver = DexArmDriver::new();
        driver
            .set_property("Pen drop distance (mm)", &PropertyValue::Float(0.0))
            .unwrap();
        let mut state = MotionState::new();
        let lines = emit(|out| driver.line_to(out, &mut state, 0.0, 0.0, 100.0).unwrap());
        assert_eq!(lines[0], "G0 Z-0");
    }

    #[test]
    fn test_property_kind() {
        let driver = DexArmDriver::new();
        assert_eq!(
            driver.property_kind("Pen drop distance (mm)"),
            Some(PropertyKind::Float)
        );
        assert_eq!(
            driver.property_kind("Lift pen after every line"),
            Some(PropertyKind::Boolean)
        );
        assert_eq!(
            driver.property_kind("Baud Rate (Serial)"),
            Some(PropertyKind::Integer)
        );
        for key in driver.property_keys() {
            let value = driver.get_property(key).unwrap();
            assert_eq!(driver.property_kind(key), Some(value.kind()), "{key}");
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = DexArmDriver::new();
        original.set_pen_drop_distance(7.0).unwrap();
        original.settings_mut().flip_x = true;
        original.settings_mut().bed_width = 320.0;

        let mut clone = original.clone();
        for key in original.property_keys() {
            assert_eq!(original.get_property(key), clone.get_property(key), "{key}");
        }
        // flip flags are not listed but still carried over
        assert!(clone.settings().flip_x);

        clone.set_pen_drop_distance(1.0).unwrap();
        assert_eq!(original.pen_drop_distance(), 7.0);
        assert_eq!(clone.pen_drop_distance(), 1.0);
    }
}
