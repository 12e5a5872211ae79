//! Generic G-code driver settings
//!
//! [`GcodeSettings`] is the configuration every G-code driver variant
//! shares: bed geometry, axis flips, speeds, job templates and the
//! connection settings hosts persist alongside them. [`GcodeSetting`] is
//! the declarative key table over it: each variant names one setting,
//! its string key and its value type.

use crate::error::{PropertyError, PropertyResult};
use crate::property::{non_negative, PropertyKind, PropertyValue};
use crate::template;
use lasercut_core::units::px_to_mm;
use std::fmt;
use std::str::FromStr;

/// Line terminator appended to every emitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnd {
    #[default]
    Lf,
    Cr,
    CrLf,
}

impl LineEnd {
    /// The bytes written after each line.
    pub fn terminator(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => write!(f, "LF"),
            Self::Cr => write!(f, "CR"),
            Self::CrLf => write!(f, "CRLF"),
        }
    }
}

impl FromStr for LineEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LF" => Ok(Self::Lf),
            "CR" => Ok(Self::Cr),
            "CRLF" => Ok(Self::CrLf),
            _ => Err(format!("unknown line end '{}'", s)),
        }
    }
}

/// Settings shared by every G-code driver, in dialog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GcodeSetting {
    ComPort,
    BaudRate,
    Host,
    UploadMethod,
    HttpUploadUrl,
    AutoPlay,
    ApiKey,
    IdentificationString,
    WaitForOk,
    InitDelay,
    SerialTimeout,
    LineEnd,
    BedWidth,
    BedHeight,
    FlipX,
    FlipY,
    MaxSpeed,
    TravelSpeed,
    SpindleMax,
    BlankLaserDuringRapids,
    PreJobGcode,
    PostJobGcode,
    Resolutions,
    FileExportPath,
}

impl GcodeSetting {
    pub const ALL: [GcodeSetting; 24] = [
        Self::ComPort,
        Self::BaudRate,
        Self::Host,
        Self::UploadMethod,
        Self::HttpUploadUrl,
        Self::AutoPlay,
        Self::ApiKey,
        Self::IdentificationString,
        Self::WaitForOk,
        Self::InitDelay,
        Self::SerialTimeout,
        Self::LineEnd,
        Self::BedWidth,
        Self::BedHeight,
        Self::FlipX,
        Self::FlipY,
        Self::MaxSpeed,
        Self::TravelSpeed,
        Self::SpindleMax,
        Self::BlankLaserDuringRapids,
        Self::PreJobGcode,
        Self::PostJobGcode,
        Self::Resolutions,
        Self::FileExportPath,
    ];

    /// The string key hosts use for this setting.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ComPort => "COM Port",
            Self::BaudRate => "Baud Rate (Serial)",
            Self::Host => "IP/Hostname",
            Self::UploadMethod => "Upload method",
            Self::HttpUploadUrl => "HTTP Upload URL",
            Self::AutoPlay => "Start upload automatically",
            Self::ApiKey => "Api-key for Octoprint",
            Self::IdentificationString => "Board Identification String (startsWith)",
            Self::WaitForOk => "Wait for OK after each line (interactive mode)",
            Self::InitDelay => "Seconds to wait for board reset (Serial)",
            Self::SerialTimeout => "Milliseconds to wait for response",
            Self::LineEnd => "Lineend (CR,LF,CRLF)",
            Self::BedWidth => "Laserbed width",
            Self::BedHeight => "Laserbed height",
            Self::FlipX => "Flip X Axis",
            Self::FlipY => "Flip Y Axis",
            Self::MaxSpeed => "Max speed (in mm/min)",
            Self::TravelSpeed => "Travel (non laser moves) speed (in mm/min)",
            Self::SpindleMax => "S value for 100% laser power",
            Self::BlankLaserDuringRapids => "Force laser off during G0 moves",
            Self::PreJobGcode => "Pre-Job GCode (comma separated)",
            Self::PostJobGcode => "Post-Job GCode (comma separated)",
            Self::Resolutions => "Supported DPI (comma separated)",
            Self::FileExportPath => "Path to save exported GCode",
        }
    }

    /// The value type this setting accepts.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::BaudRate | Self::InitDelay | Self::SerialTimeout => PropertyKind::Integer,
            Self::AutoPlay
            | Self::WaitForOk
            | Self::FlipX
            | Self::FlipY
            | Self::BlankLaserDuringRapids => PropertyKind::Boolean,
            Self::BedWidth
            | Self::BedHeight
            | Self::MaxSpeed
            | Self::TravelSpeed
            | Self::SpindleMax => PropertyKind::Float,
            _ => PropertyKind::Text,
        }
    }

    /// Look a setting up by its string key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// Configuration of a generic G-code driver.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeSettings {
    pub com_port: String,
    pub baud_rate: u32,
    pub host: String,
    pub upload_method: String,
    pub http_upload_url: String,
    pub auto_play: bool,
    pub api_key: String,
    pub identification_string: String,
    pub wait_for_ok: bool,
    /// Seconds
    pub init_delay: u32,
    /// Milliseconds
    pub serial_timeout: u32,
    pub line_end: LineEnd,
    /// Bed width in mm
    pub bed_width: f64,
    /// Bed height in mm
    pub bed_height: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Feed rate at 100% speed (mm/min)
    pub max_speed: f64,
    /// Feed rate for travel moves (mm/min)
    pub travel_speed: f64,
    /// S value sent for 100% power
    pub spindle_max: f64,
    pub blank_laser_during_rapids: bool,
    /// Comma separated commands sent before a job
    pub pre_job_gcode: String,
    /// Comma separated commands sent after a job
    pub post_job_gcode: String,
    /// Comma separated DPI values
    pub resolutions: String,
    pub file_export_path: String,
}

impl Default for GcodeSettings {
    fn default() -> Self {
        Self {
            com_port: "auto".to_string(),
            baud_rate: 115200,
            host: String::new(),
            upload_method: "serial".to_string(),
            http_upload_url: String::new(),
            auto_play: false,
            api_key: String::new(),
            identification_string: String::new(),
            wait_for_ok: true,
            init_delay: 5,
            serial_timeout: 15000,
            line_end: LineEnd::Lf,
            bed_width: 250.0,
            bed_height: 280.0,
            flip_x: false,
            flip_y: false,
            max_speed: 20.0 * 60.0,
            travel_speed: 60.0 * 60.0,
            spindle_max: 1.0,
            blank_laser_during_rapids: false,
            pre_job_gcode: "G21,G90".to_string(),
            post_job_gcode: "G0 X0 Y0".to_string(),
            resolutions: "100,150,200,250,300,400,500,600,1000".to_string(),
            file_export_path: String::new(),
        }
    }
}

fn to_u32(key: &str, value: i64) -> PropertyResult<u32> {
    u32::try_from(value).map_err(|_| PropertyError::InvalidValue {
        key: key.to_string(),
        reason: format!("{value} is out of range"),
    })
}

impl GcodeSettings {
    /// Read one setting.
    pub fn get(&self, setting: GcodeSetting) -> PropertyValue {
        match setting {
            GcodeSetting::ComPort => self.com_port.clone().into(),
            GcodeSetting::BaudRate => i64::from(self.baud_rate).into(),
            GcodeSetting::Host => self.host.clone().into(),
            GcodeSetting::UploadMethod => self.upload_method.clone().into(),
            GcodeSetting::HttpUploadUrl => self.http_upload_url.clone().into(),
            GcodeSetting::AutoPlay => self.auto_play.into(),
            GcodeSetting::ApiKey => self.api_key.clone().into(),
            GcodeSetting::IdentificationString => self.identification_string.clone().into(),
            GcodeSetting::WaitForOk => self.wait_for_ok.into(),
            GcodeSetting::InitDelay => i64::from(self.init_delay).into(),
            GcodeSetting::SerialTimeout => i64::from(self.serial_timeout).into(),
            GcodeSetting::LineEnd => self.line_end.to_string().into(),
            GcodeSetting::BedWidth => self.bed_width.into(),
            GcodeSetting::BedHeight => self.bed_height.into(),
            GcodeSetting::FlipX => self.flip_x.into(),
            GcodeSetting::FlipY => self.flip_y.into(),
            GcodeSetting::MaxSpeed => self.max_speed.into(),
            GcodeSetting::TravelSpeed => self.travel_speed.into(),
            GcodeSetting::SpindleMax => self.spindle_max.into(),
            GcodeSetting::BlankLaserDuringRapids => self.blank_laser_during_rapids.into(),
            GcodeSetting::PreJobGcode => self.pre_job_gcode.clone().into(),
            GcodeSetting::PostJobGcode => self.post_job_gcode.clone().into(),
            GcodeSetting::Resolutions => self.resolutions.clone().into(),
            GcodeSetting::FileExportPath => self.file_export_path.clone().into(),
        }
    }

    /// Write one setting, checking the value's type and range.
    ///
    /// Nothing is changed when an error is returned.
    pub fn set(&mut self, setting: GcodeSetting, value: &PropertyValue) -> PropertyResult<()> {
        let key = setting.key();
        match setting {
            GcodeSetting::ComPort => self.com_port = value.as_text(key)?.to_string(),
            GcodeSetting::BaudRate => self.baud_rate = to_u32(key, value.as_integer(key)?)?,
            GcodeSetting::Host => self.host = value.as_text(key)?.to_string(),
            GcodeSetting::UploadMethod => self.upload_method = value.as_text(key)?.to_string(),
            GcodeSetting::HttpUploadUrl => self.http_upload_url = value.as_text(key)?.to_string(),
            GcodeSetting::AutoPlay => self.auto_play = value.as_bool(key)?,
            GcodeSetting::ApiKey => self.api_key = value.as_text(key)?.to_string(),
            GcodeSetting::IdentificationString => {
                self.identification_string = value.as_text(key)?.to_string()
            }
            GcodeSetting::WaitForOk => self.wait_for_ok = value.as_bool(key)?,
            GcodeSetting::InitDelay => self.init_delay = to_u32(key, value.as_integer(key)?)?,
            GcodeSetting::SerialTimeout => {
                self.serial_timeout = to_u32(key, value.as_integer(key)?)?
            }
            GcodeSetting::LineEnd => {
                self.line_end = value
                    .as_text(key)?
                    .parse::<LineEnd>()
                    .map_err(|reason| PropertyError::InvalidValue {
                        key: key.to_string(),
                        reason,
                    })?
            }
            GcodeSetting::BedWidth => self.bed_width = non_negative(key, value.as_float(key)?)?,
            GcodeSetting::BedHeight => self.bed_height = non_negative(key, value.as_float(key)?)?,
            GcodeSetting::FlipX => self.flip_x = value.as_bool(key)?,
            GcodeSetting::FlipY => self.flip_y = value.as_bool(key)?,
            GcodeSetting::MaxSpeed => self.max_speed = non_negative(key, value.as_float(key)?)?,
            GcodeSetting::TravelSpeed => {
                self.travel_speed = non_negative(key, value.as_float(key)?)?
            }
            GcodeSetting::SpindleMax => self.spindle_max = non_negative(key, value.as_float(key)?)?,
            GcodeSetting::BlankLaserDuringRapids => {
                self.blank_laser_during_rapids = value.as_bool(key)?
            }
            GcodeSetting::PreJobGcode => self.pre_job_gcode = value.as_text(key)?.to_string(),
            GcodeSetting::PostJobGcode => self.post_job_gcode = value.as_text(key)?.to_string(),
            GcodeSetting::Resolutions => self.resolutions = value.as_text(key)?.to_string(),
            GcodeSetting::FileExportPath => {
                self.file_export_path = value.as_text(key)?.to_string()
            }
        }
        Ok(())
    }

    /// Read a setting by string key; `None` for keys that are not G-code settings.
    pub fn get_property(&self, key: &str) -> Option<PropertyValue> {
        GcodeSetting::from_key(key).map(|setting| self.get(setting))
    }

    /// Write a setting by string key. Unknown keys are ignored.
    pub fn set_property(&mut self, key: &str, value: &PropertyValue) -> PropertyResult<()> {
        match GcodeSetting::from_key(key) {
            Some(setting) => self.set(setting, value),
            None => {
                tracing::debug!("Ignoring unknown G-code setting '{}'", key);
                Ok(())
            }
        }
    }

    /// Convert a point in pixels at `dpi` to machine millimetres,
    /// mirroring each axis about the bed edge when its flip flag is set.
    pub fn to_machine(&self, x: f64, y: f64, dpi: f64) -> (f64, f64) {
        let x = px_to_mm(x, dpi);
        let y = px_to_mm(y, dpi);
        let x = if self.flip_x { self.bed_width - x } else { x };
        let y = if self.flip_y { self.bed_height - y } else { y };
        (x, y)
    }

    /// Supported resolutions in DPI. Entries that do not parse are skipped.
    pub fn resolutions(&self) -> Vec<f64> {
        self.resolutions
            .split(',')
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .filter(|dpi| dpi.is_finite() && *dpi > 0.0)
            .collect()
    }

    /// Commands to send before a job.
    pub fn pre_job_commands(&self) -> Vec<String> {
        template::commands(&self.pre_job_gcode)
    }

    /// Commands to send after a job.
    pub fn post_job_commands(&self) -> Vec<String> {
        template::commands(&self.post_job_gcode)
    }
}
