//! Vector job model
//!
//! A [`LaserJob`] is an ordered list of [`VectorPart`]s. Each part carries
//! its own resolution and an ordered stream of [`VectorCommand`]s: moves and
//! lines in pixel coordinates, interleaved with property changes that set
//! the power and speed of the lines that follow.

use crate::error::{JobError, JobResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Laser settings applied to the lines that follow a `SetProperty` command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSpeedFocusFrequency {
    /// Laser power (0-100%)
    pub power: f64,
    /// Head speed (0-100% of the driver's max speed)
    pub speed: f64,
    /// Focus offset in mm
    pub focus: f64,
    /// Pulse frequency in Hz
    pub frequency: u32,
}

impl Default for PowerSpeedFocusFrequency {
    fn default() -> Self {
        Self {
            power: 20.0,
            speed: 100.0,
            focus: 0.0,
            frequency: 5000,
        }
    }
}

impl PowerSpeedFocusFrequency {
    /// Create a property with the given power and speed and default focus/frequency.
    pub fn new(power: f64, speed: f64) -> Self {
        Self {
            power,
            speed,
            ..Self::default()
        }
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VectorCommand {
    /// Travel to a point without drawing.
    MoveTo { x: f64, y: f64 },
    /// Draw a straight line from the current position to a point.
    LineTo { x: f64, y: f64 },
    /// Change the power/speed used by subsequent lines.
    SetProperty(PowerSpeedFocusFrequency),
}

/// A run of vector commands sharing one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPart {
    /// Resolution of the command coordinates in DPI
    pub resolution: f64,
    pub commands: Vec<VectorCommand>,
}

impl VectorPart {
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            commands: Vec::new(),
        }
    }

    /// Append a property change.
    pub fn set_property(&mut self, property: PowerSpeedFocusFrequency) -> &mut Self {
        self.commands.push(VectorCommand::SetProperty(property));
        self
    }

    /// Append a travel move.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(VectorCommand::MoveTo { x, y });
        self
    }

    /// Append a line.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(VectorCommand::LineTo { x, y });
        self
    }
}

/// A complete job as handed to a driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaserJob {
    /// Job title, shown to the user
    pub name: String,
    pub parts: Vec<VectorPart>,
}

impl LaserJob {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part and return `self` for chaining.
    pub fn with_part(mut self, part: VectorPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Load a job from a JSON file.
    pub fn load_from_file(path: &Path) -> JobResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let job: LaserJob = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded job '{}' with {} parts from {}",
            job.name,
            job.parts.len(),
            path.display()
        );
        Ok(job)
    }

    /// Total number of commands across all parts.
    pub fn command_count(&self) -> usize {
        self.parts.iter().map(|p| p.commands.len()).sum()
    }

    /// Check that every part can be converted to machine units.
    ///
    /// Rejects non-positive or non-finite resolutions, non-finite
    /// coordinates and power/speed percentages outside 0..=100.
    pub fn validate(&self) -> JobResult<()> {
        for (part_index, part) in self.parts.iter().enumerate() {
            if !part.resolution.is_finite() || part.resolution <= 0.0 {
                return Err(JobError::InvalidResolution {
                    part: part_index,
                    dpi: part.resolution,
                });
            }

            for (command_index, command) in part.commands.iter().enumerate() {
                match command {
                    VectorCommand::MoveTo { x, y } | VectorCommand::LineTo { x, y } => {
                        if !x.is_finite() || !y.is_finite() {
                            return Err(JobError::NonFiniteCoordinate {
                                part: part_index,
                                command: command_index,
                            });
                        }
                    }
                    VectorCommand::SetProperty(prop) => {
                        for (field, value) in [("power", prop.power), ("speed", prop.speed)] {
                            if !(0.0..=100.0).contains(&value) {
                                return Err(JobError::PercentageOutOfRange {
                                    field,
                                    value,
                                    part: part_index,
                                    command: command_index,
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
