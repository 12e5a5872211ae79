//! Driver registry
//!
//! Hosts pick a driver variant by configuration, not by type. Each
//! [`DriverKind`] builds a default-configured driver behind the
//! [`MotionCommandEmitter`] trait.

use crate::dexarm::DexArmDriver;
use crate::emitter::MotionCommandEmitter;
use crate::error::PropertyResult;
use crate::generic::GenericGcodeDriver;
use crate::marlin::MarlinDriver;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The available driver variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Generic,
    Marlin,
    DexArm,
}

impl DriverKind {
    pub const ALL: [DriverKind; 3] = [Self::Generic, Self::Marlin, Self::DexArm];

    /// Display name of the driver model.
    pub fn model_name(&self) -> &'static str {
        match self {
            Self::Generic => GenericGcodeDriver::MODEL_NAME,
            Self::Marlin => MarlinDriver::MODEL_NAME,
            Self::DexArm => DexArmDriver::MODEL_NAME,
        }
    }

    /// Look up a driver by display name, ignoring case.
    pub fn from_model_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.model_name().eq_ignore_ascii_case(name))
    }

    /// A new driver of this kind with default settings.
    pub fn create(&self) -> Box<dyn MotionCommandEmitter> {
        match self {
            Self::Generic => Box::new(GenericGcodeDriver::new()),
            Self::Marlin => Box::new(MarlinDriver::new()),
            Self::DexArm => Box::new(DexArmDriver::new()),
        }
    }

    /// A driver of this kind carrying over `source`'s values for every key
    /// the new driver exposes.
    pub fn convert(
        &self,
        source: &dyn MotionCommandEmitter,
    ) -> PropertyResult<Box<dyn MotionCommandEmitter>> {
        let mut driver = self.create();
        driver.copy_properties_from(source)?;
        tracing::debug!(
            "Converted {} settings to {}",
            source.model_name(),
            driver.model_name()
        );
        Ok(driver)
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}
