//! Driver profiles
//!
//! A [`DriverProfile`] is a named, persisted driver configuration: the
//! driver model plus the value of every property it exposes. Profiles are
//! stored as pretty-printed JSON and re-applied through `set_property`, so
//! a hand-edited file goes through the same type checks as the settings
//! dialog.

use crate::emitter::MotionCommandEmitter;
use crate::error::{DriverError, DriverResult};
use crate::property::PropertyValue;
use crate::registry::DriverKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    pub id: Uuid,
    pub name: String,
    pub driver: DriverKind,
    /// Property key to value, for every key the driver exposed when captured
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl DriverProfile {
    /// Snapshot the configuration of `driver` under a new id.
    pub fn capture(
        name: impl Into<String>,
        driver: &dyn MotionCommandEmitter,
    ) -> DriverResult<Self> {
        let kind = DriverKind::from_model_name(driver.model_name())
            .ok_or_else(|| DriverError::UnknownDriver(driver.model_name().to_string()))?;

        let properties = driver
            .property_keys()
            .into_iter()
            .filter_map(|key| driver.get_property(key).map(|value| (key.to_string(), value)))
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            driver: kind,
            properties,
        })
    }

    /// Build a driver of the recorded model and apply the recorded values.
    ///
    /// Keys the driver does not expose are skipped. A value of the wrong
    /// type fails the whole profile.
    pub fn instantiate(&self) -> DriverResult<Box<dyn MotionCommandEmitter>> {
        let mut driver = self.driver.create();
        let keys = driver.property_keys();

        for (key, value) in &self.properties {
            if !keys.iter().any(|known| *known == key.as_str()) {
                tracing::warn!(
                    "Profile '{}' sets '{}', which {} does not expose; skipping",
                    self.name,
                    key,
                    driver.model_name()
                );
                continue;
            }
            driver.set_property(key, value)?;
        }

        Ok(driver)
    }

    /// A copy of this profile under a new id and name.
    pub fn save_as_new(&self, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn load_from_file(path: &Path) -> DriverResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let profile: DriverProfile = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded profile '{}' ({}) from {}",
            profile.name,
            profile.driver,
            path.display()
        );
        Ok(profile)
    }

    pub fn save_to_file(&self, path: &Path) -> DriverResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!("Saved profile '{}' to {}", self.name, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dexarm::DexArmDriver;
    use crate::error::PropertyError;

    #[test]
    fn test_capture_records_exposed_keys() {
        let driver = DexArmDriver::new();
        let profile = DriverProfile::capture("Desk arm", &driver).unwrap();
        assert_eq!(profile.driver, DriverKind::DexArm);
        assert_eq!(profile.properties.len(), driver.property_keys().len());
        assert_eq!(
            profile.properties.get("Pen drop distance (mm)"),
            Some(&PropertyValue::Float(10.0))
        );
        assert!(!profile.properties.contains_key("Flip X Axis"));
    }

    #[test]
    fn test_instantiate_applies_values() {
        let mut driver = DexArmDriver::new();
        driver.set_pen_drop_distance(3.0).unwrap();
        driver.settings_mut().travel_speed = 6000.0;
        let profile = DriverProfile::capture("Fast", &driver).unwrap();

        let restored = profile.instantiate().unwrap();
        assert_eq!(restored.model_name(), "DexArm Driver");
        assert_eq!(
            restored.get_property("Pen drop distance (mm)"),
            Some(PropertyValue::Float(3.0))
        );
        assert_eq!(restored.settings().travel_speed, 6000.0);
    }

    #[test]
    fn test_instantiate_skips_unexposed_keys() {
        let mut profile = DriverProfile::capture("Marlin", &crate::MarlinDriver::new()).unwrap();
        profile
            .properties
            .insert("Flip X Axis".to_string(), PropertyValue::Boolean(true));
        profile.driver = DriverKind::DexArm;

        let driver = profile.instantiate().unwrap();
        assert_eq!(
            driver.get_property("Flip X Axis"),
            Some(PropertyValue::Boolean(false))
        );
    }

    #[test]
    fn test_instantiate_rejects_wrong_kind() {
        let mut profile = DriverProfile::capture("Bad", &DexArmDriver::new()).unwrap();
        profile
            .properties
            .insert("Laserbed width".to_string(), PropertyValue::Integer(300));
        let err = profile.instantiate().unwrap_err();
        assert!(matches!(
            err,
            DriverError::Property(PropertyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_save_as_new() {
        let profile = DriverProfile::capture("A", &DexArmDriver::new()).unwrap();
        let copy = profile.save_as_new("B");
        assert_ne!(copy.id, profile.id);
        assert_eq!(copy.name, "B");
        assert_eq!(copy.driver, profile.driver);
        assert_eq!(copy.properties, profile.properties);
    }
}
