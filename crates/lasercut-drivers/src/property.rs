//! Driver property values
//!
//! Hosts read and write driver settings by string key. Each value carries
//! its type tag so a settings dialog can pick an editor, and so a write of
//! the wrong type is refused instead of coerced.

use crate::error::{PropertyError, PropertyResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Float,
    Integer,
    Boolean,
    Text,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A typed property value.
///
/// Serialized untagged, so a profile stores plain JSON scalars. Variant
/// order matters for deserialization: integers are tried before floats,
/// which keeps `115200` an integer and `250.0` a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    /// Type tag of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Float(_) => PropertyKind::Float,
            Self::Integer(_) => PropertyKind::Integer,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Text(_) => PropertyKind::Text,
        }
    }

    fn mismatch(&self, key: &str, expected: PropertyKind) -> PropertyError {
        PropertyError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: self.kind(),
        }
    }

    /// Extract a float, failing with a type mismatch for `key` otherwise.
    pub fn as_float(&self, key: &str) -> PropertyResult<f64> {
        match self {
            Self::Float(v) => Ok(*v),
            _ => Err(self.mismatch(key, PropertyKind::Float)),
        }
    }

    /// Extract an integer, failing with a type mismatch for `key` otherwise.
    pub fn as_integer(&self, key: &str) -> PropertyResult<i64> {
        match self {
            Self::Integer(v) => Ok(*v),
            _ => Err(self.mismatch(key, PropertyKind::Integer)),
        }
    }

    /// Extract a boolean, failing with a type mismatch for `key` otherwise.
    pub fn as_bool(&self, key: &str) -> PropertyResult<bool> {
        match self {
            Self::Boolean(v) => Ok(*v),
            _ => Err(self.mismatch(key, PropertyKind::Boolean)),
        }
    }

    /// Extract text, failing with a type mismatch for `key` otherwise.
    pub fn as_text(&self, key: &str) -> PropertyResult<&str> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(self.mismatch(key, PropertyKind::Text)),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Check that a float setting is finite and not negative.
pub(crate) fn non_negative(key: &str, value: f64) -> PropertyResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PropertyError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected a finite, non-negative number, got {value}"),
        });
    }
    Ok(value)
}
