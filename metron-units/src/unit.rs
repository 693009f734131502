//! Unit representation with anchor scale and shift

use std::fmt;
use serde::{Serialize, Deserialize};

/// A unit within one (measure, system) pair.
///
/// The unit's abbreviation is the key it is registered under, not a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Raw display name, resolved to a localized name when the cache is built
    pub name: String,
    /// Search and alias keywords
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Factor to the system's anchor unit (value_anchor = value * scale - shift)
    #[serde(alias = "to_anchor")]
    pub scale: f64,
    /// Offset for affine units such as kelvin or rankine
    #[serde(default, alias = "anchor_shift", skip_serializing_if = "Option::is_none")]
    pub shift: Option<f64>,
}

impl Unit {
    /// Create a new unit with proportional conversion (no shift)
    pub fn new(name: &str, scale: f64) -> Self {
        Unit {
            name: name.to_string(),
            tags: Vec::new(),
            scale,
            shift: None,
        }
    }

    /// Builder: set the anchor shift
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Builder: set search tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check if this unit is its system's anchor
    pub fn is_anchor(&self) -> bool {
        self.scale == 1.0 && self.shift.map_or(true, |s| s == 0.0)
    }

    /// Check if this unit has a shift (non-proportional conversion)
    pub fn has_shift(&self) -> bool {
        self.shift.is_some_and(|s| s != 0.0)
    }

    /// Convert a value in this unit to the system anchor
    pub fn to_anchor(&self, value: f64) -> f64 {
        let anchored = value * self.scale;
        match self.shift {
            Some(shift) => anchored - shift,
            None => anchored,
        }
    }

    /// Convert a value in the system anchor to this unit
    pub fn from_anchor(&self, anchored: f64) -> f64 {
        let shifted = match self.shift {
            Some(shift) => anchored + shift,
            None => anchored,
        };
        shifted / self.scale
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("meter", 1.0)
    }

    fn kilometer() -> Unit {
        Unit::new("kilometer", 1000.0)
    }

    fn kelvin() -> Unit {
        Unit::new("kelvin", 1.0).with_shift(273.15)
    }

    #[test]
    fn test_anchor_unit() {
        assert!(meter().is_anchor());
        assert!(!kilometer().is_anchor());
        assert!(!kelvin().is_anchor());
        assert!(Unit::new("celsius", 1.0).with_shift(0.0).is_anchor());
    }

    #[test]
    fn test_has_shift() {
        assert!(kelvin().has_shift());
        assert!(!meter().has_shift());
    }

    #[test]
    fn test_to_anchor() {
        assert_eq!(kilometer().to_anchor(5.0), 5000.0);
        assert!((kelvin().to_anchor(300.0) - 26.85).abs() < 1e-9);
    }

    #[test]
    fn test_from_anchor() {
        assert_eq!(kilometer().from_anchor(5000.0), 5.0);
        assert!((kelvin().from_anchor(0.0) - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_tags() {
        let unit = meter().with_tags(["meter", "meters", "metre"]);
        assert_eq!(unit.tags.len(), 3);
        assert_eq!(unit.tags[2], "metre");
    }

    #[test]
    fn test_deserialize_aliases() {
        let unit: Unit = serde_json::from_str(
            r#"{"name": "rankine", "to_anchor": 1, "anchor_shift": 459.67}"#,
        ).unwrap();
        assert_eq!(unit.scale, 1.0);
        assert_eq!(unit.shift, Some(459.67));
        assert!(unit.tags.is_empty());
    }
}
