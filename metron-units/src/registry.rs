//! Unit registry: measures, their systems, and the units in each system

use crate::{AnchorTable, AnchorTransform, Unit};

/// The metric system name
pub const METRIC: &str = "METRIC";
/// The imperial system name
pub const IMPERIAL: &str = "IMPERIAL";

/// A named convention within a measure, owning its units by abbreviation
#[derive(Debug, Clone)]
pub struct UnitSystem {
    pub name: String,
    units: Vec<(String, Unit)>,
}

impl UnitSystem {
    pub fn new(name: &str) -> Self {
        UnitSystem {
            name: name.to_string(),
            units: Vec::new(),
        }
    }

    /// Builder: register a unit under `abbr`, replacing any unit with the same abbreviation
    pub fn with_unit(mut self, abbr: &str, unit: Unit) -> Self {
        self.insert(abbr, unit);
        self
    }

    pub fn insert(&mut self, abbr: &str, unit: Unit) {
        match self.units.iter_mut().find(|(a, _)| a == abbr) {
            Some(slot) => slot.1 = unit,
            None => self.units.push((abbr.to_string(), unit)),
        }
    }

    pub fn unit(&self, abbr: &str) -> Option<&Unit> {
        self.units.iter().find(|(a, _)| a == abbr).map(|(_, u)| u)
    }

    /// Units in declaration order
    pub fn units(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.units.iter().map(|(a, u)| (a.as_str(), u))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// A category of physical quantity
#[derive(Debug, Clone)]
pub struct Measure {
    pub name: String,
    pub systems: Vec<UnitSystem>,
    pub anchors: AnchorTable,
}

impl Measure {
    pub fn new(name: &str) -> Self {
        Measure {
            name: name.to_string(),
            systems: Vec::new(),
            anchors: AnchorTable::new(),
        }
    }

    pub fn with_system(mut self, system: UnitSystem) -> Self {
        match self.systems.iter_mut().find(|s| s.name == system.name) {
            Some(slot) => *slot = system,
            None => self.systems.push(system),
        }
        self
    }

    pub fn with_anchor(mut self, from: &str, to: &str, transform: AnchorTransform) -> Self {
        self.anchors.insert(from, to, Some(transform));
        self
    }

    pub fn system(&self, name: &str) -> Option<&UnitSystem> {
        self.systems.iter().find(|s| s.name == name)
    }

    pub fn unit_count(&self) -> usize {
        self.systems.iter().map(UnitSystem::len).sum()
    }
}

/// Registry of all declared measures
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    measures: Vec<Measure>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.insert(measure);
        self
    }

    /// Add a measure, replacing one with the same name
    pub fn insert(&mut self, measure: Measure) {
        match self.measures.iter_mut().find(|m| m.name == measure.name) {
            Some(slot) => *slot = measure,
            None => self.measures.push(measure),
        }
    }

    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Measures in declaration order
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn unit_count(&self) -> usize {
        self.measures.iter().map(Measure::unit_count).sum()
    }
}
