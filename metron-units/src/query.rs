//! Query and describe API over a unit cache

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Measure, UnitCache, UnitSystem, IMPERIAL, METRIC};

/// Display-oriented projection of a cache entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub abbr: String,
    pub measure: String,
    pub system: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UnitCache {
    /// Describe one unit; `None` if the abbreviation is unknown
    pub fn describe(&self, abbr: &str) -> Option<UnitDescriptor> {
        self.entry(abbr).map(|entry| UnitDescriptor {
            abbr: entry.abbr.clone(),
            measure: entry.measure.clone(),
            system: entry.system.clone(),
            name: entry.name.clone(),
            tags: entry.unit.tags.clone(),
        })
    }

    /// List units, optionally restricted to one measure and/or one system.
    ///
    /// An unknown measure yields an empty list. A measure lacking the
    /// requested system is skipped, except that `IMPERIAL` falls back to
    /// `METRIC`.
    pub fn list(&self, measure: Option<&str>, system: Option<&str>) -> Vec<UnitDescriptor> {
        let measures: Vec<&Measure> = match measure {
            Some(name) => match self.registry().measure(name) {
                Some(m) => vec![m],
                None => {
                    warn!(measure = name, "list requested for unknown measure");
                    return Vec::new();
                }
            },
            None => self.registry().measures().iter().collect(),
        };

        let mut out = Vec::new();
        for m in measures {
            match system {
                Some(requested) => {
                    if let Some(s) = select_system(m, requested) {
                        self.describe_system(m, s, &mut out);
                    }
                }
                None => {
                    for s in &m.systems {
                        self.describe_system(m, s, &mut out);
                    }
                }
            }
        }
        out
    }

    /// Measure names in declaration order
    pub fn measures(&self) -> Vec<&str> {
        self.registry().measures().iter().map(|m| m.name.as_str()).collect()
    }

    /// System names declared for a measure; `None` if the measure is unknown
    pub fn systems(&self, measure: &str) -> Option<Vec<&str>> {
        self.registry()
            .measure(measure)
            .map(|m| m.systems.iter().map(|s| s.name.as_str()).collect())
    }

    /// Units whose abbreviation, display name or any tag contains `query`
    /// (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<UnitDescriptor> {
        let needle = query.to_lowercase();
        self.list(None, None)
            .into_iter()
            .filter(|d| {
                d.abbr.to_lowercase().contains(&needle)
                    || d.name.to_lowercase().contains(&needle)
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Units of one system that still own their cache slot. A unit shadowed
    /// by a later declaration of the same abbreviation is skipped.
    fn describe_system(&self, measure: &Measure, system: &UnitSystem, out: &mut Vec<UnitDescriptor>) {
        out.extend(
            system
                .units()
                .filter(|(abbr, _)| {
                    self.entry(abbr)
                        .is_some_and(|e| e.measure == measure.name && e.system == system.name)
                })
                .filter_map(|(abbr, _)| self.describe(abbr)),
        );
    }
}

fn select_system<'m>(measure: &'m Measure, requested: &str) -> Option<&'m UnitSystem> {
    measure.system(requested).or_else(|| {
        if requested == IMPERIAL {
            measure.system(METRIC)
        } else {
            None
        }
    })
}
