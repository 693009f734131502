//! Flattened, abbreviation-keyed view of a unit registry
//!
//! The cache is built once and never mutated. Lookups are keyed by
//! abbreviation alone, so abbreviations must be unique across the whole
//! registry: `build` lets a later unit overwrite an earlier one with the same
//! abbreviation, `build_strict` rejects the registry instead.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::{AnchorTable, Unit, UnitRegistry};

/// One unit, flattened with its owning measure and system
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub abbr: String,
    pub measure: String,
    pub system: String,
    /// Display name as returned by the name resolver
    pub name: String,
    pub unit: Unit,
}

impl CacheEntry {
    fn owner(&self) -> String {
        format!("{}/{}", self.measure, self.system)
    }
}

/// Immutable lookup table shared by the conversion engine and the query API
#[derive(Debug, Clone)]
pub struct UnitCache {
    registry: UnitRegistry,
    entries: HashMap<String, CacheEntry>,
}

impl UnitCache {
    /// Build a cache; duplicate abbreviations are last-write-wins.
    ///
    /// `resolve_name` is called exactly once per unit.
    pub fn build<F>(registry: UnitRegistry, resolve_name: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let mut entries = HashMap::with_capacity(registry.unit_count());
        for entry in flatten(&registry, &resolve_name) {
            if let Some(previous) = entries.insert(entry.abbr.clone(), entry) {
                debug!(abbr = %previous.abbr, owner = %previous.owner(), "abbreviation overwritten");
            }
        }
        debug!(measures = registry.measures().len(), units = entries.len(), "unit cache built");
        UnitCache { registry, entries }
    }

    /// Build a cache, failing on the first abbreviation declared twice
    pub fn build_strict<F>(registry: UnitRegistry, resolve_name: F) -> RegistryResult<Self>
    where
        F: Fn(&str) -> String,
    {
        let mut entries: HashMap<String, CacheEntry> = HashMap::with_capacity(registry.unit_count());
        for entry in flatten(&registry, &resolve_name) {
            if let Some(existing) = entries.get(&entry.abbr) {
                return Err(RegistryError::DuplicateAbbreviation {
                    abbr: entry.abbr.clone(),
                    first: existing.owner(),
                    second: entry.owner(),
                });
            }
            entries.insert(entry.abbr.clone(), entry);
        }
        debug!(measures = registry.measures().len(), units = entries.len(), "unit cache built (strict)");
        Ok(UnitCache { registry, entries })
    }

    /// Get a cache entry by abbreviation
    pub fn entry(&self, abbr: &str) -> Option<&CacheEntry> {
        self.entries.get(abbr)
    }

    pub fn contains(&self, abbr: &str) -> bool {
        self.entries.contains_key(abbr)
    }

    /// The registry this cache was built from
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub(crate) fn anchors(&self, measure: &str) -> Option<&AnchorTable> {
        self.registry.measure(measure).map(|m| &m.anchors)
    }

    /// Number of distinct abbreviations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk measures, then systems, then units, in declaration order
fn flatten<'r, F>(registry: &'r UnitRegistry, resolve_name: &'r F) -> impl Iterator<Item = CacheEntry> + 'r
where
    F: Fn(&str) -> String + 'r,
{
    registry.measures().iter().flat_map(move |measure| {
        measure.systems.iter().flat_map(move |system| {
            system.units().map(move |(abbr, unit)| CacheEntry {
                abbr: abbr.to_string(),
                measure: measure.name.clone(),
                system: system.name.clone(),
                name: resolve_name(&unit.name),
                unit: unit.clone(),
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::{identity_name, Measure, UnitSystem, IMPERIAL, METRIC};

    fn registry() -> UnitRegistry {
        UnitRegistry::new()
            .with_measure(Measure::new("length")
                .with_system(UnitSystem::new(METRIC)
                    .with_unit("m", Unit::new("unit.meter", 1.0))
                    .with_unit("km", Unit::new("unit.kilometer", 1000.0)))
                .with_system(UnitSystem::new(IMPERIAL)
                    .with_unit("ft", Unit::new("unit.foot", 1.0))))
            .with_measure(Measure::new("mass")
                .with_system(UnitSystem::new(METRIC)
                    .with_unit("kg", Unit::new("unit.kilogram", 1.0))))
    }

    fn colliding() -> UnitRegistry {
        registry().with_measure(Measure::new("torque")
            .with_system(UnitSystem::new(METRIC)
                .with_unit("m", Unit::new("unit.newton-meter", 1.0))))
    }

    #[test]
    fn test_build_flattens_all_units() {
        let cache = UnitCache::build(registry(), identity_name);

        assert_eq!(cache.len(), 4);
        let ft = cache.entry("ft").unwrap();
        assert_eq!(ft.measure, "length");
        assert_eq!(ft.system, IMPERIAL);
        assert_eq!(ft.unit.scale, 1.0);
        assert!(cache.entry("lb").is_none());
    }

    #[test]
    fn test_names_resolved_once_per_unit() {
        let calls = Cell::new(0);
        let cache = UnitCache::build(registry(), |raw| {
            calls.set(calls.get() + 1);
            raw.trim_start_matches("unit.").to_uppercase()
        });

        assert_eq!(calls.get(), 4);
        assert_eq!(cache.entry("km").unwrap().name, "KILOMETER");
        // the raw key is kept on the unit itself
        assert_eq!(cache.entry("km").unwrap().unit.name, "unit.kilometer");
    }

    #[test]
    fn test_duplicate_abbreviation_last_write_wins() {
        let cache = UnitCache::build(colliding(), identity_name);

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.entry("m").unwrap().measure, "torque");
    }

    #[test]
    fn test_build_strict_rejects_duplicates() {
        let err = UnitCache::build_strict(colliding(), identity_name).unwrap_err();
        match err {
            RegistryError::DuplicateAbbreviation { abbr, first, second } => {
                assert_eq!(abbr, "m");
                assert_eq!(first, "length/METRIC");
                assert_eq!(second, "torque/METRIC");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_build_strict_accepts_unique() {
        let cache = UnitCache::build_strict(registry(), identity_name).unwrap();
        assert!(cache.contains("kg"));
    }

    #[test]
    fn test_independent_caches() {
        let a = UnitCache::build(registry(), identity_name);
        let b = UnitCache::build(UnitRegistry::new(), identity_name);

        assert!(!a.is_empty());
        assert!(b.is_empty());
        assert!(b.entry("m").is_none());
    }
}
