//! Shared, swappable cache for hosts that reload their registry
//!
//! Readers take an `Arc` snapshot and keep using it for the duration of a
//! request; a reload builds the new cache outside the lock and swaps the
//! pointer, so a reader sees either the old cache or the new one.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::RegistryResult;
use crate::{UnitCache, UnitRegistry};

#[derive(Debug)]
pub struct SharedCache {
    current: RwLock<Arc<UnitCache>>,
}

impl SharedCache {
    pub fn new(cache: UnitCache) -> Self {
        SharedCache {
            current: RwLock::new(Arc::new(cache)),
        }
    }

    /// The cache in effect right now
    pub fn snapshot(&self) -> Arc<UnitCache> {
        // The guarded value is a single Arc, so a poisoned lock still holds a complete cache.
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swap in a new cache, returning the previous one
    pub fn replace(&self, cache: UnitCache) -> Arc<UnitCache> {
        let next = Arc::new(cache);
        let units = next.len();
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        info!(units, previous_units = previous.len(), "unit cache replaced");
        previous
    }

    /// Build a cache from `registry` and swap it in
    pub fn rebuild<F>(&self, registry: UnitRegistry, resolve_name: F) -> Arc<UnitCache>
    where
        F: Fn(&str) -> String,
    {
        self.replace(UnitCache::build(registry, resolve_name))
    }

    /// Strict variant of `rebuild`; on error the current cache stays in place
    pub fn rebuild_strict<F>(&self, registry: UnitRegistry, resolve_name: F) -> RegistryResult<Arc<UnitCache>>
    where
        F: Fn(&str) -> String,
    {
        let cache = UnitCache::build_strict(registry, resolve_name)?;
        Ok(self.replace(cache))
    }
}

impl From<UnitCache> for SharedCache {
    fn from(cache: UnitCache) -> Self {
        SharedCache::new(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use crate::{identity_name, Measure, Unit, UnitSystem, METRIC};

    fn registry(scale_km: f64) -> UnitRegistry {
        UnitRegistry::new().with_measure(Measure::new("length")
            .with_system(UnitSystem::new(METRIC)
                .with_unit("m", Unit::new("meter", 1.0))
                .with_unit("km", Unit::new("kilometer", scale_km))))
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let shared = SharedCache::new(UnitCache::build(registry(1000.0), identity_name));
        let before = shared.snapshot();

        let previous = shared.rebuild(registry(500.0), identity_name);

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.convert(1.0, "km", "m").unwrap(), 1000.0);
        assert_eq!(shared.snapshot().convert(1.0, "km", "m").unwrap(), 500.0);
    }

    #[test]
    fn test_strict_rebuild_keeps_current_on_error() {
        let shared = SharedCache::from(UnitCache::build(registry(1000.0), identity_name));
        let bad = registry(1.0).with_measure(Measure::new("torque")
            .with_system(UnitSystem::new(METRIC).with_unit("m", Unit::new("newton meter", 1.0))));

        assert!(shared.rebuild_strict(bad, identity_name).is_err());
        assert_eq!(shared.snapshot().convert(1.0, "km", "m").unwrap(), 1000.0);
    }

    #[test]
    fn test_readers_see_whole_caches() {
        let shared = Arc::new(SharedCache::new(UnitCache::build(registry(1000.0), identity_name)));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let km = shared.snapshot().convert(1.0, "km", "m").unwrap();
                        assert!(km == 1000.0 || km == 2000.0);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            let scale = if i % 2 == 0 { 2000.0 } else { 1000.0 };
            shared.rebuild(registry(scale), identity_name);
        }

        for r in readers {
            r.join().unwrap();
        }
    }
}
