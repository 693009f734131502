//! Conversion engine
//!
//! A conversion resolves both abbreviations against the cache, then moves the
//! value through the origin system's anchor, across systems when they differ,
//! and out of the destination unit:
//!
//! ```text
//! anchored = value * origin.scale - origin.shift
//! anchored = anchor_rule(anchored)            (only across systems)
//! result   = (anchored + dest.shift) / dest.scale
//! ```

use metron_core::ConversionError;

use crate::{AnchorTransform, CacheEntry, Unit, UnitCache};

/// Resolved conversion between two distinct units, borrowed from a cache
struct Route<'c> {
    origin: &'c Unit,
    anchor: Option<&'c AnchorTransform>,
    destination: &'c Unit,
}

impl Route<'_> {
    fn apply(&self, value: f64) -> f64 {
        let mut anchored = self.origin.to_anchor(value);
        if let Some(rule) = self.anchor {
            anchored = rule.apply(anchored);
        }
        self.destination.from_anchor(anchored)
    }
}

impl UnitCache {
    /// Convert `value` from one unit abbreviation to another
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        Ok(match self.route(from, to)? {
            Some(route) => route.apply(value),
            None => value,
        })
    }

    /// Resolve a unit pair once and return a reusable converter
    pub fn convertor(&self, from: &str, to: &str) -> Result<Convertor, ConversionError> {
        let plan = match self.route(from, to)? {
            Some(route) => Plan::Route {
                origin: route.origin.clone(),
                anchor: route.anchor.cloned(),
                destination: route.destination.clone(),
            },
            None => Plan::Identity,
        };
        Ok(Convertor {
            from: from.to_string(),
            to: to.to_string(),
            plan,
        })
    }

    /// `None` means the two abbreviations name the same unit
    fn route(&self, from: &str, to: &str) -> Result<Option<Route<'_>>, ConversionError> {
        let origin = self.lookup(from)?;
        let destination = self.lookup(to)?;

        if origin.abbr == destination.abbr {
            return Ok(None);
        }

        if origin.measure != destination.measure {
            return Err(ConversionError::IncompatibleMeasures {
                from: origin.abbr.clone(),
                to: destination.abbr.clone(),
                from_measure: origin.measure.clone(),
                to_measure: destination.measure.clone(),
            });
        }

        let anchor = if origin.system != destination.system {
            Some(self.anchor_rule(origin, destination)?)
        } else {
            None
        };

        Ok(Some(Route {
            origin: &origin.unit,
            anchor,
            destination: &destination.unit,
        }))
    }

    fn lookup(&self, abbr: &str) -> Result<&CacheEntry, ConversionError> {
        self.entry(abbr)
            .ok_or_else(|| ConversionError::UnknownUnit(abbr.to_string()))
    }

    fn anchor_rule(&self, origin: &CacheEntry, destination: &CacheEntry) -> Result<&AnchorTransform, ConversionError> {
        self.anchors(&origin.measure)
            .and_then(|table| table.lookup(&origin.system, &destination.system))
            .and_then(|entry| entry.rule.as_ref())
            .ok_or_else(|| ConversionError::MissingAnchor {
                measure: origin.measure.clone(),
                from_system: origin.system.clone(),
                to_system: destination.system.clone(),
            })
    }
}

#[derive(Debug, Clone)]
enum Plan {
    Identity,
    Route {
        origin: Unit,
        anchor: Option<AnchorTransform>,
        destination: Unit,
    },
}

/// Pre-resolved converter between two units.
///
/// Owns copies of both units and the anchor rule, so it stays valid after the
/// cache it came from is dropped or replaced.
#[derive(Debug, Clone)]
pub struct Convertor {
    from: String,
    to: String,
    plan: Plan,
}

impl Convertor {
    pub fn apply(&self, value: f64) -> f64 {
        match &self.plan {
            Plan::Identity => value,
            Plan::Route { origin, anchor, destination } => Route {
                origin,
                anchor: anchor.as_ref(),
                destination,
            }
            .apply(value),
        }
    }

    pub fn from_abbr(&self) -> &str {
        &self.from
    }

    pub fn to_abbr(&self) -> &str {
        &self.to
    }

    pub fn into_fn(self) -> impl Fn(f64) -> f64 + Send + Sync + 'static {
        move |value| self.apply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity_name, Measure, UnitRegistry, UnitSystem, IMPERIAL, METRIC};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn cache() -> UnitCache {
        let registry = UnitRegistry::new()
            .with_measure(Measure::new("length")
                .with_system(UnitSystem::new(METRIC)
                    .with_unit("m", Unit::new("meter", 1.0))
                    .with_unit("km", Unit::new("kilometer", 1000.0)))
                .with_system(UnitSystem::new(IMPERIAL)
                    .with_unit("ft", Unit::new("foot", 1.0))
                    .with_unit("mi", Unit::new("mile", 5280.0)))
                .with_anchor(METRIC, IMPERIAL, AnchorTransform::ratio(3.28084))
                .with_anchor(IMPERIAL, METRIC, AnchorTransform::ratio(1.0 / 3.28084)))
            .with_measure(Measure::new("temperature")
                .with_system(UnitSystem::new(METRIC)
                    .with_unit("°C", Unit::new("celsius", 1.0).with_shift(0.0))
                    .with_unit("K", Unit::new("kelvin", 1.0).with_shift(273.15)))
                .with_system(UnitSystem::new(IMPERIAL)
                    .with_unit("°F", Unit::new("fahrenheit", 1.0).with_shift(0.0))
                    .with_unit("°R", Unit::new("rankine", 1.0).with_shift(459.67)))
                .with_anchor(METRIC, IMPERIAL, AnchorTransform::function(|c| c * 9.0 / 5.0 + 32.0))
                .with_anchor(IMPERIAL, METRIC, AnchorTransform::function(|f| (f - 32.0) * 5.0 / 9.0)))
            .with_measure(Measure::new("pressure")
                .with_system(UnitSystem::new(METRIC)
                    .with_unit("Pa", Unit::new("pascal", 1.0)))
                .with_system(UnitSystem::new(IMPERIAL)
                    .with_unit("psi", Unit::new("psi", 1.0))));
        UnitCache::build(registry, identity_name)
    }

    #[test]
    fn test_same_system_scaling() {
        let cache = cache();
        assert_eq!(cache.convert(5.0, "km", "m").unwrap(), 5000.0);
        assert_eq!(cache.convert(5000.0, "m", "km").unwrap(), 5.0);
    }

    #[test]
    fn test_cross_system_ratio() {
        let cache = cache();
        let ft = cache.convert(1.0, "m", "ft").unwrap();
        assert!(approx_eq(ft, 3.28084));

        let mi = cache.convert(1.0, "km", "mi").unwrap();
        assert!(approx_eq(mi, 3280.84 / 5280.0));
    }

    #[test]
    fn test_cross_system_transform() {
        let cache = cache();
        assert_eq!(cache.convert(0.0, "°C", "°F").unwrap(), 32.0);
        assert_eq!(cache.convert(100.0, "°C", "°F").unwrap(), 212.0);
        assert_eq!(cache.convert(212.0, "°F", "°C").unwrap(), 100.0);
    }

    #[test]
    fn test_shifted_units() {
        let cache = cache();
        assert!(approx_eq(cache.convert(300.0, "K", "°C").unwrap(), 26.85));
        assert!(approx_eq(cache.convert(0.0, "°C", "K").unwrap(), 273.15));
        // 273.15 K -> 0 °C -> 32 °F -> 491.67 °R
        assert!(approx_eq(cache.convert(273.15, "K", "°R").unwrap(), 491.67));
    }

    #[test]
    fn test_identity_short_circuit() {
        let cache = cache();
        assert_eq!(cache.convert(0.1 + 0.2, "K", "K").unwrap(), 0.1 + 0.2);
        // identity never consults the anchor table, even for a measure without one
        assert_eq!(cache.convert(7.5, "psi", "psi").unwrap(), 7.5);
    }

    #[test]
    fn test_unknown_unit() {
        let cache = cache();
        assert_eq!(
            cache.convert(1.0, "not-a-real-unit", "m"),
            Err(ConversionError::UnknownUnit("not-a-real-unit".to_string()))
        );
        assert_eq!(
            cache.convert(1.0, "m", "furlong"),
            Err(ConversionError::UnknownUnit("furlong".to_string()))
        );
    }

    #[test]
    fn test_incompatible_measures() {
        let cache = cache();
        let err = cache.convert(1.0, "m", "°C").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleMeasures { ref from_measure, ref to_measure, .. }
            if from_measure == "length" && to_measure == "temperature"));
    }

    #[test]
    fn test_missing_anchor() {
        let cache = cache();
        let err = cache.convert(1.0, "Pa", "psi").unwrap_err();
        assert_eq!(err, ConversionError::MissingAnchor {
            measure: "pressure".to_string(),
            from_system: METRIC.to_string(),
            to_system: IMPERIAL.to_string(),
        });
    }

    #[test]
    fn test_unset_anchor_rule() {
        let mut measure = Measure::new("speed")
            .with_system(UnitSystem::new(METRIC).with_unit("m/s", Unit::new("meter per second", 1.0)))
            .with_system(UnitSystem::new(IMPERIAL).with_unit("ft/s", Unit::new("foot per second", 1.0)));
        measure.anchors.insert(METRIC, IMPERIAL, None);
        let cache = UnitCache::build(UnitRegistry::new().with_measure(measure), identity_name);

        assert!(matches!(
            cache.convert(1.0, "m/s", "ft/s"),
            Err(ConversionError::MissingAnchor { .. })
        ));
    }

    #[test]
    fn test_convertor_matches_convert() {
        let cache = cache();
        let to_f = cache.convertor("K", "°F").unwrap();
        assert_eq!(to_f.from_abbr(), "K");
        assert_eq!(to_f.to_abbr(), "°F");

        for v in [0.0, 255.0, 273.15, 373.15, 1000.0] {
            assert_eq!(to_f.apply(v), cache.convert(v, "K", "°F").unwrap());
        }
    }

    #[test]
    fn test_convertor_errors_at_construction() {
        let cache = cache();
        assert!(matches!(cache.convertor("x", "m"), Err(ConversionError::UnknownUnit(_))));
        assert!(matches!(cache.convertor("m", "K"), Err(ConversionError::IncompatibleMeasures { .. })));
        assert!(matches!(cache.convertor("Pa", "psi"), Err(ConversionError::MissingAnchor { .. })));
    }

    #[test]
    fn test_convertor_outlives_cache() {
        let f = {
            let cache = cache();
            cache.convertor("km", "m").unwrap().into_fn()
        };
        assert_eq!(f(2.5), 2500.0);
    }
}
