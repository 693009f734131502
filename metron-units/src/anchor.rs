//! Anchor tables: how an anchored value moves between unit systems

use std::fmt;
use std::sync::Arc;

/// Rule for translating an anchored value from one system to another
#[derive(Clone)]
pub enum AnchorTransform {
    /// Anchors are proportional: multiply by a fixed ratio
    Ratio(f64),
    /// Arbitrary mapping, e.g. the affine Celsius to Fahrenheit relation
    Transform(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl AnchorTransform {
    pub fn ratio(ratio: f64) -> Self {
        AnchorTransform::Ratio(ratio)
    }

    /// `x -> x * factor + offset`
    pub fn affine(factor: f64, offset: f64) -> Self {
        AnchorTransform::Transform(Arc::new(move |x| x * factor + offset))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        AnchorTransform::Transform(Arc::new(f))
    }

    pub fn apply(&self, anchored: f64) -> f64 {
        match self {
            AnchorTransform::Ratio(ratio) => anchored * ratio,
            AnchorTransform::Transform(f) => f(anchored),
        }
    }
}

impl fmt::Debug for AnchorTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorTransform::Ratio(ratio) => f.debug_tuple("Ratio").field(ratio).finish(),
            AnchorTransform::Transform(_) => f.write_str("Transform(<fn>)"),
        }
    }
}

/// One declared (source system, target system) entry.
///
/// `rule` is `None` when a loaded entry named neither a ratio nor a
/// transform; converting through it fails with `MissingAnchor`.
#[derive(Debug, Clone)]
pub struct AnchorEntry {
    pub from: String,
    pub to: String,
    pub rule: Option<AnchorTransform>,
}

/// Per-measure anchor table
#[derive(Debug, Clone, Default)]
pub struct AnchorTable {
    entries: Vec<AnchorEntry>,
}

impl AnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) the rule for `from -> to`
    pub fn insert(&mut self, from: &str, to: &str, rule: Option<AnchorTransform>) {
        match self.entries.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(entry) => entry.rule = rule,
            None => self.entries.push(AnchorEntry {
                from: from.to_string(),
                to: to.to_string(),
                rule,
            }),
        }
    }

    pub fn lookup(&self, from: &str, to: &str) -> Option<&AnchorEntry> {
        self.entries.iter().find(|e| e.from == from && e.to == to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let rule = AnchorTransform::ratio(3.28084);
        assert!((rule.apply(1.0) - 3.28084).abs() < 1e-12);
    }

    #[test]
    fn test_affine() {
        let rule = AnchorTransform::affine(1.8, 32.0);
        assert!((rule.apply(100.0) - 212.0).abs() < 1e-9);
        assert!((rule.apply(-40.0) - -40.0).abs() < 1e-9);
    }

    #[test]
    fn test_function() {
        let rule = AnchorTransform::function(|f| (f - 32.0) * 5.0 / 9.0);
        assert_eq!(rule.apply(212.0), 100.0);
        assert_eq!(format!("{:?}", rule), "Transform(<fn>)");
    }

    #[test]
    fn test_table_lookup_is_directional() {
        let mut table = AnchorTable::new();
        table.insert("METRIC", "IMPERIAL", Some(AnchorTransform::ratio(2.0)));

        assert!(table.lookup("METRIC", "IMPERIAL").is_some());
        assert!(table.lookup("IMPERIAL", "METRIC").is_none());
    }

    #[test]
    fn test_table_insert_replaces() {
        let mut table = AnchorTable::new();
        table.insert("METRIC", "IMPERIAL", None);
        table.insert("METRIC", "IMPERIAL", Some(AnchorTransform::ratio(2.0)));

        assert_eq!(table.len(), 1);
        let entry = table.lookup("METRIC", "IMPERIAL").unwrap();
        assert!(matches!(entry.rule, Some(AnchorTransform::Ratio(r)) if r == 2.0));
    }
}
