//! Registry files (JSON or YAML) and display-name tables
//!
//! Measures, systems and units are sequences so that declaration order
//! survives deserialization.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::{AnchorTransform, Measure, Unit, UnitRegistry, UnitSystem};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    pub measures: Vec<MeasureDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasureDef {
    pub name: String,
    pub systems: Vec<SystemDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<AnchorDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemDef {
    pub name: String,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

/// One unit row. Unknown keys are rejected so a misspelt `shift` cannot
/// load as an unshifted unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDef {
    pub abbr: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(alias = "to_anchor")]
    pub scale: f64,
    #[serde(default, alias = "anchor_shift", skip_serializing_if = "Option::is_none")]
    pub shift: Option<f64>,
}

impl From<UnitDef> for Unit {
    fn from(def: UnitDef) -> Self {
        Unit {
            name: def.name,
            tags: def.tags,
            scale: def.scale,
            shift: def.shift,
        }
    }
}

/// A `from -> to` rule carrying `ratio` or `affine`; neither leaves the rule unset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorDef {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affine: Option<AffineDef>,
}

/// `x -> x * factor + offset`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffineDef {
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
}

impl AnchorDef {
    fn rule(&self, measure: &str) -> RegistryResult<Option<AnchorTransform>> {
        match (self.affine, self.ratio) {
            (Some(_), Some(_)) => Err(RegistryError::AmbiguousAnchor {
                measure: measure.to_string(),
                from: self.from.clone(),
                to: self.to.clone(),
            }),
            (Some(a), None) => Ok(Some(AnchorTransform::affine(a.factor, a.offset))),
            (None, Some(r)) => Ok(Some(AnchorTransform::ratio(r))),
            (None, None) => Ok(None),
        }
    }
}

impl TryFrom<RegistryFile> for UnitRegistry {
    type Error = RegistryError;

    fn try_from(file: RegistryFile) -> RegistryResult<Self> {
        let mut registry = UnitRegistry::new();
        for def in file.measures {
            let mut measure = Measure::new(&def.name);
            for sys in def.systems {
                let mut system = UnitSystem::new(&sys.name);
                for u in sys.units {
                    let abbr = u.abbr.clone();
                    system.insert(&abbr, u.into());
                }
                measure = measure.with_system(system);
            }
            for anchor in &def.anchors {
                measure.anchors.insert(&anchor.from, &anchor.to, anchor.rule(&def.name)?);
            }
            registry.insert(measure);
        }
        Ok(registry)
    }
}

pub fn from_json_str(content: &str) -> RegistryResult<UnitRegistry> {
    let file: RegistryFile = serde_json::from_str(content)?;
    file.try_into()
}

pub fn from_yaml_str(content: &str) -> RegistryResult<UnitRegistry> {
    let file: RegistryFile = serde_yaml::from_str(content)?;
    file.try_into()
}

/// Load a registry file, choosing the format by extension
pub fn load(path: &Path) -> RegistryResult<UnitRegistry> {
    let content = std::fs::read_to_string(path)?;
    match Format::of(path)? {
        Format::Json => from_json_str(&content),
        Format::Yaml => from_yaml_str(&content),
    }
}

/// Load a `{raw name: display name}` table
pub fn load_names(path: &Path) -> RegistryResult<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(match Format::of(path)? {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    })
}

/// Name resolver backed by a table, falling back to the raw name
pub fn name_table(names: HashMap<String, String>) -> impl Fn(&str) -> String {
    move |raw: &str| names.get(raw).cloned().unwrap_or_else(|| raw.to_string())
}

enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> RegistryResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(RegistryError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
