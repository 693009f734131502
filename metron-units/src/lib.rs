//! Metron Units - Unit Registry and Conversion Engine
//!
//! Converts measurements between units of the same measure, across unit
//! systems, using a static, data-driven registry.
//!
//! Data flows one way:
//! - `UnitRegistry`: measures -> systems -> units, plus per-measure anchor tables
//! - `UnitCache::build`: flattens the registry into an abbreviation-keyed table,
//!   resolving display names once
//! - `UnitCache::convert` / `convertor`: the conversion engine
//! - `UnitCache::describe` / `list` / `search`: the query API
//!
//! ```
//! use metron_units::BUILTIN;
//!
//! let f = BUILTIN.convert(100.0, "°C", "°F").unwrap();
//! assert_eq!(f, 212.0);
//! ```

mod unit;
mod anchor;
mod registry;
mod cache;
mod engine;
mod query;
mod error;
mod reload;
pub mod builtin;
pub mod config;

use std::sync::LazyLock;

pub use unit::Unit;
pub use anchor::{AnchorEntry, AnchorTable, AnchorTransform};
pub use registry::{Measure, UnitRegistry, UnitSystem, IMPERIAL, METRIC};
pub use cache::{CacheEntry, UnitCache};
pub use engine::Convertor;
pub use query::UnitDescriptor;
pub use error::{RegistryError, RegistryResult};
pub use reload::SharedCache;
pub use metron_core::ConversionError;

/// Cache over the built-in registry, with raw names as display names
pub static BUILTIN: LazyLock<UnitCache> =
    LazyLock::new(|| UnitCache::build(builtin::registry(), identity_name));

/// Name resolver that keeps raw names as they are
pub fn identity_name(raw: &str) -> String {
    raw.to_string()
}
