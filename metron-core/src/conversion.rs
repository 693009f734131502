//! Conversion error taxonomy
//!
//! A closed set of failures raised by `convert`/`convertor`. All of them are
//! deterministic configuration or usage errors; none is transient.

use thiserror::Error;

use crate::error::codes;

/// Error type for unit conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("cannot convert {from} ({from_measure}) to {to} ({to_measure}): incompatible measures")]
    IncompatibleMeasures {
        from: String,
        to: String,
        from_measure: String,
        to_measure: String,
    },

    #[error("no anchor transform for {measure} from {from_system} to {to_system}")]
    MissingAnchor {
        measure: String,
        from_system: String,
        to_system: String,
    },
}

impl ConversionError {
    /// Machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            ConversionError::IncompatibleMeasures { .. } => codes::INCOMPATIBLE_MEASURES,
            ConversionError::MissingAnchor { .. } => codes::MISSING_ANCHOR,
        }
    }
}
