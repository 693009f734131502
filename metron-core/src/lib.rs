//! Metron Core - Shared error types
//!
//! This crate provides the error types used throughout Metron:
//! - `ConversionError`: the closed failure taxonomy of unit conversion
//! - `ErrorReport`: structured, serializable errors for hosts

mod conversion;
mod error;

pub use conversion::ConversionError;
pub use error::{ErrorReport, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConversionError, ErrorReport, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod report_tests {
        use super::*;

        #[test]
        fn test_report_from_unknown_unit() {
            let err = ConversionError::UnknownUnit("furlong".to_string());
            let report = ErrorReport::from(&err);
            assert_eq!(report.code, codes::UNKNOWN_UNIT);
            assert_eq!(report.severity, Severity::Error);
            assert!(report.message.contains("furlong"));
            assert!(report.suggestion.is_some());
        }

        #[test]
        fn test_report_from_incompatible() {
            let err = ConversionError::IncompatibleMeasures {
                from: "m".to_string(),
                to: "kg".to_string(),
                from_measure: "length".to_string(),
                to_measure: "mass".to_string(),
            };
            let report: ErrorReport = err.into();
            assert_eq!(report.code, codes::INCOMPATIBLE_MEASURES);
            let suggestion = report.suggestion.unwrap();
            assert!(suggestion.contains("length"));
            assert!(suggestion.contains("mass"));
        }

        #[test]
        fn test_report_with_note() {
            let report = ErrorReport::unknown_measure("loudness")
                .with_note("requested by list_units");
            assert_eq!(report.severity, Severity::Warning);
            assert_eq!(report.notes, vec!["requested by list_units".to_string()]);
        }

        #[test]
        fn test_report_display() {
            let report = ErrorReport::invalid_argument("convert", "value", "Number");
            let display = format!("{}", report);
            assert!(display.starts_with("[INVALID_ARGUMENT]"));
        }

        #[test]
        fn test_report_serialization() {
            let report = ErrorReport::from(ConversionError::UnknownUnit("x".to_string()));
            let json = serde_json::to_value(&report).unwrap();
            assert_eq!(json["code"], "UNKNOWN_UNIT");
            assert_eq!(json["severity"], "error");
            assert!(json.get("notes").is_none());
        }
    }
}
