//! Structured error reports for hosts
//!
//! The engine reports failures as `ConversionError` values. Hosts that need to
//! show them to a developer (a form, a widget editor, an MCP client) turn them
//! into an `ErrorReport`, which carries a stable code and a suggestion.

use crate::ConversionError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_MEASURES: &str = "INCOMPATIBLE_MEASURES";
    pub const MISSING_ANCHOR: &str = "MISSING_ANCHOR";
    pub const UNKNOWN_MEASURE: &str = "UNKNOWN_MEASURE";
    pub const INVALID_REGISTRY: &str = "INVALID_REGISTRY";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
}

/// Severity level of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The call degraded (e.g. an empty listing) but did not fail
    Warning,
    /// The call produced no result
    Error,
}

/// Structured error for display to developers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Extra context, most specific last
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,

    /// Severity level
    pub severity: Severity,
}

impl ErrorReport {
    /// Create a new error report
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            notes: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: add note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Constructors ==========

    pub fn unknown_measure(measure: &str) -> Self {
        Self::new(codes::UNKNOWN_MEASURE, format!("Unknown measure: {}", measure))
            .with_suggestion("Use list_measures to see the configured measures")
            .with_severity(Severity::Warning)
    }

    pub fn invalid_registry(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_REGISTRY, format!("Invalid unit registry: {}", details.into()))
            .with_suggestion("Fix the registry file; the previous registry stays active")
    }

    pub fn invalid_argument(func: &str, arg: &str, expected: &str) -> Self {
        Self::new(codes::INVALID_ARGUMENT,
            format!("{}() argument '{}': expected {}", func, arg, expected))
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        let report = Self::new(err.code(), format!("Unsupported conversion: {}", err));
        match err {
            ConversionError::UnknownUnit(abbr) => report
                .with_suggestion(format!("'{}' is not a registered unit abbreviation; check spelling and case", abbr)),
            ConversionError::IncompatibleMeasures { from_measure, to_measure, .. } => report
                .with_suggestion(format!("Pick two units of the same measure ({} or {})", from_measure, to_measure)),
            ConversionError::MissingAnchor { measure, from_system, to_system } => report
                .with_suggestion(format!("Declare a ratio or transform for {} from {} to {}", measure, from_system, to_system)),
        }
    }
}

impl From<ConversionError> for ErrorReport {
    fn from(err: ConversionError) -> Self {
        Self::from(&err)
    }
}
