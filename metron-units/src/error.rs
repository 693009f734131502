//! Registry loading and validation errors

use std::path::PathBuf;

use metron_core::ErrorReport;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("abbreviation '{abbr}' declared by {first} and {second}")]
    DuplicateAbbreviation {
        abbr: String,
        first: String,
        second: String,
    },

    #[error("anchor {from} -> {to} of measure '{measure}' sets both ratio and affine")]
    AmbiguousAnchor {
        measure: String,
        from: String,
        to: String,
    },

    #[error("unsupported registry format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<&RegistryError> for ErrorReport {
    fn from(err: &RegistryError) -> Self {
        ErrorReport::invalid_registry(err.to_string())
    }
}
