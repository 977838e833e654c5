//! # Error Types
//!
//! Structured error types for drywall_core. The kernel is a pure computation,
//! so every error here is local and final: an unknown component id, a value
//! outside the domain of the formulas, or a file that failed to load.
//!
//! ## Example
//!
//! ```rust
//! use drywall_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if !(span_mm > 0.0) {
//!         return Err(CalcError::invalid_input(
//!             "span_mm",
//!             span_mm.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for drywall_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant carries enough context for a caller (form layer, CLI, or
/// another program) to point at the offending field or id.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-finite, negative, zero divisor, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Stud or runner section id not present in the catalog
    #[error("Section not found: {id}")]
    SectionNotFound { id: String },

    /// Hanger id not present in the catalog
    #[error("Hanger not found: {id}")]
    HangerNotFound { id: String },

    /// Anchor id not present in the catalog
    #[error("Anchor not found: {id}")]
    AnchorNotFound { id: String },

    /// A substitute catalog could not be read or contains a bad record
    #[error("Catalog error in '{source_name}': {reason}")]
    CatalogError { source_name: String, reason: String },

    /// Calculation could not be carried out
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// A job or project file could not be read or written
    #[error("File error during {operation} on '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Project file written by an incompatible schema version
    #[error("Project file version {file_version} is not compatible with {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(id: impl Into<String>) -> Self {
        CalcError::SectionNotFound { id: id.into() }
    }

    /// Create a HangerNotFound error
    pub fn hanger_not_found(id: impl Into<String>) -> Self {
        CalcError::HangerNotFound { id: id.into() }
    }

    /// Create an AnchorNotFound error
    pub fn anchor_not_found(id: impl Into<String>) -> Self {
        CalcError::AnchorNotFound { id: id.into() }
    }

    /// Create a CatalogError
    pub fn catalog_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CatalogError {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Kernel errors are never transient; retrying the same inputs gives the same error.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// True for the three unknown-component variants
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CalcError::SectionNotFound { .. } | CalcError::HangerNotFound { .. } | CalcError::AnchorNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::HangerNotFound { .. } => "HANGER_NOT_FOUND",
            CalcError::AnchorNotFound { .. } => "ANCHOR_NOT_FOUND",
            CalcError::CatalogError { .. } => "CATALOG_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Finite and `>= 0`.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(value)
}

/// Finite and `> 0`. Used for every quantity that ends up in a denominator.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be greater than zero"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("span_mm", "-5", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::section_not_found("C1").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(CalcError::hanger_not_found("M6").error_code(), "HANGER_NOT_FOUND");
        assert_eq!(CalcError::anchor_not_found("X").error_code(), "ANCHOR_NOT_FOUND");
    }

    #[test]
    fn test_not_found_is_never_recoverable() {
        let err = CalcError::section_not_found("C200x50x1.2t");
        assert!(err.is_not_found());
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Section not found: C200x50x1.2t");
    }

    #[test]
    fn test_guards() {
        assert!(require_positive("material_factor", 0.0).is_err());
        assert!(require_positive("material_factor", f64::NAN).is_err());
        assert!(require_non_negative("wind_pressure_kpa", -0.1).is_err());
        assert_eq!(require_non_negative("wind_pressure_kpa", 0.0).unwrap(), 0.0);
        assert!(require_finite("span_mm", f64::INFINITY).is_err());
    }
}
