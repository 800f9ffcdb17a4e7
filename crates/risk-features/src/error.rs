//! Schema Mismatch Errors

use crate::schema::ModelKind;
use thiserror::Error;

/// Errors raised when clinical fields do not fit a model's input schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaMismatch {
    /// Required field absent from the input
    #[error("{kind} input is missing required field: {field}")]
    MissingField { kind: ModelKind, field: &'static str },

    /// Field name that the schema does not know about
    #[error("{kind} input has unknown field: {field}")]
    UnknownField { kind: ModelKind, field: String },

    /// Categorical value outside its enumerated domain
    #[error("{field} value {value:?} is not one of [{allowed}]")]
    InvalidCategory {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Value of the wrong shape (text where a number is expected, etc.)
    #[error("{field} expects {expected}, got {actual}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Numeric value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite numeric value
    #[error("{field} value is not a finite number")]
    NotFinite { field: &'static str },

    /// Vector built for one model handed to another
    #[error("feature vector is for {actual}, model expects {expected}")]
    KindMismatch { expected: ModelKind, actual: ModelKind },

    /// Vector width differs from the schema column count
    #[error("{kind} schema expects {expected} features, got {actual}")]
    WidthMismatch {
        kind: ModelKind,
        expected: usize,
        actual: usize,
    },
}
