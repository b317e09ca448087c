//! Error types for result-set access.
//!
//! Every accessor reports failures synchronously. Nothing is retried and a
//! failed conversion never turns into a default value.

use std::fmt;

use mdbe_common::ConfigError;
use thiserror::Error;

use crate::types::{EngineType, HostType};

/// Which index an out-of-range error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A 1-based row number.
    Row,
    /// A 1-based column ordinal.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// Why a raw cell could not be converted to its host type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    /// The raw storage variant does not belong to the declared engine type.
    #[error("expected {expected} storage, found {found}")]
    WrongRawKind {
        /// Storage kind the converter accepts.
        expected: &'static str,
        /// Storage kind that was present.
        found: &'static str,
    },

    /// The cell is NULL but the column is declared non-nullable.
    #[error("NULL in non-nullable column")]
    NullInNonNullable,

    /// The raw value has no representation in the target host type.
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        /// The offending raw value, rendered.
        value: String,
        /// The host type it was converted to.
        target: HostType,
    },
}

impl ConversionFailure {
    /// Create an out-of-range failure.
    pub fn out_of_range(value: impl fmt::Display, target: HostType) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target,
        }
    }
}

/// Errors that can occur while building or reading a result.
#[derive(Debug, Error)]
pub enum ResultError {
    /// A row number or column ordinal is outside `[1, count]`.
    #[error("{axis} index {index} out of range (valid: 1..={count})")]
    IndexOutOfRange {
        /// Which index was wrong.
        axis: Axis,
        /// The requested 1-based index.
        index: usize,
        /// Number of rows or columns available.
        count: usize,
    },

    /// No column has the requested name.
    #[error("Column not found: {name}")]
    ColumnNotFound {
        /// The name as requested.
        name: String,
    },

    /// The registry has no entry for a column's engine type.
    #[error("Unsupported engine type {engine_type}{}", column_suffix(.ordinal))]
    UnsupportedType {
        /// Column ordinal, when the lookup happened for a column.
        ordinal: Option<usize>,
        /// The unmapped engine type.
        engine_type: EngineType,
    },

    /// The requested host type cannot receive the column's mapped type.
    #[error("Type mismatch in column {ordinal}: mapped to {expected}, requested {requested}")]
    TypeMismatch {
        /// Column ordinal.
        ordinal: usize,
        /// The column's default host type.
        expected: HostType,
        /// The host type the caller asked for.
        requested: HostType,
    },

    /// A raw cell could not be converted.
    #[error("Cannot convert row {row}, column {ordinal} ({engine_type}): {reason}")]
    Conversion {
        /// 1-based row number.
        row: usize,
        /// Column ordinal.
        ordinal: usize,
        /// Declared engine type of the column.
        engine_type: EngineType,
        /// What went wrong.
        reason: ConversionFailure,
    },

    /// The buffer handed over by the engine violates the table invariants.
    #[error("Malformed result buffer: {0}")]
    MalformedBuffer(String),

    /// A cursor was asked to replace an element before visiting one.
    #[error("Cursor has no current row")]
    NoCurrentRow,

    /// Rendering a result to CSV or JSON failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Loading the result configuration failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Formats the optional column part of `UnsupportedType`.
fn column_suffix(ordinal: &Option<usize>) -> String {
    ordinal.map_or_else(String::new, |o| format!(" in column {o}"))
}

impl ResultError {
    /// Create an out-of-range error.
    pub const fn out_of_range(axis: Axis, index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { axis, index, count }
    }

    /// Create a column-not-found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create an unsupported-type error not tied to a column.
    pub const fn unsupported(engine_type: EngineType) -> Self {
        Self::UnsupportedType {
            ordinal: None,
            engine_type,
        }
    }

    /// Create a type mismatch error.
    pub const fn type_mismatch(ordinal: usize, expected: HostType, requested: HostType) -> Self {
        Self::TypeMismatch {
            ordinal,
            expected,
            requested,
        }
    }

    /// Create a conversion error.
    pub const fn conversion(
        row: usize,
        ordinal: usize,
        engine_type: EngineType,
        reason: ConversionFailure,
    ) -> Self {
        Self::Conversion {
            row,
            ordinal,
            engine_type,
            reason,
        }
    }

    /// Create a malformed buffer error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBuffer(msg.into())
    }

    /// Create an export error.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Attach a column ordinal to an `UnsupportedType` error.
    #[must_use]
    pub fn at_column(self, ordinal: usize) -> Self {
        match self {
            Self::UnsupportedType { engine_type, .. } => Self::UnsupportedType {
                ordinal: Some(ordinal),
                engine_type,
            },
            other => other,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ResultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ResultError::out_of_range(Axis::Row, 3, 2);
        assert_eq!(err.to_string(), "row index 3 out of range (valid: 1..=2)");

        let err = ResultError::unsupported(EngineType::Blob).at_column(4);
        assert_eq!(err.to_string(), "Unsupported engine type blob in column 4");

        let err = ResultError::type_mismatch(1, HostType::I64, HostType::I32);
        assert!(err.to_string().contains("mapped to i64, requested i32"));
    }

    #[test]
    fn test_at_column_leaves_other_errors() {
        let err = ResultError::column_not_found("x").at_column(2);
        assert!(matches!(err, ResultError::ColumnNotFound { name } if name == "x"));
    }
}
