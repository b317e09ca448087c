//! Typed, row-oriented access to column-major query results.
//!
//! An embedded engine hands over a finished result as one array per column.
//! This crate wraps that buffer in a [`QueryResultTable`], resolves column
//! names, converts raw cells into host values through a pluggable
//! [`TypeMappingRegistry`], and exposes the rows through [`RowSet`] and
//! [`Row`] views that borrow the table.
//!
//! Row numbers and column ordinals are 1-based throughout the public API.

pub mod error;
pub mod export;
pub mod mapping;
pub mod prelude;
pub mod storage;
pub mod types;

pub use error::{Axis, ConversionFailure, Result, ResultError};
pub use mapping::{Converter, TypeMappingEntry, TypeMappingRegistry};
pub use storage::{
    ColumnMetadata, ColumnStore, ColumnValues, QueryResultTable, QueryResultTableBuilder, Row,
    RowCursor, RowSet,
};
pub use types::{Decimal, EngineType, HostType, HostValue, RawCell};
