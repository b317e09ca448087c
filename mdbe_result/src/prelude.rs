//! Convenience re-exports for working with query results.

pub use mdbe_common::{ConfigError, IdentifierCase, ResultConfig, ResultConfigBuilder};
pub use tracing;

pub use crate::error::{Axis, ConversionFailure, ResultError};
pub use crate::mapping::{Converter, TypeMappingEntry, TypeMappingRegistry};
pub use crate::storage::{
    ColumnMetadata, ColumnStore, ColumnValues, QueryResultTable, QueryResultTableBuilder, Row,
    RowCursor, RowSet,
};
pub use crate::types::{Decimal, EngineType, HostType, HostValue, RawCell};
