//! Column metadata delivered alongside the raw buffer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::EngineType;

/// Name, position and declared type of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name as reported by the engine.
    pub name: String,
    /// 1-based position in the result.
    pub ordinal: usize,
    /// Declared engine type.
    pub engine_type: EngineType,
    /// Whether NULL cells are allowed.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

/// Columns are nullable unless the engine says otherwise.
const fn default_nullable() -> bool {
    true
}

impl ColumnMetadata {
    /// A nullable column.
    pub fn new(name: impl Into<String>, ordinal: usize, engine_type: EngineType) -> Self {
        Self {
            name: name.into(),
            ordinal,
            engine_type,
            nullable: true,
        }
    }

    /// Set whether the column accepts NULL.
    #[must_use]
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

impl fmt::Display for ColumnMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.nullable { "?" } else { "" };
        write!(f, "{}#{}: {}{}", self.name, self.ordinal, self.engine_type, marker)
    }
}
