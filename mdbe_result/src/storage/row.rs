//! Borrowed row view over a result table.

use std::fmt::{self, Display};

use super::index::{ColumnIndex, RowIndex};
use super::table::QueryResultTable;
use crate::error::ResultError;
use crate::types::{HostType, HostValue};

/// A read-only view of one row of a `QueryResultTable`.
///
/// A row is just a position bound to its table; cells are converted on demand
/// when read, never copied up front.
#[derive(Clone, Copy)]
pub struct Row<'t> {
    /// The owning table.
    table: &'t QueryResultTable,
    /// Row position in the table.
    idx: RowIndex,
}

impl<'t> Row<'t> {
    /// Create a row view. Only called by storage internals.
    pub(super) const fn new(table: &'t QueryResultTable, idx: RowIndex) -> Self {
        Self { table, idx }
    }

    /// The 1-based row number of this row.
    #[inline]
    #[must_use]
    pub const fn row_number(&self) -> usize {
        self.idx.ordinal()
    }

    /// The table this row belongs to.
    #[inline]
    #[must_use]
    pub const fn table(&self) -> &'t QueryResultTable {
        self.table
    }

    /// Number of columns in the row.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    /// Get a value by column ordinal using the column's default mapping.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange`, `UnsupportedType` or `Conversion`.
    pub fn column_by_index(&self, ordinal: usize) -> Result<HostValue, ResultError> {
        let column = ColumnIndex::from_ordinal(ordinal, self.table.column_count())?;
        self.table.typed_at(self.idx, column, None)
    }

    /// Get a value by column ordinal, handed out as `target`.
    ///
    /// # Errors
    ///
    /// As [`Row::column_by_index`], plus `TypeMismatch`.
    pub fn column_by_index_as(
        &self,
        ordinal: usize,
        target: HostType,
    ) -> Result<HostValue, ResultError> {
        let column = ColumnIndex::from_ordinal(ordinal, self.table.column_count())?;
        self.table.typed_at(self.idx, column, Some(target))
    }

    /// Get a value by column name using the column's default mapping.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound`, otherwise as [`Row::column_by_index`].
    pub fn column_by_name(&self, name: &str) -> Result<HostValue, ResultError> {
        let ordinal = self.table.column_index_by_name(name)?;
        self.column_by_index(ordinal)
    }

    /// Get a value by column name, handed out as `target`.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound`, otherwise as [`Row::column_by_index_as`].
    pub fn column_by_name_as(&self, name: &str, target: HostType) -> Result<HostValue, ResultError> {
        let ordinal = self.table.column_index_by_name(name)?;
        self.column_by_index_as(ordinal, target)
    }

    /// All values of the row in ordinal order, converted with the default
    /// mappings.
    ///
    /// # Errors
    ///
    /// Fails on the first cell that cannot be converted; no partial row is
    /// returned.
    pub fn values(&self) -> Result<Vec<HostValue>, ResultError> {
        (0..self.table.column_count())
            .map(|slot| self.table.typed_at(self.idx, ColumnIndex::new(slot), None))
            .collect()
    }
}

impl PartialEq for Row<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.idx == other.idx
    }
}

impl Eq for Row<'_> {}

impl fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("row", &self.row_number())
            .field("columns", &self.column_count())
            .finish()
    }
}

impl Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Row[{}]:", self.idx)?;

        for (slot, column) in self.table.columns().iter().enumerate() {
            let value_str = match self.table.typed_at(self.idx, ColumnIndex::new(slot), None) {
                Ok(value) if value.is_null() => "NULL".to_string(),
                Ok(value) => value.to_string(),
                Err(e) => format!("<{e}>"),
            };

            let nullable_marker = if column.nullable { "?" } else { "" };
            writeln!(f, "  {}{}: {}", column.name, nullable_marker, value_str)?;
        }

        Ok(())
    }
}
