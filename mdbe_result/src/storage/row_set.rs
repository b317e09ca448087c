//! Row-major view over a result table.
//!
//! `RowSet` transposes the table's column-major buffer into one [`Row`] view
//! per row. It is built once, in full, and never changes afterwards.
//!
//! # Usage
//!
//! ```
//! use mdbe_result::prelude::*;
//!
//! let table = QueryResultTable::builder()
//!     .column("id", EngineType::Int)
//!     .column("name", EngineType::Varchar)
//!     .build_from_rows(vec![
//!         vec![RawCell::Int(1), RawCell::from("a")],
//!         vec![RawCell::Int(2), RawCell::from("b")],
//!     ])?;
//! let rows = table.row_set();
//!
//! assert_eq!(rows.single_value_by_name(1, "name")?, HostValue::from("a"));
//! assert_eq!(rows.column_by_index(1)?.as_i32(), Some(&[Some(1), Some(2)][..]));
//! for row in &rows {
//!     println!("{}", row.column_by_index(2)?);
//! }
//! # Ok::<(), ResultError>(())
//! ```

use std::fmt;

use super::column_values::ColumnValues;
use super::cursor::RowCursor;
use super::index::{ColumnIndex, RowIndex};
use super::row::Row;
use super::table::QueryResultTable;
use crate::error::ResultError;
use crate::types::{HostType, HostValue};

/// The rows of a result table, in row order.
pub struct RowSet<'t> {
    /// The owning table.
    table: &'t QueryResultTable,
    /// One view per row.
    rows: Vec<Row<'t>>,
}

impl<'t> RowSet<'t> {
    /// Materialize the row views of `table`.
    #[must_use]
    pub fn new(table: &'t QueryResultTable) -> Self {
        let rows: Vec<Row<'t>> = (0..table.row_count())
            .map(|i| Row::new(table, RowIndex::new(i)))
            .collect();
        tracing::debug!("Materialized row set with {} rows", rows.len());
        Self { table, rows }
    }

    /// The table these rows view.
    #[inline]
    #[must_use]
    pub const fn table(&self) -> &'t QueryResultTable {
        self.table
    }

    /// All rows, in order.
    #[inline]
    #[must_use]
    pub fn all_rows(&self) -> &[Row<'t>] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    /// Check if there are no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A single row by 1-based row number.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` outside `[1, row_count()]`.
    pub fn single_row(&self, row: usize) -> Result<Row<'t>, ResultError> {
        let idx = RowIndex::from_ordinal(row, self.rows.len())?;
        Ok(self.rows[idx.raw()])
    }

    /// Resolve a column name to its ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if no column matches.
    pub fn column_index_by_name(&self, name: &str) -> Result<usize, ResultError> {
        self.table.column_index_by_name(name)
    }

    /// A single value by row number and column ordinal, default mapping.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`RowSet::single_row`] and
    /// [`Row::column_by_index`].
    pub fn single_value_by_index(&self, row: usize, ordinal: usize) -> Result<HostValue, ResultError> {
        self.single_row(row)?.column_by_index(ordinal)
    }

    /// A single value by row number and column ordinal, as `target`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`RowSet::single_row`] and
    /// [`Row::column_by_index_as`].
    pub fn single_value_by_index_as(
        &self,
        row: usize,
        ordinal: usize,
        target: HostType,
    ) -> Result<HostValue, ResultError> {
        self.single_row(row)?.column_by_index_as(ordinal, target)
    }

    /// A single value by row number and column name, default mapping.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` before any row check, otherwise as
    /// [`RowSet::single_value_by_index`].
    pub fn single_value_by_name(&self, row: usize, name: &str) -> Result<HostValue, ResultError> {
        let ordinal = self.column_index_by_name(name)?;
        self.single_value_by_index(row, ordinal)
    }

    /// A single value by row number and column name, as `target`.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` before any row check, otherwise as
    /// [`RowSet::single_value_by_index_as`].
    pub fn single_value_by_name_as(
        &self,
        row: usize,
        name: &str,
        target: HostType,
    ) -> Result<HostValue, ResultError> {
        let ordinal = self.column_index_by_name(name)?;
        self.single_value_by_index_as(row, ordinal, target)
    }

    /// A whole column by ordinal, default mapping.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `UnsupportedType` for the column, or the
    /// first `Conversion` error in row order. No partial column is returned.
    pub fn column_by_index(&self, ordinal: usize) -> Result<ColumnValues, ResultError> {
        self.extract_column(ordinal, None)
    }

    /// A whole column by ordinal, every value handed out as `target`.
    ///
    /// # Errors
    ///
    /// As [`RowSet::column_by_index`], plus `TypeMismatch`.
    pub fn column_by_index_as(
        &self,
        ordinal: usize,
        target: HostType,
    ) -> Result<ColumnValues, ResultError> {
        self.extract_column(ordinal, Some(target))
    }

    /// A whole column by name, default mapping.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound`, otherwise as [`RowSet::column_by_index`].
    pub fn column_by_name(&self, name: &str) -> Result<ColumnValues, ResultError> {
        let ordinal = self.column_index_by_name(name)?;
        self.column_by_index(ordinal)
    }

    /// A whole column by name, every value handed out as `target`.
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound`, otherwise as [`RowSet::column_by_index_as`].
    pub fn column_by_name_as(
        &self,
        name: &str,
        target: HostType,
    ) -> Result<ColumnValues, ResultError> {
        let ordinal = self.column_index_by_name(name)?;
        self.column_by_index_as(ordinal, target)
    }

    /// Iterate over the rows in order. Each call starts a fresh traversal.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Row<'t>>> {
        self.rows.iter().copied()
    }

    /// Alias of [`RowSet::iter`].
    pub fn rows(&self) -> std::iter::Copied<std::slice::Iter<'_, Row<'t>>> {
        self.iter()
    }

    /// A bidirectional cursor positioned before the first row.
    #[must_use]
    pub fn cursor(&self) -> RowCursor<'_, 't> {
        RowCursor::new(&self.rows)
    }

    /// Shared implementation of whole-column extraction.
    fn extract_column(
        &self,
        ordinal: usize,
        target: Option<HostType>,
    ) -> Result<ColumnValues, ResultError> {
        let column = ColumnIndex::from_ordinal(ordinal, self.table.column_count())?;
        let output_type = self.table.output_type(column, target)?;
        tracing::trace!(
            "Extracting column {} as {} over {} rows",
            ordinal,
            output_type,
            self.rows.len()
        );

        let mut values = ColumnValues::with_capacity(output_type, self.rows.len());
        for row in &self.rows {
            let value = row.column_by_index_as(ordinal, output_type)?;
            values.push(ordinal, value)?;
        }
        Ok(values)
    }
}

impl<'s, 't> IntoIterator for &'s RowSet<'t> {
    type Item = Row<'t>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, Row<'t>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for RowSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSet")
            .field("rows", &self.rows.len())
            .field("table", self.table)
            .finish()
    }
}

impl fmt::Display for RowSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nRowSet")?;
        writeln!(f, "Rows: {}", self.rows.len())?;
        writeln!(f, "Columns: {}", self.table.column_count())?;
        write!(f, "{}", self.table)
    }
}
