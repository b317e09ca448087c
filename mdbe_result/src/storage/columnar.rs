//! Raw column-major buffer.
//!
//! This is the shape the engine hands results over in: one `Vec<RawCell>` per
//! column, row-aligned across columns. It knows nothing about names or types.

use contracts::*;

use crate::error::ResultError;
use crate::types::RawCell;

/// A column-major store of raw cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStore {
    /// Column data, indexed by 0-based column slot.
    columns: Vec<Vec<RawCell>>,
    /// Number of rows in every column.
    num_rows: usize,
}

impl ColumnStore {
    /// Validates the internal state of the store.
    ///
    /// Ensures all columns have the same length and match the expected row
    /// count of the store.
    fn is_valid_state(&self) -> bool {
        self.columns.iter().all(|col| col.len() == self.num_rows)
    }

    /// Create an empty store with `width` columns.
    #[must_use]
    #[ensures(ret.is_valid_state())]
    pub fn new(width: usize) -> Self {
        Self {
            columns: vec![Vec::new(); width],
            num_rows: 0,
        }
    }

    /// Create a store from column data.
    ///
    /// All columns must have the same length.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if columns have inconsistent lengths.
    #[ensures(ret.as_ref().map_or(true, Self::is_valid_state))]
    pub fn from_columns(columns: Vec<Vec<RawCell>>) -> Result<Self, ResultError> {
        let num_rows = columns.first().map_or(0, Vec::len);

        for (i, col) in columns.iter().enumerate() {
            if col.len() != num_rows {
                return Err(ResultError::malformed(format!(
                    "column {} has {} rows but expected {}",
                    i + 1,
                    col.len(),
                    num_rows
                )));
            }
        }

        Ok(Self { columns, num_rows })
    }

    /// Build a store from row-major data, transposing it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if any row's width differs from `width`.
    pub fn from_rows<I, R>(width: usize, rows: I) -> Result<Self, ResultError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = RawCell>,
    {
        let mut store = Self::new(width);
        for row in rows {
            store.push_row(row)?;
        }
        Ok(store)
    }

    /// Appends a full row of cells to the store.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if the row does not have exactly one cell per
    /// column; the store is left unchanged.
    #[ensures(self.is_valid_state())]
    pub fn push_row<R>(&mut self, row: R) -> Result<(), ResultError>
    where
        R: IntoIterator<Item = RawCell>,
    {
        let cells: Vec<RawCell> = row.into_iter().collect();
        if cells.len() != self.columns.len() {
            return Err(ResultError::malformed(format!(
                "row {} has {} cells but the store has {} columns",
                self.num_rows + 1,
                cells.len(),
                self.columns.len()
            )));
        }
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.push(cell);
        }
        self.num_rows += 1;
        Ok(())
    }

    /// Get the number of rows.
    #[inline]
    pub const fn height(&self) -> usize {
        self.num_rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Get a column by 0-based slot.
    pub fn column(&self, slot: usize) -> Option<&[RawCell]> {
        self.columns.get(slot).map(Vec::as_slice)
    }

    /// The cell at slots already checked against `width()` and `height()`.
    #[debug_requires(column < self.width() && row < self.height())]
    pub(crate) fn cell(&self, column: usize, row: usize) -> &RawCell {
        &self.columns[column][row]
    }

    /// Retrieves a single cell by 0-based column and row slots.
    pub fn get_cell(&self, column: usize, row: usize) -> Option<&RawCell> {
        self.columns.get(column)?.get(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns() {
        let store = ColumnStore::from_columns(vec![
            vec![RawCell::Int(1), RawCell::Int(2)],
            vec![RawCell::from("a"), RawCell::from("b")],
        ])
        .unwrap();
        assert_eq!(store.height(), 2);
        assert_eq!(store.width(), 2);
        assert_eq!(store.get_cell(1, 0), Some(&RawCell::from("a")));
        assert_eq!(store.get_cell(2, 0), None);
        assert_eq!(store.cell(0, 1), &RawCell::Int(2));
    }

    #[test]
    fn test_from_columns_ragged() {
        let err = ColumnStore::from_columns(vec![vec![RawCell::Int(1)], vec![]]).unwrap_err();
        assert!(matches!(err, ResultError::MalformedBuffer(_)));
    }

    #[test]
    fn test_from_rows_transposes() {
        let store = ColumnStore::from_rows(
            2,
            vec![
                vec![RawCell::Int(1), RawCell::from("a")],
                vec![RawCell::Int(2), RawCell::from("b")],
            ],
        )
        .unwrap();
        assert_eq!(store.column(0), Some(&[RawCell::Int(1), RawCell::Int(2)][..]));
    }

    #[test]
    fn test_push_row_wrong_width() {
        let mut store = ColumnStore::new(2);
        assert!(store.push_row(vec![RawCell::Int(1)]).is_err());
        assert_eq!(store.height(), 0);
        assert_eq!(store.column(0), Some(&[][..]));
    }

    #[test]
    fn test_empty_store() {
        let store = ColumnStore::from_columns(Vec::new()).unwrap();
        assert_eq!(store.height(), 0);
        assert_eq!(store.width(), 0);
    }
}
