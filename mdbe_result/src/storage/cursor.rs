//! Bidirectional cursor over a row set.

use std::borrow::Cow;

use super::row::Row;
use crate::error::ResultError;

/// A list-style cursor that can move both ways over a row set.
///
/// The cursor sits *between* rows: before the first call to `next` it is in
/// front of row 1, and after the last row it is past the end. Positions are
/// reported 1-based.
///
/// `set` replaces the row most recently returned inside the cursor's own view.
/// The first replacement copies the view; the row set it came from is never
/// touched.
#[derive(Debug, Clone)]
pub struct RowCursor<'s, 't> {
    /// Rows visible through this cursor.
    rows: Cow<'s, [Row<'t>]>,
    /// Number of rows in front of the cursor.
    cursor: usize,
    /// Slot of the row last returned by `next` or `previous`.
    last: Option<usize>,
}

impl<'s, 't> RowCursor<'s, 't> {
    /// A cursor in front of the first row.
    pub(super) const fn new(rows: &'s [Row<'t>]) -> Self {
        Self {
            rows: Cow::Borrowed(rows),
            cursor: 0,
            last: None,
        }
    }

    /// Whether `next` would return a row.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor < self.rows.len()
    }

    /// Whether `previous` would return a row.
    #[inline]
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Row number `next` would return, or `row_count() + 1` at the end.
    #[inline]
    #[must_use]
    pub const fn next_index(&self) -> usize {
        self.cursor + 1
    }

    /// Row number `previous` would return, or 0 at the start.
    #[inline]
    #[must_use]
    pub const fn previous_index(&self) -> usize {
        self.cursor
    }

    /// Move back one row and return it.
    pub fn previous(&mut self) -> Option<Row<'t>> {
        if !self.has_previous() {
            return None;
        }
        self.cursor -= 1;
        self.last = Some(self.cursor);
        Some(self.rows[self.cursor])
    }

    /// Replace the row last returned by `next` or `previous` in this cursor's
    /// view.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentRow` if neither `next` nor `previous` has returned a
    /// row yet.
    pub fn set(&mut self, row: Row<'t>) -> Result<(), ResultError> {
        let slot = self.last.ok_or(ResultError::NoCurrentRow)?;
        self.rows.to_mut()[slot] = row;
        Ok(())
    }

    /// The rows as currently seen through this cursor.
    #[must_use]
    pub fn view(&self) -> &[Row<'t>] {
        &self.rows
    }
}

impl<'t> Iterator for RowCursor<'_, 't> {
    type Item = Row<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = *self.rows.get(self.cursor)?;
        self.last = Some(self.cursor);
        self.cursor += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowCursor<'_, '_> {}

#[cfg(test)]
mod tests {
    use crate::storage::QueryResultTable;
    use crate::types::{EngineType, HostValue, RawCell};

    use super::*;

    fn table() -> QueryResultTable {
        QueryResultTable::builder()
            .column("n", EngineType::Int)
            .build_from_rows((1..=3).map(|i| vec![RawCell::Int(i)]))
            .unwrap()
    }

    #[test]
    fn test_walk_both_ways() {
        let table = table();
        let rows = table.row_set();
        let mut cursor = rows.cursor();

        assert!(!cursor.has_previous());
        assert_eq!(cursor.previous_index(), 0);
        assert_eq!(cursor.next_index(), 1);

        assert_eq!(cursor.next().map(|r| r.row_number()), Some(1));
        assert_eq!(cursor.next().map(|r| r.row_number()), Some(2));
        assert_eq!(cursor.previous().map(|r| r.row_number()), Some(2));
        assert_eq!(cursor.previous().map(|r| r.row_number()), Some(1));
        assert!(cursor.previous().is_none());

        assert_eq!(cursor.by_ref().count(), 3);
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_index(), 4);
    }

    #[test]
    fn test_set_requires_current_row() {
        let table = table();
        let rows = table.row_set();
        let mut cursor = rows.cursor();
        let first = rows.single_row(1).unwrap();
        assert!(matches!(cursor.set(first), Err(ResultError::NoCurrentRow)));
    }

    #[test]
    fn test_set_does_not_touch_row_set() {
        let table = table();
        let rows = table.row_set();
        let mut cursor = rows.cursor();
        let third = rows.single_row(3).unwrap();

        cursor.next();
        cursor.set(third).unwrap();

        assert_eq!(cursor.view()[0].column_by_index(1).unwrap(), HostValue::I32(3));
        assert_eq!(rows.single_value_by_index(1, 1).unwrap(), HostValue::I32(1));
    }
}
