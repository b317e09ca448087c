//! Opaque 0-based positions.
//!
//! The public API speaks 1-based row numbers and column ordinals. These
//! newtypes are the only place the translation to 0-based slots happens, and
//! they cannot be built outside the `storage` module without a bounds check.

use std::fmt;

use crate::error::{Axis, ResultError};

/// Validates a 1-based index against `count` and returns the 0-based slot.
fn slot(axis: Axis, ordinal: usize, count: usize) -> Result<usize, ResultError> {
    if ordinal == 0 || ordinal > count {
        return Err(ResultError::out_of_range(axis, ordinal, count));
    }
    Ok(ordinal - 1)
}

/// A bounds-checked 0-based row position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Only for callers that iterate `0..row_count`.
    #[inline]
    pub(super) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Convert a 1-based row number, checking it against `row_count`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless `1 <= row <= row_count`.
    #[inline]
    pub fn from_ordinal(row: usize, row_count: usize) -> Result<Self, ResultError> {
        slot(Axis::Row, row, row_count).map(Self)
    }

    #[inline]
    pub(crate) const fn raw(self) -> usize {
        self.0
    }

    /// The 1-based row number.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

/// A bounds-checked 0-based column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Only for callers that iterate `0..column_count`.
    #[inline]
    pub(super) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Convert a 1-based column ordinal, checking it against `column_count`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless `1 <= ordinal <= column_count`.
    #[inline]
    pub fn from_ordinal(ordinal: usize, column_count: usize) -> Result<Self, ResultError> {
        slot(Axis::Column, ordinal, column_count).map(Self)
    }

    #[inline]
    pub(crate) const fn raw(self) -> usize {
        self.0
    }

    /// The 1-based column ordinal.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}
