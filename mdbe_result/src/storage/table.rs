//! Query result table.
//!
//! `QueryResultTable` wraps the raw column store together with the column
//! metadata, the type mapping registry and the result configuration. It is
//! the single owner of a result snapshot; rows and row sets borrow from it.
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
//!
//! assert_eq!(table.column_index_by_name("name")?, 2);
//! assert_eq!(table.typed_cell(2, 2)?, HostValue::from("b"));
//! # Ok::<(), ResultError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use contracts::*;
use indexmap::IndexMap;
use mdbe_common::ResultConfig;

use super::column::ColumnMetadata;
use super::columnar::ColumnStore;
use super::index::{ColumnIndex, RowIndex};
use super::row_set::RowSet;
use crate::error::{ConversionFailure, ResultError};
use crate::mapping::{TypeMappingEntry, TypeMappingRegistry};
use crate::types::{EngineType, HostType, HostValue, RawCell};

/// An immutable, finalized query result.
///
/// Invariants established at construction:
/// - every column holds exactly `row_count()` cells;
/// - ordinals run `1..=column_count()` in order;
/// - every name resolves to exactly one ordinal under the configured
///   identifier case rule.
pub struct QueryResultTable {
    /// Column metadata, indexed by 0-based slot.
    columns: Vec<ColumnMetadata>,
    /// Raw cells, column-major.
    store: ColumnStore,
    /// Normalized column name → 0-based slot.
    name_map: IndexMap<String, usize>,
    /// Mapping from engine types to host values.
    registry: Arc<TypeMappingRegistry>,
    /// Lookup and rendering options.
    config: ResultConfig,
}

impl QueryResultTable {
    /// Checks the construction invariants.
    fn is_valid_state(&self) -> bool {
        self.columns.len() == self.store.width()
            && self.name_map.len() == self.columns.len()
            && self
                .columns
                .iter()
                .enumerate()
                .all(|(i, c)| c.ordinal == i + 1)
    }

    /// Wrap a buffer using the shared built-in registry and default config.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if the metadata and buffer disagree, the
    /// ordinals are not `1..=n` in order, or two columns share a name.
    pub fn new(columns: Vec<ColumnMetadata>, store: ColumnStore) -> Result<Self, ResultError> {
        Self::with_options(
            columns,
            store,
            TypeMappingRegistry::shared(),
            ResultConfig::default(),
        )
    }

    /// Wrap a buffer with an explicit registry and configuration.
    ///
    /// # Errors
    ///
    /// Same as [`QueryResultTable::new`].
    #[ensures(ret.as_ref().map_or(true, Self::is_valid_state))]
    pub fn with_options(
        columns: Vec<ColumnMetadata>,
        store: ColumnStore,
        registry: Arc<TypeMappingRegistry>,
        config: ResultConfig,
    ) -> Result<Self, ResultError> {
        if columns.len() != store.width() {
            return Err(ResultError::malformed(format!(
                "{} column descriptions for {} data columns",
                columns.len(),
                store.width()
            )));
        }

        let mut name_map = IndexMap::with_capacity(columns.len());
        for (slot, column) in columns.iter().enumerate() {
            if column.ordinal != slot + 1 {
                return Err(ResultError::malformed(format!(
                    "column '{}' has ordinal {} at position {}",
                    column.name,
                    column.ordinal,
                    slot + 1
                )));
            }
            let key = config.normalize_name(&column.name).into_owned();
            if let Some(previous) = name_map.insert(key, slot) {
                return Err(ResultError::malformed(format!(
                    "column name '{}' is used by ordinals {} and {}",
                    column.name,
                    previous + 1,
                    slot + 1
                )));
            }
            if registry.get(column.engine_type).is_none() {
                tracing::warn!(
                    "Column '{}' has engine type {} with no registry entry; reads will fail",
                    column.name,
                    column.engine_type
                );
            }
        }

        tracing::debug!(
            "Built result table: {} columns x {} rows",
            columns.len(),
            store.height()
        );

        Ok(Self {
            columns,
            store,
            name_map,
            registry,
            config,
        })
    }

    /// Start building a table column by column.
    #[must_use]
    pub fn builder() -> QueryResultTableBuilder {
        QueryResultTableBuilder::default()
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[inline]
    pub const fn row_count(&self) -> usize {
        self.store.height()
    }

    /// Check if the table has no rows.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Resolve a column name to its 1-based ordinal in O(1).
    ///
    /// # Errors
    ///
    /// Returns `ColumnNotFound` if no column matches under the configured
    /// identifier case rule.
    pub fn column_index_by_name(&self, name: &str) -> Result<usize, ResultError> {
        let key = self.config.normalize_name(name);
        self.name_map
            .get(key.as_ref())
            .map(|slot| slot + 1)
            .ok_or_else(|| ResultError::column_not_found(name))
    }

    /// The raw cell at a 1-based row and column.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is outside `[1, count]`.
    pub fn raw_cell(&self, row: usize, ordinal: usize) -> Result<&RawCell, ResultError> {
        let row = RowIndex::from_ordinal(row, self.row_count())?;
        let column = ColumnIndex::from_ordinal(ordinal, self.column_count())?;
        Ok(self.raw_at(row, column))
    }

    /// The cell at a 1-based row and column, converted with the column's
    /// default mapping.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange`, `UnsupportedType` or `Conversion`.
    pub fn typed_cell(&self, row: usize, ordinal: usize) -> Result<HostValue, ResultError> {
        let row = RowIndex::from_ordinal(row, self.row_count())?;
        let column = ColumnIndex::from_ordinal(ordinal, self.column_count())?;
        self.typed_at(row, column, None)
    }

    /// The cell at a 1-based row and column, converted and handed out as
    /// `target`.
    ///
    /// # Errors
    ///
    /// As [`QueryResultTable::typed_cell`], plus `TypeMismatch` if the
    /// column's default host type cannot widen to `target`.
    pub fn typed_cell_as(
        &self,
        row: usize,
        ordinal: usize,
        target: HostType,
    ) -> Result<HostValue, ResultError> {
        let row = RowIndex::from_ordinal(row, self.row_count())?;
        let column = ColumnIndex::from_ordinal(ordinal, self.column_count())?;
        self.typed_at(row, column, Some(target))
    }

    /// All column metadata in ordinal order.
    #[inline]
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Metadata for one column.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for an ordinal outside `[1, column_count()]`.
    pub fn column(&self, ordinal: usize) -> Result<&ColumnMetadata, ResultError> {
        let column = ColumnIndex::from_ordinal(ordinal, self.column_count())?;
        Ok(&self.columns[column.raw()])
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Engine types in ordinal order.
    pub fn column_types(&self) -> impl ExactSizeIterator<Item = EngineType> + '_ {
        self.columns.iter().map(|c| c.engine_type)
    }

    /// Default host type of every column, in ordinal order.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for the first column without a registry entry.
    pub fn host_types(&self) -> Result<Vec<HostType>, ResultError> {
        (0..self.column_count())
            .map(|slot| self.entry_at(ColumnIndex::new(slot)).map(TypeMappingEntry::host_type))
            .collect()
    }

    /// Default host type of one column.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `UnsupportedType`.
    pub fn host_type(&self, ordinal: usize) -> Result<HostType, ResultError> {
        let column = ColumnIndex::from_ordinal(ordinal, self.column_count())?;
        self.entry_at(column).map(TypeMappingEntry::host_type)
    }

    /// The registry used for conversions.
    #[inline]
    pub fn registry(&self) -> &TypeMappingRegistry {
        &self.registry
    }

    /// The configuration this table was built with.
    #[inline]
    pub const fn config(&self) -> &ResultConfig {
        &self.config
    }

    /// Get a reference to the underlying column store.
    #[inline]
    pub const fn store(&self) -> &ColumnStore {
        &self.store
    }

    /// Materialize the row-major view of this table.
    pub fn row_set(&self) -> RowSet<'_> {
        RowSet::new(self)
    }

    // ── Checked-index internals shared with Row / RowSet ─────────────────────

    /// Registry entry for a column.
    pub(crate) fn entry_at(&self, column: ColumnIndex) -> Result<&TypeMappingEntry, ResultError> {
        let meta = &self.columns[column.raw()];
        self.registry
            .resolve(meta.engine_type)
            .map_err(|e| e.at_column(meta.ordinal))
    }

    /// Raw cell at validated positions.
    #[debug_requires(row.raw() < self.row_count() && column.raw() < self.column_count())]
    pub(crate) fn raw_at(&self, row: RowIndex, column: ColumnIndex) -> &RawCell {
        self.store.cell(column.raw(), row.raw())
    }

    /// Convert the cell at validated positions.
    ///
    /// `target` of `None` uses the column's default host type.
    pub(crate) fn typed_at(
        &self,
        row: RowIndex,
        column: ColumnIndex,
        target: Option<HostType>,
    ) -> Result<HostValue, ResultError> {
        let meta = &self.columns[column.raw()];
        let entry = self.entry_at(column)?;
        let mapped = entry.host_type();
        if let Some(requested) = target {
            if !mapped.can_widen_to(requested) {
                return Err(ResultError::type_mismatch(meta.ordinal, mapped, requested));
            }
        }

        let conversion_error =
            |reason| ResultError::conversion(row.ordinal(), meta.ordinal, meta.engine_type, reason);

        let value = entry
            .convert(self.raw_at(row, column))
            .map_err(conversion_error)?;
        if value.is_null() && !meta.nullable {
            return Err(conversion_error(ConversionFailure::NullInNonNullable));
        }

        match target {
            Some(requested) if requested != mapped => {
                let rendered = value.to_string();
                value
                    .widen(requested)
                    .ok_or_else(|| conversion_error(ConversionFailure::out_of_range(rendered, requested)))
            }
            _ => Ok(value),
        }
    }

    /// Check that `target` (or the default) is a valid request for a column,
    /// returning the host type values will be handed out as.
    pub(crate) fn output_type(
        &self,
        column: ColumnIndex,
        target: Option<HostType>,
    ) -> Result<HostType, ResultError> {
        let mapped = self.entry_at(column)?.host_type();
        match target {
            Some(requested) if !mapped.can_widen_to(requested) => Err(ResultError::type_mismatch(
                column.ordinal(),
                mapped,
                requested,
            )),
            Some(requested) => Ok(requested),
            None => Ok(mapped),
        }
    }
}

impl fmt::Debug for QueryResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResultTable")
            .field("rows", &self.row_count())
            .field("columns", &self.columns)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for QueryResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "Empty table");
        }

        // Cells that fail conversion are shown as their raw form, bracketed.
        let format_cell = |row: usize, col: usize| -> String {
            let (row, column) = (RowIndex::new(row), ColumnIndex::new(col));
            self.typed_at(row, column, None).map_or_else(
                |_| format!("<{}>", self.raw_at(row, column)),
                |value| value.to_string(),
            )
        };

        let num_rows = self.row_count();
        let preview = self.config.preview_rows.max(2);
        let head = preview / 2;
        let tail = preview - head;
        let shown: Vec<usize> = if num_rows <= preview {
            (0..num_rows).collect()
        } else {
            (0..head).chain(num_rows - tail..num_rows).collect()
        };

        let rendered: Vec<Vec<String>> = shown
            .iter()
            .map(|&row| (0..self.columns.len()).map(|col| format_cell(row, col)).collect())
            .collect();

        // 1. Precompute widths
        let mut col_widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .collect();
        let row_label_width = num_rows.to_string().len().max(3);
        for cells in &rendered {
            for (i, cell) in cells.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }

        // 2. Draw Header
        write!(f, "│ {:>width$} │", "row", width = row_label_width)?;
        for (i, column) in self.columns.iter().enumerate() {
            write!(f, " {:^width$} │", column.name, width = col_widths[i])?;
        }
        writeln!(f)?;

        // 3. Draw Separator
        write!(f, "├{:─^width$}┼", "─", width = row_label_width + 2)?;
        for width in &col_widths {
            write!(f, "{:─^width$}┼", "─", width = width + 2)?;
        }
        writeln!(f)?;

        // 4. Draw Rows (text left-aligned, everything else right-aligned)
        let print_row = |f: &mut fmt::Formatter<'_>, row: usize, cells: &[String]| -> fmt::Result {
            write!(f, "│ {:>width$} │", row + 1, width = row_label_width)?;
            for (i, cell) in cells.iter().enumerate() {
                if self.columns[i].engine_type.is_textual() {
                    write!(f, " {:<width$} │", cell, width = col_widths[i])?;
                } else {
                    write!(f, " {:>width$} │", cell, width = col_widths[i])?;
                }
            }
            writeln!(f)
        };

        for (pos, (&row, cells)) in shown.iter().zip(&rendered).enumerate() {
            if num_rows > preview && pos == head {
                write!(f, "│ {:>width$} │", "...", width = row_label_width)?;
                for width in &col_widths {
                    write!(f, " {:>width$} │", "...", width = width)?;
                }
                writeln!(f)?;
                writeln!(f, "... {} more rows", num_rows - preview)?;
            }
            print_row(f, row, cells)?;
        }

        Ok(())
    }
}

/// Builder assembling column metadata before the buffer arrives.
#[derive(Debug, Default)]
pub struct QueryResultTableBuilder {
    /// Columns in ordinal order.
    columns: Vec<ColumnMetadata>,
    /// Registry override; the shared built-in registry when `None`.
    registry: Option<Arc<TypeMappingRegistry>>,
    /// Configuration.
    config: ResultConfig,
}

impl QueryResultTableBuilder {
    /// Append a nullable column; its ordinal is its position.
    #[must_use]
    pub fn column(self, name: impl Into<String>, engine_type: EngineType) -> Self {
        self.column_with_nullable(name, engine_type, true)
    }

    /// Append a column that rejects NULL cells.
    #[must_use]
    pub fn non_null_column(self, name: impl Into<String>, engine_type: EngineType) -> Self {
        self.column_with_nullable(name, engine_type, false)
    }

    /// Append a column with explicit nullability.
    #[must_use]
    pub fn column_with_nullable(
        mut self,
        name: impl Into<String>,
        engine_type: EngineType,
        nullable: bool,
    ) -> Self {
        let ordinal = self.columns.len() + 1;
        self.columns
            .push(ColumnMetadata::new(name, ordinal, engine_type).with_nullable(nullable));
        self
    }

    /// Use a custom registry.
    #[must_use]
    pub fn registry(mut self, registry: Arc<TypeMappingRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a custom configuration.
    #[must_use]
    pub fn config(mut self, config: ResultConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a configuration parsed from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::Config` if the JSON does not describe a valid
    /// configuration.
    pub fn config_json(mut self, json: &str) -> Result<Self, ResultError> {
        self.config = ResultConfig::from_json_str(json)?;
        Ok(self)
    }

    /// Finish with a column-major buffer.
    ///
    /// # Errors
    ///
    /// See [`QueryResultTable::with_options`].
    pub fn build(self, store: ColumnStore) -> Result<QueryResultTable, ResultError> {
        let registry = self.registry.unwrap_or_else(TypeMappingRegistry::shared);
        QueryResultTable::with_options(self.columns, store, registry, self.config)
    }

    /// Finish with column vectors.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` for ragged columns, otherwise see
    /// [`QueryResultTable::with_options`].
    pub fn build_from_columns(
        self,
        columns: Vec<Vec<RawCell>>,
    ) -> Result<QueryResultTable, ResultError> {
        let store = ColumnStore::from_columns(columns)?;
        self.build(store)
    }

    /// Finish with row-major data, transposed into columns.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` if a row's width differs from the number of
    /// declared columns.
    pub fn build_from_rows<I, R>(self, rows: I) -> Result<QueryResultTable, ResultError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = RawCell>,
    {
        let store = ColumnStore::from_rows(self.columns.len(), rows)?;
        self.build(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdbe_common::IdentifierCase;

    fn sample() -> QueryResultTable {
        QueryResultTable::builder()
            .column("id", EngineType::Int)
            .column("name", EngineType::Varchar)
            .build_from_rows(vec![
                vec![RawCell::Int(1), RawCell::from("a")],
                vec![RawCell::Int(2), RawCell::from("b")],
            ])
            .unwrap()
    }

    #[test]
    fn test_counts() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_raw_and_typed_cells() {
        let table = sample();
        assert_eq!(table.raw_cell(1, 2).unwrap(), &RawCell::from("a"));
        assert_eq!(table.typed_cell(2, 1).unwrap(), HostValue::I32(2));
        assert_eq!(
            table.typed_cell_as(2, 1, HostType::I64).unwrap(),
            HostValue::I64(2)
        );
    }

    #[test]
    fn test_typed_cell_as_mismatch() {
        let table = sample();
        let err = table.typed_cell_as(1, 2, HostType::I32).unwrap_err();
        assert!(matches!(
            err,
            ResultError::TypeMismatch {
                ordinal: 2,
                expected: HostType::Text,
                requested: HostType::I32
            }
        ));
    }

    #[test]
    fn test_bounds() {
        let table = sample();
        assert!(matches!(table.raw_cell(0, 1), Err(ResultError::IndexOutOfRange { .. })));
        assert!(matches!(table.raw_cell(1, 3), Err(ResultError::IndexOutOfRange { .. })));
        assert!(matches!(table.typed_cell(3, 1), Err(ResultError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_rejects_bad_ordinals() {
        let columns = vec![
            ColumnMetadata::new("a", 1, EngineType::Int),
            ColumnMetadata::new("b", 3, EngineType::Int),
        ];
        let store = ColumnStore::new(2);
        assert!(matches!(
            QueryResultTable::new(columns, store),
            Err(ResultError::MalformedBuffer(_))
        ));
    }

    #[test]
    fn test_rejects_width_mismatch() {
        let columns = vec![ColumnMetadata::new("a", 1, EngineType::Int)];
        assert!(QueryResultTable::new(columns, ColumnStore::new(2)).is_err());
    }

    #[test]
    fn test_rejects_duplicate_names_after_folding() {
        let result = QueryResultTable::builder()
            .config(
                ResultConfig::builder()
                    .identifier_case(IdentifierCase::Insensitive)
                    .build(),
            )
            .column("Name", EngineType::Varchar)
            .column("NAME", EngineType::Varchar)
            .build(ColumnStore::new(2));
        assert!(matches!(result, Err(ResultError::MalformedBuffer(_))));
    }

    #[test]
    fn test_host_types() {
        let table = sample();
        assert_eq!(table.host_types().unwrap(), vec![HostType::I32, HostType::Text]);
        assert_eq!(table.column_types().collect::<Vec<_>>(), vec![
            EngineType::Int,
            EngineType::Varchar
        ]);
    }

    #[test]
    fn test_display_aligns_non_ascii_text() {
        let table = QueryResultTable::builder()
            .column("città", EngineType::Varchar)
            .column("n", EngineType::Int)
            .build_from_rows(vec![
                vec![RawCell::from("Zürich"), RawCell::Int(7)],
                vec![RawCell::from("Roma"), RawCell::Int(12)],
            ])
            .unwrap();
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[2].contains("│ Zürich │  7 │"));
        assert!(lines[3].contains("│ Roma   │ 12 │"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{rendered}");
    }

    #[test]
    fn test_display_elides_middle_rows() {
        let table = QueryResultTable::builder()
            .config(ResultConfig::builder().preview_rows(4).build())
            .column("n", EngineType::Int)
            .build_from_rows((1..=20).map(|i| vec![RawCell::Int(i)]))
            .unwrap();
        let rendered = table.to_string();
        assert!(rendered.contains("... 16 more rows"));
        assert!(rendered.contains("│  20 │"));
        assert!(!rendered.contains("│  10 │"));
    }
}
