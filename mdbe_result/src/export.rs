//! CSV and JSON rendering of results.
//!
//! Both renderings convert every cell with its column's default mapping. A
//! cell that fails conversion aborts the export with that cell's error.

use std::io;
use std::path::Path;

use itertools::Itertools;
use serde_json::{Map, Number, Value};

use crate::error::ResultError;
use crate::storage::{QueryResultTable, RowSet};
use crate::types::HostValue;

impl QueryResultTable {
    /// Export this table to a CSV file.
    ///
    /// Writes a header row of column names, then one record per row. NULL is
    /// written as the configured `csv_null` string.
    ///
    /// # Example
    ///
    /// ```ignore
    /// table.to_csv("results/orders.csv")?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Export` if the file cannot be created or written, or the first
    /// conversion error met while reading cells.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ResultError> {
        let path = path.as_ref();
        let writer = csv::Writer::from_path(path)
            .map_err(|e| ResultError::export(format!("Failed to create CSV writer: {e}")))?;
        let rows = self.write_csv(writer)?;
        tracing::info!("Exported {} rows to {}", rows, path.display());
        Ok(())
    }

    /// Export this table to a CSV string.
    ///
    /// # Errors
    ///
    /// Same as [`QueryResultTable::to_csv`], minus the file errors.
    pub fn to_csv_string(&self) -> Result<String, ResultError> {
        let mut buffer = Vec::new();
        let rows = self.write_csv(csv::Writer::from_writer(&mut buffer))?;
        tracing::info!("Exported {} rows to CSV string", rows);

        String::from_utf8(buffer)
            .map_err(|e| ResultError::export(format!("Failed to convert CSV to string: {e}")))
    }

    /// Writes header and records, returning the number of records.
    fn write_csv<W: io::Write>(&self, mut writer: csv::Writer<W>) -> Result<usize, ResultError> {
        writer
            .write_record(self.column_names())
            .map_err(|e| ResultError::export(format!("Failed to write CSV header: {e}")))?;

        let null = self.config().csv_null.as_str();
        let rows = self.row_set();
        for row in &rows {
            let record: Vec<String> = row
                .values()?
                .into_iter()
                .map(|value| match value {
                    HostValue::Null => null.to_string(),
                    other => other.to_string(),
                })
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| ResultError::export(format!("Failed to write CSV row: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| ResultError::export(format!("Failed to flush CSV writer: {e}")))?;
        Ok(rows.row_count())
    }
}

impl RowSet<'_> {
    /// Render the rows as a JSON array of objects keyed by column name.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error met while reading cells.
    pub fn to_json(&self) -> Result<Value, ResultError> {
        let names: Vec<&str> = self.table().column_names().collect();
        let objects = self
            .iter()
            .map(|row| {
                let values = row.values()?;
                let object: Map<String, Value> = names
                    .iter()
                    .zip(&values)
                    .map(|(name, value)| ((*name).to_string(), value.to_json()))
                    .collect();
                Ok(Value::Object(object))
            })
            .collect::<Result<Vec<_>, ResultError>>()?;
        Ok(Value::Array(objects))
    }

    /// Render the rows as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// As [`RowSet::to_json`], plus `Export` if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ResultError> {
        let value = self.to_json()?;
        serde_json::to_string_pretty(&value)
            .map_err(|e| ResultError::export(format!("Failed to serialize rows: {e}")))
    }
}

impl HostValue {
    /// JSON form of a value.
    ///
    /// Integers that fit in 64 bits and finite floats become numbers; NaN and
    /// infinities become `null`. Decimals, bytes (hex) and temporal values
    /// become strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::I8(v) => Value::from(*v),
            Self::I16(v) => Value::from(*v),
            Self::I32(v) => Value::from(*v),
            Self::I64(v) => Value::from(*v),
            Self::I128(v) => i64::try_from(*v).map_or_else(|_| Value::String(v.to_string()), Value::from),
            Self::F32(v) => Number::from_f64(f64::from(*v)).map_or(Value::Null, Value::Number),
            Self::F64(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
            Self::Bytes(v) => Value::String(format!("{:02x}", v.iter().format(""))),
            Self::Decimal(_)
            | Self::Text(_)
            | Self::Date(_)
            | Self::Time(_)
            | Self::Timestamp(_)
            | Self::Duration(_) => Value::String(self.to_string()),
        }
    }
}
