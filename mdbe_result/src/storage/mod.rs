//! Result storage and the row-oriented views over it.

mod column;
mod column_values;
mod columnar;
mod cursor;
mod index;
mod row;
mod row_set;
mod table;

pub use column::ColumnMetadata;
pub use column_values::ColumnValues;
pub use columnar::ColumnStore;
pub use cursor::RowCursor;
pub use index::{ColumnIndex, RowIndex};
pub use row::Row;
pub use row_set::RowSet;
pub use table::{QueryResultTable, QueryResultTableBuilder};
