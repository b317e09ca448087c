#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod common;

use common::{id_name_table, mixed_table, setup_test_logging};
use mdbe_result::prelude::*;

#[test]
fn test_id_name_example() {
    let table = id_name_table();
    let rows = table.row_set();

    assert_eq!(rows.row_count(), 2);
    assert_eq!(rows.column_count(), 2);
    assert_eq!(rows.column_index_by_name("name").unwrap(), 2);
    assert_eq!(rows.single_value_by_name(1, "name").unwrap(), HostValue::from("a"));
    assert_eq!(
        rows.column_by_index(1).unwrap().as_i32(),
        Some(&[Some(1), Some(2)][..])
    );
    assert!(matches!(
        rows.single_row(3),
        Err(ResultError::IndexOutOfRange { axis: Axis::Row, index: 3, count: 2 })
    ));
    assert!(matches!(
        rows.column_index_by_name("missing"),
        Err(ResultError::ColumnNotFound { name }) if name == "missing"
    ));
}

#[test]
fn test_single_row_bounds() {
    let table = id_name_table();
    let rows = table.row_set();

    assert!(matches!(rows.single_row(0), Err(ResultError::IndexOutOfRange { .. })));
    assert_eq!(rows.single_row(2).unwrap().row_number(), 2);
    assert!(matches!(
        rows.single_value_by_index(1, 3),
        Err(ResultError::IndexOutOfRange { axis: Axis::Column, index: 3, count: 2 })
    ));
    assert!(matches!(
        rows.column_by_index(0),
        Err(ResultError::IndexOutOfRange { axis: Axis::Column, .. })
    ));
}

#[test]
fn test_unknown_name_fails_before_row_check() {
    let table = id_name_table();
    let rows = table.row_set();
    assert!(matches!(
        rows.single_value_by_name(99, "missing"),
        Err(ResultError::ColumnNotFound { .. })
    ));
}

#[test]
fn test_all_rows_and_row_agreement() {
    let table = id_name_table();
    let rows = table.row_set();

    assert_eq!(rows.all_rows().len(), rows.row_count());
    for r in 1..=rows.row_count() {
        for c in 1..=rows.column_count() {
            assert_eq!(
                rows.single_value_by_index(r, c).unwrap(),
                rows.single_row(r).unwrap().column_by_index(c).unwrap()
            );
        }
    }
}

#[test]
fn test_column_by_name_as_widens() {
    let table = id_name_table();
    let rows = table.row_set();

    let ids = rows.column_by_name_as("id", HostType::I64).unwrap();
    assert_eq!(ids.host_type(), HostType::I64);
    assert_eq!(ids.as_i64(), Some(&[Some(1), Some(2)][..]));

    let err = rows.column_by_name_as("name", HostType::I32).unwrap_err();
    assert!(matches!(
        err,
        ResultError::TypeMismatch { ordinal: 2, expected: HostType::Text, requested: HostType::I32 }
    ));
}

#[test]
fn test_column_extraction_is_atomic() {
    setup_test_logging();
    let table = QueryResultTable::builder()
        .non_null_column("n", EngineType::Int)
        .build_from_rows(vec![
            vec![RawCell::Int(1)],
            vec![RawCell::Null],
            vec![RawCell::Int(3)],
        ])
        .unwrap();
    let rows = table.row_set();

    let err = rows.column_by_index(1).unwrap_err();
    assert!(matches!(
        err,
        ResultError::Conversion {
            row: 2,
            ordinal: 1,
            reason: ConversionFailure::NullInNonNullable,
            ..
        }
    ));
}

#[test]
fn test_empty_row_set_still_checks_ordinal() {
    setup_test_logging();
    let table = QueryResultTable::builder()
        .column("id", EngineType::Int)
        .build(ColumnStore::new(1))
        .unwrap();
    let rows = table.row_set();

    assert!(rows.is_empty());
    assert!(rows.all_rows().is_empty());
    assert!(rows.column_by_index(1).unwrap().is_empty());
    assert!(matches!(
        rows.column_by_index(2),
        Err(ResultError::IndexOutOfRange { axis: Axis::Column, index: 2, count: 1 })
    ));
    assert!(rows.single_row(1).is_err());
}

#[test]
fn test_iteration_is_repeatable() {
    let table = id_name_table();
    let rows = table.row_set();

    let first: Vec<usize> = rows.iter().map(|r| r.row_number()).collect();
    let second: Vec<usize> = (&rows).into_iter().map(|r| r.row_number()).collect();
    assert_eq!(first, vec![1, 2]);
    assert_eq!(first, second);
    assert_eq!(rows.rows().count(), 2);
}

#[test]
fn test_cursor_set_leaves_row_set_intact() {
    let table = id_name_table();
    let rows = table.row_set();
    let before: Vec<Row<'_>> = rows.iter().collect();

    let mut cursor = rows.cursor();
    let last = rows.single_row(2).unwrap();
    assert!(cursor.next().is_some());
    cursor.set(last).unwrap();
    assert!(cursor.next().is_some());
    assert!(cursor.previous().is_some());
    cursor.set(last).unwrap();

    assert_eq!(cursor.view()[0], last);
    assert_eq!(rows.iter().collect::<Vec<_>>(), before);
    assert_eq!(rows.single_value_by_index(1, 2).unwrap(), HostValue::from("a"));
}

#[test]
fn test_row_values_and_display() {
    let table = mixed_table();
    let rows = table.row_set();
    let second = rows.single_row(2).unwrap();

    let values = second.values().unwrap();
    assert_eq!(values[0], HostValue::I64(11));
    assert!(values[1..].iter().all(HostValue::is_null));

    let rendered = second.to_string();
    assert!(rendered.starts_with("Row[2]:"));
    assert!(rendered.contains("  id: 11"));
    assert!(rendered.contains("  flag?: NULL"));
}

#[test]
fn test_column_values_round_through_host_values() {
    let table = mixed_table();
    let rows = table.row_set();

    let scores = rows.column_by_name("score").unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores.null_count(), 1);
    assert_eq!(
        scores.into_values(),
        vec![HostValue::F64(0.5), HostValue::Null]
    );
}
