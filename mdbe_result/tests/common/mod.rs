#![allow(dead_code)]

use std::sync::Once;

use mdbe_result::prelude::*;

// Ensure logging only initializes once across all tests
static INIT: Once = Once::new();

pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// `{id: int, name: varchar}` with rows `(1, "a"), (2, "b")`.
pub fn id_name_table() -> QueryResultTable {
    setup_test_logging();
    QueryResultTable::builder()
        .column("id", EngineType::Int)
        .column("name", EngineType::Varchar)
        .build_from_rows(vec![
            vec![RawCell::Int(1), RawCell::from("a")],
            vec![RawCell::Int(2), RawCell::from("b")],
        ])
        .expect("sample table should build")
}

/// One column of every common engine type, with a NULL row at the end.
pub fn mixed_table() -> QueryResultTable {
    setup_test_logging();
    QueryResultTable::builder()
        .non_null_column("id", EngineType::BigInt)
        .column("flag", EngineType::Boolean)
        .column("price", EngineType::Decimal)
        .column("born", EngineType::Date)
        .column("seen", EngineType::Timestamp)
        .column("score", EngineType::Double)
        .build_from_rows(vec![
            vec![
                RawCell::BigInt(10),
                RawCell::Bool(true),
                RawCell::Decimal { unscaled: 1999, scale: 2 },
                RawCell::Int(10_957),
                RawCell::BigInt(86_400_000),
                RawCell::Double(0.5),
            ],
            vec![
                RawCell::BigInt(11),
                RawCell::Null,
                RawCell::Decimal { unscaled: i128::MIN, scale: 2 },
                RawCell::Int(i32::MIN),
                RawCell::BigInt(i64::MIN),
                RawCell::Double(f64::NAN),
            ],
        ])
        .expect("mixed table should build")
}
