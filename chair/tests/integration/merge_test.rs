use chair::{ErrorKind, ErrorTier, MergeOptions, Table, Value};
use chair_telemetry::tracing::init_test_tracing;

use crate::common::numbers_table;

fn string_of(table: &Table, num: i64) -> Option<Value> {
    table
        .find(num)
        .and_then(|row| row.value(table.schema(), "string"))
        .cloned()
}

#[test]
fn merge_requires_a_primary_key() {
    init_test_tracing();

    let mut table = Table::with_columns(["num", "string"]);
    table.insert([("num", 1)]).unwrap();

    let err = table
        .merge("string", [(1, "1")], MergeOptions::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoPrimaryKey);
}

#[test]
fn merge_fills_existing_rows() {
    init_test_tracing();

    let mut table = numbers_table();
    table.insert([("num", 1)]).unwrap();
    table.insert([("num", 2)]).unwrap();

    table
        .merge("string", [(1, "one"), (2, "two")], MergeOptions::new())
        .unwrap();

    assert_eq!(string_of(&table, 1), Some(Value::from("one")));
    assert_eq!(string_of(&table, 2), Some(Value::from("two")));
    assert_eq!(table.size(), 2);
}

#[test]
fn merge_with_create_row_inserts_missing_keys() {
    init_test_tracing();

    let mut table = numbers_table();
    table.insert([("num", 123)]).unwrap();

    table
        .merge(
            "string",
            [(123, "123"), (456, "456")],
            MergeOptions::new().create_row(true),
        )
        .unwrap();

    assert_eq!(table.size(), 2);
    assert_eq!(string_of(&table, 456), Some(Value::from("456")));
}

#[test]
fn merge_with_overwrite_replaces_values() {
    init_test_tracing();

    let mut table = numbers_table();
    table.add_index("string").unwrap();
    table
        .insert([("num", Value::from(123)), ("string", Value::from("old"))])
        .unwrap();

    table
        .merge(
            "string",
            [(123, "new")],
            MergeOptions {
                overwrite: true,
                create_row: false,
            },
        )
        .unwrap();

    assert_eq!(string_of(&table, 123), Some(Value::from("new")));
    assert!(table.where_column_is("string", "old").is_empty());
}

#[test]
fn merge_failure_keeps_pairs_applied_before_it() {
    init_test_tracing();

    let mut table = numbers_table();
    table.insert([("num", 1)]).unwrap();
    table.insert([("num", 3)]).unwrap();

    let err = table
        .merge(
            "string",
            vec![(1, "one"), (2, "two"), (3, "three")],
            MergeOptions::new(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingRow);
    assert_eq!(err.kind().tier(), ErrorTier::DataIntegrity);
    assert_eq!(err.value(), Some(&Value::from(2)));
    assert_eq!(string_of(&table, 1), Some(Value::from("one")));
    assert_eq!(string_of(&table, 3), None);
}

#[test]
fn merge_into_primary_key_column_rekeys() {
    init_test_tracing();

    let mut table = numbers_table();
    table.insert([("num", 1)]).unwrap();

    table
        .merge("num", [(1, 10)], MergeOptions::new().overwrite(true))
        .unwrap();

    assert!(table.find(1).is_none());
    assert!(table.find(10).is_some());
}
