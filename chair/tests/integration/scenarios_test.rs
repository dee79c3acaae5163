use chair::{ErrorKind, MergeOptions, Predicate, RowId, Table, Value};
use chair_telemetry::tracing::init_test_tracing;

use crate::common::numbers_table;

fn war_and_peace() -> [(&'static str, Value); 3] {
    [
        ("id", Value::from(0)),
        ("title", Value::from("War and Peace")),
        ("author", Value::from("Leo Tolstoy")),
    ]
}

#[test]
fn find_by_primary_key_after_insert() {
    init_test_tracing();

    let mut table = Table::with_columns(["id", "title", "author"]);
    table.insert(war_and_peace()).unwrap();
    table.set_primary_key("title").unwrap();

    let row = table.find("War and Peace").unwrap();

    assert_eq!(
        *row,
        vec![
            Value::from(0),
            Value::from("War and Peace"),
            Value::from("Leo Tolstoy")
        ]
    );
}

#[test]
fn find_by_indexed_column_uses_the_index() {
    init_test_tracing();

    let mut table = Table::with_columns(["id", "title", "author"]);
    table.add_index("title").unwrap();
    table.insert(war_and_peace()).unwrap();

    let bucket = table
        .index("title")
        .unwrap()
        .bucket(&Value::from("War and Peace"))
        .unwrap();
    assert!(bucket.contains(&RowId(0)));

    let predicate = Predicate::new().and("title", "War and Peace");
    assert!(!table.plan(&predicate).is_full_scan());

    let row = table.find_by(&predicate).unwrap();
    assert_eq!(row.row_id(), RowId(0));
}

#[test]
fn merge_without_create_row_reports_missing_row() {
    init_test_tracing();

    let mut table = numbers_table();
    table.insert([("num", 123)]).unwrap();

    let err = table
        .merge("string", [(456, "456")], MergeOptions::new())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingRow);
    assert_eq!(err.value(), Some(&Value::from(456)));
}

#[test]
fn merge_without_overwrite_reports_conflict() {
    init_test_tracing();

    let mut table = numbers_table();
    table
        .insert([("num", Value::from(123)), ("string", Value::from("123"))])
        .unwrap();
    table.insert([("num", 456)]).unwrap();

    let err = table
        .merge(
            "string",
            [(123, "123"), (456, "456")],
            MergeOptions::new().overwrite(false),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValueConflict);
    assert_eq!(err.value(), Some(&Value::from(123)));
    assert_eq!(err.column(), Some("string"));
}

#[test]
fn primary_key_over_duplicates_fails() {
    init_test_tracing();

    let mut table = Table::with_columns(["title"]);
    table.insert([("title", "Looking for Alaska")]).unwrap();
    table.insert([("title", "Looking for Alaska")]).unwrap();

    let err = table.set_primary_key("title").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicatePrimaryKeyValue);
    assert_eq!(err.value(), Some(&Value::from("Looking for Alaska")));
    assert!(!table.has_primary_key());
}
