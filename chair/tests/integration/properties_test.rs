use std::cmp::Ordering;

use chair::{ErrorKind, Predicate, Record, Row, RowId, Table, Value};
use chair_telemetry::tracing::init_test_tracing;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::common::{assert_same_rows, books_table};

const COLUMNS: [&str; 3] = ["color", "size", "shape"];

/// Values drawn for every generated cell. `None` leaves the cell absent.
fn value_pool() -> Vec<Option<Value>> {
    vec![
        None,
        Some(Value::Null),
        Some(Value::from("")),
        Some(Value::from("red")),
        Some(Value::from("blue")),
        Some(Value::from(1)),
        Some(Value::from(2)),
    ]
}

/// Builds a table of `rows` random rows, indexing the columns in `indexed`.
///
/// Half of the indices are added before inserting and half after, so both the incremental and
/// the bulk build paths are exercised.
fn random_table(rng: &mut StdRng, rows: usize, indexed: &[&str]) -> Table {
    let pool = value_pool();
    let mut table = Table::with_columns(COLUMNS);

    let (early, late) = indexed.split_at(indexed.len() / 2);
    for column in early {
        table.add_index(column).unwrap();
    }

    for _ in 0..rows {
        let pairs: Vec<(String, Value)> = COLUMNS
            .iter()
            .filter_map(|column| {
                pool.choose(&mut *rng)
                    .cloned()
                    .flatten()
                    .map(|value| (column.to_string(), value))
            })
            .collect();
        if pairs.is_empty() {
            continue;
        }
        table.insert(Record::from_pairs(pairs)).unwrap();
    }

    for column in late {
        table.add_index(column).unwrap();
    }

    table
}

#[test]
fn index_and_scan_agree_for_every_value() {
    init_test_tracing();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let table = random_table(&mut rng, 50, &["color", "size"]);

        for column in COLUMNS {
            for value in value_pool().into_iter().flatten() {
                let predicate = Predicate::new().and(column, value);

                assert_same_rows(table.filter(&predicate), table.table_scan(&predicate));
            }
        }
    }
}

#[test]
fn index_and_scan_agree_for_conjunctions() {
    init_test_tracing();

    let mut rng = StdRng::seed_from_u64(11);
    let pool: Vec<Value> = value_pool().into_iter().flatten().collect();
    for _ in 0..20 {
        let table = random_table(&mut rng, 50, &["color", "size", "shape"]);

        for _ in 0..20 {
            let mut predicate = Predicate::new();
            for column in COLUMNS {
                if rng.gen_bool(0.7) {
                    let value = pool[rng.gen_range(0..pool.len())].clone();
                    predicate = predicate.and(column, value);
                }
            }

            assert_same_rows(table.filter(&predicate), table.table_scan(&predicate));
        }
    }
}

#[test]
fn index_and_scan_agree_after_updates() {
    init_test_tracing();

    let mut rng = StdRng::seed_from_u64(13);
    let pool: Vec<Value> = value_pool().into_iter().flatten().collect();
    let mut table = random_table(&mut rng, 50, &["color", "shape"]);

    for _ in 0..100 {
        let row_id = RowId(rng.gen_range(0..table.size()));
        let column = COLUMNS[rng.gen_range(0..COLUMNS.len())];
        let value = pool[rng.gen_range(0..pool.len())].clone();
        table.set_cell(row_id, column, value).unwrap();
    }

    for column in COLUMNS {
        for value in &pool {
            let predicate = Predicate::new().and(column, value.clone());

            assert_same_rows(table.filter(&predicate), table.table_scan(&predicate));
        }
    }
}

#[test]
fn indexed_restrictions_commute() {
    init_test_tracing();

    let mut rng = StdRng::seed_from_u64(17);
    let table = random_table(&mut rng, 80, &["color", "size", "shape"]);

    for color in ["red", "blue"] {
        for size in [1, 2] {
            for shape in ["red", "blue", ""] {
                let mut constraints = vec![
                    ("color", Value::from(color)),
                    ("size", Value::from(size)),
                    ("shape", Value::from(shape)),
                ];
                let expected: Vec<RowId> = table
                    .filter(Predicate::from_iter(constraints.clone()))
                    .into_iter()
                    .map(Row::row_id)
                    .collect();

                for _ in 0..6 {
                    constraints.shuffle(&mut rng);
                    let actual: Vec<RowId> = table
                        .filter(Predicate::from_iter(constraints.clone()))
                        .into_iter()
                        .map(Row::row_id)
                        .collect();

                    assert_eq!(actual, expected);
                }
            }
        }
    }
}

#[test]
fn primary_key_values_stay_unique() {
    init_test_tracing();

    let mut table = books_table();
    table.set_primary_key("title").unwrap();

    let err = table
        .insert([("id", Value::from(9)), ("title", Value::from("Lost at Sea"))])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicatePrimaryKeyValue);

    let err = table.set_cell(RowId(0), "title", "Lost at Sea").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicatePrimaryKeyValue);

    let mut titles: Vec<&Value> = table
        .all()
        .iter()
        .filter_map(|row| row.value(table.schema(), "title"))
        .collect();
    let count = titles.len();
    titles.sort_by_key(|value| value.to_string());
    titles.dedup();
    assert_eq!(titles.len(), count);
    assert_eq!(table.primary_key_index().unwrap().len(), table.size());
}

#[test]
fn row_ids_increase_and_never_change() {
    init_test_tracing();

    let mut table = books_table();
    let before: Vec<RowId> = table.all().iter().map(Row::row_id).collect();

    table.add_index("author").unwrap();
    table.set_cell(RowId(1), "author", "Lev Tolstoy").unwrap();
    table.set_primary_key("id").unwrap();
    table.remove_index("author").unwrap();
    let row_id = table
        .insert([("id", Value::from(5)), ("title", Value::from("Seconds"))])
        .unwrap()
        .unwrap()
        .row_id();

    let after: Vec<RowId> = table.all().iter().map(Row::row_id).collect();
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(row_id, RowId(before.len()));
    assert!(after.windows(2).all(|pair| pair[0] < pair[1]));

    for pair in table.all().windows(2) {
        assert_eq!(pair[0].cmp_position(&pair[1]), Some(Ordering::Less));
    }
}

#[test]
fn rows_from_different_tables_are_incomparable() {
    let left = books_table();
    let right = books_table();

    let ordering = left.first().unwrap().cmp_position(right.first().unwrap());

    assert_eq!(ordering, None);
    assert_eq!(left.first().unwrap(), right.first().unwrap());
}

#[test]
fn cloned_tables_own_distinct_rows() {
    let mut left = books_table();
    left.add_index("title").unwrap();
    let mut right = left.clone();
    right.set_cell(RowId(0), "title", "Seconds").unwrap();

    let last = right.all().last().unwrap();
    assert_eq!(left.first().unwrap().cmp_position(last), None);
    assert_eq!(
        right.first().unwrap().cmp_position(last),
        Some(Ordering::Less)
    );

    assert_eq!(
        left.find_by_column("title", "War and Peace").unwrap().row_id(),
        RowId(0)
    );
    assert!(left.find_by_column("title", "Seconds").is_none());
    assert_eq!(right.find_by_column("title", "Seconds").unwrap().row_id(), RowId(0));
}

#[test]
fn inserted_records_round_trip() {
    init_test_tracing();

    let mut table = Table::with_columns(["id", "title", "author", "isbn"]);
    table.set_primary_key("id").unwrap();
    let record = vec![
        ("id".to_string(), Value::from(42)),
        ("title".to_string(), Value::from("Seconds")),
        ("author".to_string(), Value::from("Bryan Lee O'Malley")),
    ];
    table.insert(record.clone()).unwrap();

    let row = table.find(42).unwrap();
    assert_eq!(row.to_record(table.schema()), record);
    assert_eq!(
        row.to_values(table.schema()),
        vec![
            Value::from(42),
            Value::from("Seconds"),
            Value::from("Bryan Lee O'Malley"),
            Value::Null
        ]
    );

    let found = table.find_by(Predicate::from_iter(record.clone())).unwrap();
    assert_eq!(found.row_id(), row.row_id());
}

#[test]
fn positional_records_round_trip() {
    let mut table = Table::with_columns(["id", "title"]);
    let values = vec![Value::from(1), Value::from("Seconds")];

    table.insert(values.clone()).unwrap();

    assert_eq!(*table.first().unwrap(), values);
    assert_eq!(table.first().unwrap().to_values(table.schema()), values);
}
