use std::collections::BTreeSet;

use chair::{Row, RowId, Table, Value};

/// Books by a handful of authors, with no primary key and no index.
///
/// Row ids follow the order below.
pub fn books_table() -> Table {
    let mut table = Table::with_columns(["id", "title", "author"]).named("books");

    let books = [
        ("War and Peace", "Leo Tolstoy"),
        ("Anna Karenina", "Leo Tolstoy"),
        ("Looking for Alaska", "John Green"),
        ("The Fault in Our Stars", "John Green"),
        ("Lost at Sea", "Bryan Lee O'Malley"),
    ];
    for (id, (title, author)) in books.into_iter().enumerate() {
        table
            .insert([
                ("id", Value::from(id as i64)),
                ("title", Value::from(title)),
                ("author", Value::from(author)),
            ])
            .unwrap();
    }

    table
}

/// Empty table keyed by `num`, with a free `string` column.
pub fn numbers_table() -> Table {
    let mut table = Table::with_columns(["num", "string"]).named("numbers");
    table.set_primary_key("num").unwrap();

    table
}

/// Asserts that two query results hold the same rows, ignoring order.
pub fn assert_same_rows(left: Vec<&Row>, right: Vec<&Row>) {
    let left: BTreeSet<RowId> = left.into_iter().map(Row::row_id).collect();
    let right: BTreeSet<RowId> = right.into_iter().map(Row::row_id).collect();

    assert_eq!(left, right);
}
