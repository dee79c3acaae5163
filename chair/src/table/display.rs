use std::fmt;

use crate::row::Row;
use crate::table::Table;
use crate::types::Value;

/// Renders a table as `#<Table primary_key: .., indices: [..], columns: [..]>`.
///
/// Parts with nothing to show are omitted.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(primary_key) = self.primary_key() {
            parts.push(format!("primary_key: {primary_key}"));
        }
        let indices = self.indices();
        if !indices.is_empty() {
            parts.push(format!("indices: [{}]", indices.join(", ")));
        }
        let columns = self.columns();
        if !columns.is_empty() {
            parts.push(format!("columns: [{}]", columns.join(", ")));
        }

        if parts.is_empty() {
            return f.write_str("#<Table>");
        }

        write!(f, "#<Table {}>", parts.join(", "))
    }
}

/// [`fmt::Display`] adapter returned by [`Table::display_row`].
pub struct RowDisplay<'a> {
    table: &'a Table,
    row: &'a Row,
}

impl Table {
    /// Renders `row` as `#<Row column: value, ..>` with every column of this table.
    ///
    /// Absent values render as `null`. A row of another table is rendered by column position.
    pub fn display_row<'a>(&'a self, row: &'a Row) -> RowDisplay<'a> {
        RowDisplay { table: self, row }
    }
}

impl fmt::Display for RowDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<Row")?;

        if self.row.table_id() != self.table.id {
            for (position, (column, value)) in self.row.attributes().enumerate() {
                let separator = if position == 0 { " " } else { ", " };
                write!(f, "{separator}{column}: {value}")?;
            }

            return f.write_str(">");
        }

        for (position, column_schema) in self.table.schema.column_schemas().iter().enumerate() {
            let separator = if position == 0 { " " } else { ", " };
            let value = self.row.get(column_schema.id).unwrap_or(&Value::Null);
            write!(f, "{separator}{}: {value}", column_schema.name)?;
        }

        f.write_str(">")
    }
}
