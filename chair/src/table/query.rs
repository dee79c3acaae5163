use std::collections::BTreeSet;

use tracing::debug;

use crate::row::Row;
use crate::table::Table;
use crate::types::{ColumnId, Predicate, RowId, Value};

/// How [`Table::filter`] answers a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    /// The predicate constrains the primary key: at most one row, found through the key map.
    PrimaryKeyLookup { column: ColumnId, value: Value },
    /// Candidates are the intersection of the `indexed` buckets (every row when there is none),
    /// then filtered on the `scanned` constraints.
    Restrict {
        indexed: Vec<(ColumnId, Value)>,
        scanned: Vec<(String, Value)>,
    },
}

impl QueryPlan {
    /// Returns `true` if the plan reads every row of the table.
    pub fn is_full_scan(&self) -> bool {
        matches!(self, QueryPlan::Restrict { indexed, .. } if indexed.is_empty())
    }
}

impl Table {
    /// Returns the plan [`Table::filter`] uses for `predicate`.
    ///
    /// A constraint on the primary key wins over everything else. Otherwise constraints on
    /// indexed columns are answered from their buckets, except null ones which indices never
    /// hold.
    pub fn plan(&self, predicate: &Predicate) -> QueryPlan {
        if let Some(primary_key) = &self.primary_key {
            let column = primary_key.column();
            let value = self
                .schema
                .column_name(column)
                .and_then(|name| predicate.get(name));
            if let Some(value) = value {
                return QueryPlan::PrimaryKeyLookup {
                    column,
                    value: value.clone(),
                };
            }
        }

        let mut indexed = Vec::new();
        let mut scanned = Vec::new();
        for (name, value) in predicate.constraints() {
            match self.schema.column_id(name) {
                Some(column) if !value.is_null() && self.indices.contains_key(&column) => {
                    indexed.push((column, value.clone()));
                }
                _ => scanned.push((name.clone(), value.clone())),
            }
        }

        QueryPlan::Restrict { indexed, scanned }
    }

    /// Returns the plan [`Table::table_scan`] uses: every constraint is scanned.
    pub fn table_scan_plan(&self, predicate: &Predicate) -> QueryPlan {
        QueryPlan::Restrict {
            indexed: Vec::new(),
            scanned: predicate.constraints().to_vec(),
        }
    }

    /// Returns the rows matching every constraint of `predicate`, ordered by [`RowId`].
    ///
    /// Uses the primary key and secondary indices where possible. When the predicate constrains
    /// the primary key, the row holding that key is returned and the other constraints are not
    /// checked. An empty predicate matches every row. The result is a snapshot borrowed from the
    /// table.
    pub fn filter(&self, predicate: impl Into<Predicate>) -> Vec<&Row> {
        let predicate = predicate.into();
        let plan = self.plan(&predicate);

        debug!(
            table = self.log_name(),
            constraints = predicate.constraints().len(),
            ?plan,
            "planned query"
        );

        self.execute(plan)
    }

    /// Returns the first row matching `predicate`.
    pub fn find_by(&self, predicate: impl Into<Predicate>) -> Option<&Row> {
        self.filter(predicate).into_iter().next()
    }

    /// Returns the rows matching `predicate` without consulting any index.
    ///
    /// Agrees with [`Table::filter`] for every predicate that does not constrain the primary key.
    pub fn table_scan(&self, predicate: impl Into<Predicate>) -> Vec<&Row> {
        let predicate = predicate.into();

        self.execute(self.table_scan_plan(&predicate))
    }

    /// Returns the row whose primary key is `value`.
    ///
    /// Returns [`None`] when no primary key is set or no row holds the value.
    pub fn find(&self, value: impl Into<Value>) -> Option<&Row> {
        let value = value.into();

        self.primary_key
            .as_ref()
            .and_then(|primary_key| primary_key.get(&value))
            .and_then(|row_id| self.row(row_id))
    }

    /// Shorthand for [`Table::find_by`] with a single constraint.
    pub fn find_by_column(&self, column: &str, value: impl Into<Value>) -> Option<&Row> {
        self.find_by(Predicate::new().and(column, value))
    }

    /// Shorthand for [`Table::filter`] with a single constraint.
    pub fn where_column_is(&self, column: &str, value: impl Into<Value>) -> Vec<&Row> {
        self.filter(Predicate::new().and(column, value))
    }

    fn execute(&self, plan: QueryPlan) -> Vec<&Row> {
        match plan {
            QueryPlan::PrimaryKeyLookup { value, .. } => self.find(value).into_iter().collect(),
            QueryPlan::Restrict { indexed, scanned } => {
                let scanned: Vec<(Option<ColumnId>, Value)> = scanned
                    .into_iter()
                    .map(|(name, value)| (self.schema.column_id(&name), value))
                    .collect();

                let matches = |row: &&Row| {
                    scanned
                        .iter()
                        .all(|(column, value)| cell_matches(row, *column, value))
                };

                if indexed.is_empty() {
                    return self.rows.iter().filter(matches).collect();
                }

                self.candidates(&indexed)
                    .into_iter()
                    .filter_map(|row_id| self.row(row_id))
                    .filter(matches)
                    .collect()
            }
        }
    }

    /// Intersects the buckets of the indexed constraints.
    ///
    /// The result is independent of the order the constraints are applied in.
    fn candidates(&self, indexed: &[(ColumnId, Value)]) -> BTreeSet<RowId> {
        let mut candidates: Option<BTreeSet<RowId>> = None;

        for (column, value) in indexed {
            let Some(bucket) = self
                .indices
                .get(column)
                .and_then(|index| index.bucket(value))
            else {
                return BTreeSet::new();
            };

            let narrowed = match candidates {
                None => bucket.clone(),
                Some(current) => current.intersection(bucket).copied().collect(),
            };
            if narrowed.is_empty() {
                return narrowed;
            }
            candidates = Some(narrowed);
        }

        candidates.unwrap_or_default()
    }
}

/// Absent cells read as null.
fn cell_matches(row: &Row, column: Option<ColumnId>, value: &Value) -> bool {
    match column.and_then(|column| row.get(column)) {
        Some(cell) => cell == value,
        None => value.is_null(),
    }
}
