//! Flat rows and output tables
//!
//! A [`FlatRow`] is the projection of one record onto a fixed, ordered column
//! list. Values not named by the column list are discarded at projection and
//! missing columns become `Null`, so every row of a table has the same shape.

use super::entity::EntityKind;
use serde_json::{Map, Value};

/// Working map produced by a row builder before projection
pub type RowMap = Map<String, Value>;

/// One output row with a fixed column set
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    columns: &'static [&'static str],
    values: Vec<Value>,
}

impl FlatRow {
    /// Project a working map onto the declared columns
    pub fn project(columns: &'static [&'static str], mut map: RowMap) -> Self {
        let values = columns
            .iter()
            .map(|column| map.remove(*column).unwrap_or(Value::Null))
            .collect();
        Self { columns, values }
    }

    /// Declared columns, in output order
    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Values aligned with [`FlatRow::columns`]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of a declared column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|idx| &self.values[idx])
    }
}

/// Ordered rows for one entity type
#[derive(Debug, Clone)]
pub struct Table {
    kind: EntityKind,
    columns: &'static [&'static str],
    rows: Vec<FlatRow>,
}

impl Table {
    pub fn new(kind: EntityKind, columns: &'static [&'static str]) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row built for this table's column list
    pub fn push(&mut self, row: FlatRow) {
        debug_assert_eq!(row.columns(), self.columns);
        self.rows.push(row);
    }

    /// Non-null value count per column
    pub fn non_null_counts(&self) -> Vec<(&'static str, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let count = self
                    .rows
                    .iter()
                    .filter(|row| !row.values[idx].is_null())
                    .count();
                (*column, count)
            })
            .collect()
    }

    /// Log the table's shape: row count, then non-null count per column
    pub fn log_info(&self) {
        tracing::info!(
            entity = %self.kind,
            rows = self.rows.len(),
            columns = self.columns.len(),
            "Table built"
        );
        for (column, non_null) in self.non_null_counts() {
            tracing::debug!(entity = %self.kind, column, non_null, "Column summary");
        }
    }
}
