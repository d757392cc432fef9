//! Column sets and row shape checks

use std::collections::BTreeSet;

use crate::error::{Error, Result};

use super::table::Row;

/// The set of column names carried by the rows of one table.
pub type ColumnSet = BTreeSet<String>;

/// Column names of a single row.
pub fn column_set(row: &Row) -> ColumnSet {
    row.keys().cloned().collect()
}

/// Check whether a row has exactly the given columns.
pub fn has_columns(row: &Row, columns: &ColumnSet) -> bool {
    row.len() == columns.len() && row.keys().all(|name| columns.contains(name))
}

/// Tracks the column set of a table as its rows stream past, rejecting any
/// row whose shape differs from the first one.
#[derive(Debug, Default)]
pub(crate) struct ShapeCheck {
    table: Option<String>,
    columns: Option<ColumnSet>,
}

impl ShapeCheck {
    pub(crate) fn new(table: Option<&str>) -> Self {
        Self {
            table: table.map(str::to_string),
            columns: None,
        }
    }

    /// Record the shape of row number `index`.
    pub(crate) fn check(&mut self, index: usize, row: &Row) -> Result<()> {
        match &self.columns {
            None => {
                self.columns = Some(column_set(row));
                Ok(())
            }
            Some(expected) if has_columns(row, expected) => Ok(()),
            Some(expected) => Err(Error::HeterogeneousRows {
                table: self.table.clone(),
                row: index,
                expected: describe(expected.iter()),
                found: describe(column_set(row).iter()),
            }),
        }
    }

    /// The column set seen so far; empty if no rows were checked.
    pub(crate) fn finish(self) -> ColumnSet {
        self.columns.unwrap_or_default()
    }
}

/// Render column names for error messages.
fn describe<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(", ")
}
