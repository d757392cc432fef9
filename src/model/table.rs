//! Row and column-oriented table representations

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::schema::ShapeCheck;

/// A row: column name to cell value.
///
/// Insertion order is kept for display, but equality ignores it.
pub type Row = IndexMap<String, String>;

/// Column-oriented table: `{column: [values in row order]}`.
///
/// Construction from a plain map does not check column lengths; `to_rows`
/// does. Rows without any column are counted separately so they survive a
/// pivot; that count is not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTable {
    columns: IndexMap<String, Vec<String>>,
    #[serde(skip)]
    bare_rows: usize,
}

impl ColumnTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.columns.insert(name.into(), values);
    }

    /// Pivot uniform rows into columns.
    pub fn from_rows(rows: &[Row]) -> Result<Self> {
        let mut shape = ShapeCheck::new(None);
        let mut columns: IndexMap<String, Vec<String>> = IndexMap::new();

        for (index, row) in rows.iter().enumerate() {
            shape.check(index, row)?;
            for (name, value) in row {
                columns
                    .entry(name.clone())
                    .or_insert_with(|| Vec::with_capacity(rows.len()))
                    .push(value.clone());
            }
        }

        let bare_rows = if columns.is_empty() { rows.len() } else { 0 };
        Ok(Self { columns, bare_rows })
    }

    /// Pivot columns back into rows.
    pub fn to_rows(&self) -> Result<Vec<Row>> {
        let count = self.row_count()?;
        let rows = (0..count)
            .map(|i| {
                self.columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values[i].clone()))
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    /// Number of rows, taken from the first column. Fails if any column
    /// length differs.
    pub fn row_count(&self) -> Result<usize> {
        let mut iter = self.columns.iter();
        let Some((_, first)) = iter.next() else {
            return Ok(self.bare_rows);
        };
        let expected = first.len();
        for (name, values) in iter {
            if values.len() != expected {
                return Err(Error::UnequalColumnLengths {
                    column: name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(expected)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        if self.columns.is_empty() {
            return self.bare_rows == 0;
        }
        self.columns.values().all(Vec::is_empty)
    }

    /// Iterate over `(name, values)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.columns.iter()
    }
}

impl From<IndexMap<String, Vec<String>>> for ColumnTable {
    fn from(columns: IndexMap<String, Vec<String>>) -> Self {
        Self {
            columns,
            bare_rows: 0,
        }
    }
}

impl FromIterator<(String, Vec<String>)> for ColumnTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
            bare_rows: 0,
        }
    }
}
