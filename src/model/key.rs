//! Rows keyed by a designated column

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{Error, Result};

use super::schema::{ColumnSet, ShapeCheck};
use super::table::Row;

/// Rows of one table keyed by the value of a key column.
///
/// The key column is removed from every stored row; it lives only in the map
/// key. The column set is computed when the set is built and every row is
/// checked against it, so `columns()` never depends on sampling a member row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedRowSet {
    rows: IndexMap<String, Row>,
    columns: ColumnSet,
}

impl KeyedRowSet {
    /// Create an empty keyed set
    pub fn new() -> Self {
        Self::default()
    }

    /// Key a sequence of rows on `key_column`.
    ///
    /// The whole sequence is drained before returning. Fails on a repeated
    /// key value, on a row without the key column, or on rows whose remaining
    /// columns differ.
    pub fn from_rows<I>(rows: I, key_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        Self::build(None, rows, key_column)
    }

    /// Same as [`KeyedRowSet::from_rows`], naming `table` in any error.
    pub fn from_table_rows<I>(table: &str, rows: I, key_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        Self::build(Some(table), rows, key_column)
    }

    fn build<I>(table: Option<&str>, rows: I, key_column: &str) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut shape = ShapeCheck::new(table);
        let mut keyed: IndexMap<String, Row> = IndexMap::new();

        for (index, mut row) in rows.into_iter().enumerate() {
            let key = row
                .shift_remove(key_column)
                .ok_or_else(|| Error::MissingKeyColumn {
                    table: table.map(str::to_string),
                    key_column: key_column.to_string(),
                    row: index,
                })?;
            shape.check(index, &row)?;

            match keyed.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(Error::DuplicateKey {
                        table: table.map(str::to_string),
                        key_column: key_column.to_string(),
                        key: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(row);
                }
            }
        }

        Ok(Self {
            rows: keyed,
            columns: shape.finish(),
        })
    }

    /// Assemble from parts already known to be uniform over `columns`.
    pub(crate) fn from_parts(rows: IndexMap<String, Row>, columns: ColumnSet) -> Self {
        debug_assert!(rows
            .values()
            .all(|row| super::schema::has_columns(row, &columns)));
        Self { rows, columns }
    }

    /// The column set shared by every row (key column excluded)
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Look up the row for a key
    pub fn get(&self, key: &str) -> Option<&Row> {
        self.rows.get(key)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Iterate over `(key, row)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Row)> {
        self.rows.iter()
    }

    /// Number of keyed rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Put the key back into each row as `key_column`, first in column order.
    pub fn to_rows(&self, key_column: &str) -> Vec<Row> {
        self.rows
            .iter()
            .map(|(key, row)| {
                let mut out = Row::with_capacity(row.len() + 1);
                out.insert(key_column.to_string(), key.clone());
                out.extend(row.iter().map(|(k, v)| (k.clone(), v.clone())));
                out
            })
            .collect()
    }
}
