//! Full outer join of keyed row sets

use indexmap::IndexMap;
use log::debug;

use crate::config::{Config, BLANK_CELL_VALUE};
use crate::error::{Error, Result};
use crate::model::{ColumnSet, KeyedRowSet, Row};

/// Joins keyed row sets on their keys, filling cells missing from one side
/// with a blank sentinel.
#[derive(Debug, Clone)]
pub struct JoinEngine {
    blank: String,
}

impl Default for JoinEngine {
    fn default() -> Self {
        Self::new(BLANK_CELL_VALUE)
    }
}

impl JoinEngine {
    /// Create an engine that fills absent cells with `blank`
    pub fn new(blank: impl Into<String>) -> Self {
        Self {
            blank: blank.into(),
        }
    }

    /// Create an engine from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.blank_cell_value.clone())
    }

    /// Full outer join of two keyed sets with disjoint columns.
    ///
    /// Keys of `a` come first in their order, then keys only in `b`. A key
    /// missing from one side gets that side's columns set to the blank
    /// sentinel. Neither input is modified.
    pub fn join_pair(&self, a: &KeyedRowSet, b: &KeyedRowSet) -> Result<KeyedRowSet> {
        let shared: Vec<String> = a.columns().intersection(b.columns()).cloned().collect();
        if !shared.is_empty() {
            return Err(Error::ColumnConflict { columns: shared });
        }

        let blank_a = self.blank_row(a.columns());
        let blank_b = self.blank_row(b.columns());

        let mut rows: IndexMap<String, Row> = IndexMap::with_capacity(a.len() + b.len());
        let keys = a.keys().chain(b.keys().filter(|key| !a.contains_key(key)));
        for key in keys {
            let left = a.get(key).unwrap_or(&blank_a);
            let right = b.get(key).unwrap_or(&blank_b);

            let mut row = Row::with_capacity(left.len() + right.len());
            row.extend(left.iter().map(|(k, v)| (k.clone(), v.clone())));
            row.extend(right.iter().map(|(k, v)| (k.clone(), v.clone())));
            rows.insert(key.to_string(), row);
        }

        let columns: ColumnSet = a.columns().union(b.columns()).cloned().collect();
        debug!(
            "joined {} + {} keys into {} rows over {} columns",
            a.len(),
            b.len(),
            rows.len(),
            columns.len()
        );

        Ok(KeyedRowSet::from_parts(rows, columns))
    }

    /// Fold `join_pair` left to right over `tables`.
    ///
    /// The result holds every key of every input. The first conflict aborts
    /// the whole chain.
    pub fn join_chain<I>(&self, tables: I) -> Result<KeyedRowSet>
    where
        I: IntoIterator<Item = KeyedRowSet>,
    {
        let mut tables = tables.into_iter();
        let first = tables.next().ok_or(Error::EmptyJoin)?;
        tables.try_fold(first, |acc, next| self.join_pair(&acc, &next))
    }

    fn blank_row(&self, columns: &ColumnSet) -> Row {
        columns
            .iter()
            .map(|column| (column.clone(), self.blank.clone()))
            .collect()
    }
}
