//! In-process entity store

use std::collections::BTreeMap;
use std::sync::RwLock;

use log::debug;

use crate::codec::parse_table;
use crate::error::{Error, Result};
use crate::model::Row;

use super::EntityStore;

/// Entity store holding tables in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<String, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the stored tables, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.keys().cloned().collect())
    }
}

fn poisoned() -> Error {
    Error::remote("memory store lock poisoned")
}

impl EntityStore for MemoryStore {
    fn list_rows(&self, table: &str) -> Result<Vec<Row>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    fn upload_table(&self, table: &str, tsv: &str) -> Result<()> {
        let rows = parse_table(table, tsv)?;
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        if tables.contains_key(table) {
            return Err(Error::remote(format!("table '{}' already exists", table)));
        }
        debug!("storing {} rows in '{}'", rows.len(), table);
        tables.insert(table.to_string(), rows);
        Ok(())
    }

    fn delete_table(&self, table: &str) -> Result<()> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        tables.remove(table);
        Ok(())
    }
}
