//! Table operations against an entity store
//!
//! [`Workspace`] pairs an [`EntityStore`] with a [`Config`] and exposes the
//! user-facing operations: upload rows or columns, read a table back in any
//! shape, build a CRAM/CRAI table from a listing, and join tables on a key.

use log::info;
use rayon::prelude::*;

use crate::codec::{serialize_columns, serialize_rows};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::join::JoinEngine;
use crate::listing::{ListingBuilder, ListingReport};
use crate::model::{ColumnTable, KeyedRowSet, Row};
use crate::store::{EntityStore, ObjectLister};

/// Entity store plus the configuration used to shape and join its tables.
pub struct Workspace<S> {
    store: S,
    config: Config,
    engine: JoinEngine,
}

impl<S: EntityStore> Workspace<S> {
    pub fn new(store: S, config: Config) -> Self {
        let engine = JoinEngine::from_config(&config);
        Self {
            store,
            config,
            engine,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Upload uniform rows as a new table.
    pub fn upload_rows(&self, table: &str, rows: &[Row]) -> Result<()> {
        let tsv = serialize_rows(table, rows)?;
        self.store.upload_table(table, &tsv)
    }

    /// Upload column-oriented data as a new table.
    pub fn upload_columns(&self, table: &str, columns: &ColumnTable) -> Result<()> {
        let tsv = serialize_columns(table, columns)?;
        self.store.upload_table(table, &tsv)
    }

    /// Attribute rows of a table.
    pub fn list_rows(&self, table: &str) -> Result<Vec<Row>> {
        self.store.list_rows(table)
    }

    /// A table pivoted into columns.
    pub fn get_columns(&self, table: &str) -> Result<ColumnTable> {
        ColumnTable::from_rows(&self.store.list_rows(table)?)
    }

    /// A table keyed on `key_column`.
    pub fn get_keyed_rows(&self, table: &str, key_column: &str) -> Result<KeyedRowSet> {
        let rows = self.store.list_rows(table)?;
        KeyedRowSet::from_table_rows(table, rows, key_column)
    }

    pub fn delete_table(&self, table: &str) -> Result<()> {
        self.store.delete_table(table)
    }

    /// Build a CRAM/CRAI table from the objects under `prefix` and upload
    /// it as `table`.
    pub fn create_cram_crai_table<L>(
        &self,
        table: &str,
        lister: &L,
        prefix: &str,
    ) -> Result<ListingReport>
    where
        L: ObjectLister + ?Sized,
    {
        let keys = lister.list_keys(prefix)?;
        self.create_cram_crai_table_from_keys(table, keys)
    }

    /// Build a CRAM/CRAI table from already listed keys and upload it as
    /// `table`. Nothing is uploaded if no sample has both files.
    pub fn create_cram_crai_table_from_keys<I, K>(
        &self,
        table: &str,
        keys: I,
    ) -> Result<ListingReport>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let built = ListingBuilder::new(&self.config).build(keys)?;
        self.upload_columns(table, &built.table)?;
        Ok(built.report)
    }

    /// Read every table keyed on `key_column` and outer-join them in order.
    ///
    /// All tables are fully read before the first join.
    pub fn join_chain<T>(&self, tables: &[T], key_column: &str) -> Result<KeyedRowSet>
    where
        T: AsRef<str> + Sync,
    {
        if tables.is_empty() {
            return Err(Error::EmptyJoin);
        }
        let keyed = self.read_keyed(tables, key_column)?;
        self.engine.join_chain(keyed)
    }

    /// Join `tables` on `join_column` and upload the result as `new_table`.
    pub fn join_data_tables<T>(
        &self,
        new_table: &str,
        tables: &[T],
        join_column: &str,
    ) -> Result<KeyedRowSet>
    where
        T: AsRef<str> + Sync,
    {
        let joined = self.join_chain(tables, join_column)?;
        self.upload_rows(new_table, &joined.to_rows(join_column))?;
        info!(
            "joined {} tables into '{}' ({} rows)",
            tables.len(),
            new_table,
            joined.len()
        );
        Ok(joined)
    }

    fn read_keyed<T>(&self, tables: &[T], key_column: &str) -> Result<Vec<KeyedRowSet>>
    where
        T: AsRef<str> + Sync,
    {
        let results: Vec<Result<KeyedRowSet>> = if self.config.parallel_reads {
            tables
                .par_iter()
                .map(|table| self.get_keyed_rows(table.as_ref(), key_column))
                .collect()
        } else {
            tables
                .iter()
                .map(|table| self.get_keyed_rows(table.as_ref(), key_column))
                .collect()
        };
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StaticListing};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn columns(pairs: &[(&str, &[&str])]) -> ColumnTable {
        pairs
            .iter()
            .map(|(name, values)| (name.to_string(), strings(values)))
            .collect()
    }

    #[test]
    fn test_upload_and_read_back() {
        let ws = Workspace::new(MemoryStore::new(), Config::default());
        let table = columns(&[("sample", &["s1", "s2"]), ("name", &["Bob", "Sue"])]);
        ws.upload_columns("people", &table).unwrap();

        assert_eq!(ws.get_columns("people").unwrap().to_rows().unwrap(), table.to_rows().unwrap());
        let keyed = ws.get_keyed_rows("people", "sample").unwrap();
        assert_eq!(keyed.get("s2").unwrap()["name"], "Sue");
    }

    #[test]
    fn test_empty_upload_fails_fast() {
        let ws = Workspace::new(MemoryStore::new(), Config::default());
        let err = ws
            .create_cram_crai_table_from_keys("crams", ["p/A.cram"])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyTable { .. }));
        assert!(ws.store().table_names().unwrap().is_empty());
    }

    #[test]
    fn test_cram_crai_from_lister() {
        let ws = Workspace::new(MemoryStore::new(), Config::default());
        let lister = StaticListing::new(["gs://b/x/A.cram", "gs://b/x/A.crai", "gs://b/y/B.cram"]);

        let report = ws.create_cram_crai_table("crams", &lister, "gs://b/x/").unwrap();
        assert_eq!(report.samples, 1);

        let keyed = ws.get_keyed_rows("crams", "sample").unwrap();
        assert_eq!(keyed.get("A").unwrap()["crai"], "gs://b/x/A.crai");
    }

    #[test]
    fn test_join_chain_reads_sequentially_or_in_parallel() {
        for parallel in [true, false] {
            let config = Config::default()
                .with_parallel_reads(parallel)
                .with_blank_cell_value("NA");
            let ws = Workspace::new(MemoryStore::new(), config);
            ws.upload_columns("a", &columns(&[("sample", &["s1"]), ("x", &["1"])]))
                .unwrap();
            ws.upload_columns("b", &columns(&[("sample", &["s2"]), ("y", &["2"])]))
                .unwrap();

            let joined = ws.join_chain(&["a", "b"], "sample").unwrap();
            assert_eq!(joined.keys().collect::<Vec<_>>(), vec!["s1", "s2"]);
            assert_eq!(joined.get("s2").unwrap()["x"], "NA");
        }
    }

    #[test]
    fn test_join_reports_first_failing_table() {
        let ws = Workspace::new(MemoryStore::new(), Config::default());
        ws.upload_columns("a", &columns(&[("name", &["x"])])).unwrap();
        ws.upload_columns("b", &columns(&[("other", &["y"])])).unwrap();

        let err = ws.join_chain(&["a", "b"], "sample").unwrap_err();
        assert!(matches!(err, Error::MissingKeyColumn { table: Some(t), .. } if t == "a"));
    }

    #[test]
    fn test_empty_join_list() {
        let ws = Workspace::new(MemoryStore::new(), Config::default());
        let none: [&str; 0] = [];
        assert!(matches!(ws.join_chain(&none, "sample"), Err(Error::EmptyJoin)));
    }
}
