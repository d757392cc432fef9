//! Directory-backed entity store

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, info};

use crate::codec::parse_table;
use crate::error::{Error, Result};
use crate::model::Row;

use super::EntityStore;

const TABLE_EXTENSION: &str = "tsv";

/// Entity store keeping each table as `<root>/<table>.tsv` in the upload
/// format.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Names of the stored tables, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TABLE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn table_path(&self, table: &str) -> Result<PathBuf> {
        let valid = !table.is_empty()
            && !table.starts_with('.')
            && !table.contains(['/', '\\']);
        if !valid {
            return Err(Error::remote(format!("invalid table name '{}'", table)));
        }
        Ok(self.root.join(format!("{}.{}", table, TABLE_EXTENSION)))
    }
}

impl EntityStore for LocalStore {
    fn list_rows(&self, table: &str) -> Result<Vec<Row>> {
        let path = self.table_path(table)?;
        let tsv = match fs::read_to_string(&path) {
            Ok(tsv) => tsv,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let rows = parse_table(table, &tsv)?;
        debug!("read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn upload_table(&self, table: &str, tsv: &str) -> Result<()> {
        let path = self.table_path(table)?;
        let rows = parse_table(table, tsv)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::remote(format!("table '{}' already exists", table)));
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(tsv.as_bytes())?;

        info!("uploaded {} rows to table '{}'", rows.len(), table);
        Ok(())
    }

    fn delete_table(&self, table: &str) -> Result<()> {
        let path = self.table_path(table)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("deleted table '{}'", table);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upload_writes_file() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let tsv = "people_id\tname\n0\tBob\n";

        store.upload_table("people", tsv).unwrap();

        let written = fs::read_to_string(dir.path().join("people.tsv")).unwrap();
        assert_eq!(written, tsv);
        assert_eq!(store.list_rows("people").unwrap()[0]["name"], "Bob");
        assert_eq!(store.table_names().unwrap(), vec!["people"]);
    }

    #[test]
    fn test_existing_table_refused() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.upload_table("t", "t_id\ta\n0\tx\n").unwrap();

        let err = store.upload_table("t", "t_id\ta\n0\ty\n").unwrap_err();
        assert!(err.to_string().contains("already exists"));

        store.delete_table("t").unwrap();
        store.upload_table("t", "t_id\ta\n0\ty\n").unwrap();
        assert_eq!(store.list_rows("t").unwrap()[0]["a"], "y");
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.list_rows("absent").unwrap().is_empty());
        store.delete_table("absent").unwrap();
    }

    #[test]
    fn test_invalid_names_refused() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        for name in ["", "../escape", ".hidden", "a/b"] {
            assert!(store.list_rows(name).unwrap_err().is_remote());
        }
    }

    #[test]
    fn test_malformed_upload_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.upload_table("t", "wrong_id\ta\n0\tx\n").is_err());
        assert!(!dir.path().join("t.tsv").exists());
    }
}
