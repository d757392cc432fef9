//! Entity store and object lister collaborators
//!
//! The join engine never talks to storage directly; it consumes rows read
//! through [`EntityStore`] and object keys listed through [`ObjectLister`].

mod lister;
mod local;
mod memory;

use crate::error::Result;
use crate::model::Row;

pub use lister::{DirectoryLister, ListingFile, StaticListing};
pub use local::LocalStore;
pub use memory::MemoryStore;

/// A workspace store of named entity tables.
pub trait EntityStore: Send + Sync {
    /// Read the attribute rows of `table`. A table that does not exist has
    /// no rows.
    fn list_rows(&self, table: &str) -> Result<Vec<Row>>;

    /// Create `table` from a TSV document in the upload format. Uploading
    /// over an existing table is an error; delete it first.
    fn upload_table(&self, table: &str, tsv: &str) -> Result<()>;

    /// Delete every entity of `table`. Deleting a missing table is a no-op.
    fn delete_table(&self, table: &str) -> Result<()>;
}

/// A flat listing of object keys.
pub trait ObjectLister {
    /// Keys of all objects under `prefix`.
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn list_rows(&self, table: &str) -> Result<Vec<Row>> {
        (**self).list_rows(table)
    }

    fn upload_table(&self, table: &str, tsv: &str) -> Result<()> {
        (**self).upload_table(table, tsv)
    }

    fn delete_table(&self, table: &str) -> Result<()> {
        (**self).delete_table(table)
    }
}
