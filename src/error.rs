//! Error types for table building, keying and joining.

use std::io;

use thiserror::Error;

/// Result type for tablejoin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, keying, joining or storing tables.
#[derive(Debug, Error)]
pub enum Error {
    /// An object name could not be split into sample and extension.
    #[error("Unable to parse '{filename}'")]
    Parse { filename: String },

    /// Two rows of one table share a join key value.
    #[error("Duplicate value '{key}' for key column '{key_column}'{}", in_table(.table))]
    DuplicateKey {
        table: Option<String>,
        key_column: String,
        key: String,
    },

    /// A row does not carry the column it is being keyed on.
    #[error("Row {row}{} has no key column '{key_column}'", in_table(.table))]
    MissingKeyColumn {
        table: Option<String>,
        key_column: String,
        row: usize,
    },

    /// Two tables being joined both carry these columns.
    #[error("Keyed rows to join may not share columns: {}", .columns.join(", "))]
    ColumnConflict { columns: Vec<String> },

    /// Rows of one table do not share a single column set.
    #[error("Row {row}{} has columns [{found}], expected [{expected}]", in_table(.table))]
    HeterogeneousRows {
        table: Option<String>,
        row: usize,
        expected: String,
        found: String,
    },

    /// Column-oriented data with columns of different lengths.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    UnequalColumnLengths {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Nothing to upload.
    #[error("Refusing to upload empty table '{table}'")]
    EmptyTable { table: String },

    /// A join chain needs at least one table.
    #[error("No tables given to join")]
    EmptyJoin,

    /// A cell value cannot be represented in the tab-separated wire format.
    #[error("Cell in column '{column}' contains a tab or line break: {value:?}")]
    UnsupportedCell { column: String, value: String },

    /// A table or column name cannot be written into the wire header.
    #[error("Name {name:?} contains a tab or line break")]
    UnsupportedName { name: String },

    /// Entity store or object listing failure.
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// I/O failure in a local store or lister.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl Error {
    /// Build a remote error from anything displayable.
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote {
            message: message.into(),
        }
    }

    /// Returns true for failures of the store or lister collaborators.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. } | Error::Io { .. })
    }
}

fn in_table(table: &Option<String>) -> String {
    match table {
        Some(name) => format!(" of table '{}'", name),
        None => String::new(),
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::remote(format!("malformed table data: {}", err))
    }
}
