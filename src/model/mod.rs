//! Data model for entity tables

mod key;
mod schema;
mod table;

pub use key::KeyedRowSet;
pub use schema::{column_set, has_columns, ColumnSet};
pub use table::{ColumnTable, Row};

pub(crate) use schema::ShapeCheck;
