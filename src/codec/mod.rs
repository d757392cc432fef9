//! Wire encoding of tables for the entity store

pub mod tsv;

pub use tsv::{id_column, parse_table, serialize_columns, serialize_rows};
