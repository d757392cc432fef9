//! tablejoin - keyed entity tables for workspace stores
//!
//! Builds sample tables from CRAM/CRAI object listings, keys entity tables on
//! a shared column, and outer-joins them into a single table for upload.

pub mod codec;
pub mod config;
pub mod error;
pub mod join;
pub mod listing;
pub mod model;
pub mod output;
pub mod parser;
pub mod store;
pub mod workspace;

pub use config::{Config, BLANK_CELL_VALUE};
pub use error::{Error, Result};
pub use join::JoinEngine;
pub use model::{ColumnTable, KeyedRowSet, Row};
pub use workspace::Workspace;
