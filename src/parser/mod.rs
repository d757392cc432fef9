//! Readers for local row files fed to `upload`

mod csv;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Row;

pub use self::csv::DelimitedParser;
pub use self::json::JsonParser;

/// Trait for reading a local file into rows
pub trait Parser: Send + Sync {
    /// Parse a file into uniform rows
    fn parse(&self, path: &Path) -> Result<Vec<Row>>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for choosing a parser by file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(DelimitedParser::tsv()),
                Box::new(DelimitedParser::csv()),
                Box::new(JsonParser),
            ],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Vec<Row>> {
        let parser = self.get_parser(path)?;
        parser.parse(path)
    }
}
