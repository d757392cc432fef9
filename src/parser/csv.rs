//! Delimited text parser (TSV and CSV)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Row;

use super::Parser;

/// Parser for delimited files whose first line names the columns
pub struct DelimitedParser {
    delimiter: u8,
    extensions: &'static [&'static str],
}

impl DelimitedParser {
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            extensions: &["tsv", "txt"],
        }
    }

    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            extensions: &["csv"],
        }
    }
}

impl Parser for DelimitedParser {
    fn parse(&self, path: &Path) -> Result<Vec<Row>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .context("Failed to read header line")?
            .clone();

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            // +2 for 1-indexing and header
            let record = result.with_context(|| format!("Failed to read row {}", line_num + 2))?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_tsv() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(file, "sample\tname\ns1\tBob\ns2\t\n").unwrap();

        let rows = DelimitedParser::tsv().parse(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Bob");
        assert_eq!(rows[1]["name"], "");
    }

    #[test]
    fn test_ragged_row_fails() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "sample,name\ns1,Bob,extra\n").unwrap();
        assert!(DelimitedParser::csv().parse(file.path()).is_err());
    }
}
