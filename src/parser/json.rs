//! JSON row/column parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::model::{ColumnTable, Row};

use super::Parser;

/// Parser for JSON files holding either an array of row objects or an
/// object of equal-length column arrays
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Vec<Row>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .context("Failed to parse JSON file")?;

        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(obj) => Ok(obj
                        .into_iter()
                        .map(|(k, v)| (k, cell_text(v)))
                        .collect::<Row>()),
                    _ => bail!("JSON array item {} is not an object", i),
                })
                .collect(),
            Value::Object(obj) => {
                let mut table = ColumnTable::new();
                for (name, values) in obj {
                    let Value::Array(values) = values else {
                        bail!("JSON column '{}' is not an array", name);
                    };
                    table.insert_column(name, values.into_iter().map(cell_text).collect());
                }
                Ok(table.to_rows()?)
            }
            _ => bail!("JSON must be an array of rows or an object of columns"),
        }
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "json"
    }
}

/// Cells are plain strings; other scalars keep their JSON spelling
fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<Vec<Row>> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", text).unwrap();
        JsonParser.parse(file.path())
    }

    #[test]
    fn test_array_of_rows() {
        let rows = parse(r#"[{"sample": "s1", "age": 40}, {"sample": "s2", "age": null}]"#).unwrap();
        assert_eq!(rows[0]["age"], "40");
        assert_eq!(rows[1]["age"], "");
    }

    #[test]
    fn test_object_of_columns() {
        let rows = parse(r#"{"sample": ["s1", "s2"], "name": ["Bob", "Sue"]}"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "Sue");
    }

    #[test]
    fn test_unequal_columns_fail() {
        assert!(parse(r#"{"sample": ["s1", "s2"], "name": ["Bob"]}"#).is_err());
    }

    #[test]
    fn test_scalar_rejected() {
        assert!(parse("42").is_err());
    }
}
