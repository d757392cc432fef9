//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::listing::ListingReport;
use crate::model::Row;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn write<T: Serialize>(&self, value: &T, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonTable<'a> {
    table: &'a str,
    rows: &'a [Row],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    table: &'a str,
    #[serde(flatten)]
    report: &'a ListingReport,
}

impl OutputFormatter for JsonOutput {
    fn render_rows(&self, table: &str, rows: &[Row], writer: &mut dyn Write) -> Result<()> {
        self.write(&JsonTable { table, rows }, writer)
    }

    fn render_report(
        &self,
        table: &str,
        report: &ListingReport,
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write(&JsonReport { table, report }, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_rows_as_objects() {
        let rows: Vec<Row> = vec![[("sample".to_string(), "s1".to_string())]
            .into_iter()
            .collect()];
        let mut out = Vec::new();
        JsonOutput::compact()
            .render_rows("people", &rows, &mut out)
            .unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"table": "people", "rows": [{"sample": "s1"}]}));
    }

    #[test]
    fn test_report_fields() {
        let report = ListingReport {
            samples: 2,
            unmatched_crai: vec!["C".into()],
            ..Default::default()
        };
        let mut out = Vec::new();
        JsonOutput::new()
            .render_report("crams", &report, &mut out)
            .unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["table"], "crams");
        assert_eq!(value["samples"], 2);
        assert_eq!(value["unmatched_crai"], json!(["C"]));
    }
}
