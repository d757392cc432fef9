//! Upload-format TSV output

use std::io::Write;

use anyhow::Result;

use crate::codec::serialize_rows;
use crate::listing::ListingReport;
use crate::model::Row;

use super::OutputFormatter;

/// Writes rows exactly as they would be uploaded.
pub struct TsvOutput;

impl OutputFormatter for TsvOutput {
    fn render_rows(&self, table: &str, rows: &[Row], writer: &mut dyn Write) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        write!(writer, "{}", serialize_rows(table, rows)?)?;
        Ok(())
    }

    fn render_report(
        &self,
        _table: &str,
        report: &ListingReport,
        writer: &mut dyn Write,
    ) -> Result<()> {
        for sample in &report.unmatched_cram {
            writeln!(writer, "unmatched_cram\t{}", sample)?;
        }
        for sample in &report.unmatched_crai {
            writeln!(writer, "unmatched_crai\t{}", sample)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_in_upload_format() {
        let rows: Vec<Row> = vec![[
            ("sample".to_string(), "s1".to_string()),
            ("name".to_string(), "Bob".to_string()),
        ]
        .into_iter()
        .collect()];
        let mut out = Vec::new();
        TsvOutput.render_rows("people", &rows, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "people_id\tname\tsample\n0\tBob\ts1\n"
        );
    }
}
