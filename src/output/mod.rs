//! Output formatting for tables and listing reports

mod json;
mod terminal;
mod tsv;

use std::io::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::listing::ListingReport;
use crate::model::Row;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use tsv::TsvOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the rows of `table` to a writer
    fn render_rows(&self, table: &str, rows: &[Row], writer: &mut dyn Write) -> Result<()>;

    /// Render the outcome of building `table` from a listing
    fn render_report(
        &self,
        table: &str,
        report: &ListingReport,
        writer: &mut dyn Write,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Tsv => Box::new(TsvOutput),
        }
    }
}

/// Column names in display order: first-seen order across the rows.
pub(crate) fn display_columns(rows: &[Row]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for name in row.keys() {
            if !columns.contains(&name.as_str()) {
                columns.push(name);
            }
        }
    }
    columns
}

/// Render rows to stdout
pub fn render_rows_to_stdout(table: &str, rows: &[Row], format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout();
    formatter.render_rows(table, rows, &mut stdout)
}

/// Render a listing report to stdout
pub fn render_report_to_stdout(
    table: &str,
    report: &ListingReport,
    format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout();
    formatter.render_report(table, report, &mut stdout)
}
