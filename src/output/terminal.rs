//! Colored terminal output

use std::io::{IsTerminal, Write};

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, NoColor, WriteColor};

use crate::listing::ListingReport;
use crate::model::Row;

use super::{display_columns, OutputFormatter};

/// Terminal output with colors
pub struct TerminalOutput {
    color_choice: ColorChoice,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    fn use_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    fn write_report<W: WriteColor>(
        &self,
        table: &str,
        report: &ListingReport,
        writer: &mut W,
    ) -> Result<()> {
        writeln!(writer, "Table '{}': {} samples", table, report.samples)?;

        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow)).set_bold(true);

        for (label, samples) in [
            ("cram without crai", &report.unmatched_cram),
            ("crai without cram", &report.unmatched_crai),
        ] {
            if samples.is_empty() {
                continue;
            }
            writer.set_color(&warn)?;
            write!(writer, "warning:")?;
            writer.reset()?;
            writeln!(writer, " {} {}: {}", samples.len(), label, samples.join(", "))?;
        }

        if !report.skipped.is_empty() {
            writeln!(writer, "Skipped {} other objects", report.skipped.len())?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render_rows(&self, table: &str, rows: &[Row], writer: &mut dyn Write) -> Result<()> {
        if rows.is_empty() {
            writeln!(writer, "Table '{}' is empty.", table)?;
            return Ok(());
        }

        let columns = display_columns(rows);
        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.to_string()));
        for row in rows {
            builder.push_record(
                columns
                    .iter()
                    .map(|c| row.get(*c).cloned().unwrap_or_default()),
            );
        }

        let mut display = builder.build();
        display.with(Style::rounded());

        writeln!(writer, "{} ({} rows)", table, rows.len())?;
        writeln!(writer, "{}", display)?;
        Ok(())
    }

    fn render_report(
        &self,
        table: &str,
        report: &ListingReport,
        writer: &mut dyn Write,
    ) -> Result<()> {
        if self.use_color() {
            self.write_report(table, report, &mut Ansi::new(writer))
        } else {
            self.write_report(table, report, &mut NoColor::new(writer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rows_rendered_as_table() {
        let rows = vec![
            row(&[("sample", "s1"), ("name", "Bob")]),
            row(&[("sample", "s2"), ("name", "Sue")]),
        ];
        let mut out = Vec::new();
        TerminalOutput::with_color_choice(ColorChoice::Never)
            .render_rows("people", &rows, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("people (2 rows)"));
        assert!(text.contains("sample"));
        assert!(text.contains("Sue"));
    }

    #[test]
    fn test_report_lists_unmatched() {
        let report = ListingReport {
            samples: 1,
            unmatched_cram: vec!["B".into(), "C".into()],
            unmatched_crai: Vec::new(),
            skipped: vec!["p/x.bam".into()],
        };
        let mut out = Vec::new();
        TerminalOutput::with_color_choice(ColorChoice::Never)
            .render_report("crams", &report, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Table 'crams': 1 samples"));
        assert!(text.contains("warning: 2 cram without crai: B, C"));
        assert!(!text.contains("crai without cram"));
        assert!(text.contains("Skipped 1 other objects"));
    }
}
