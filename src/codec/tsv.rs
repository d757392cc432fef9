//! Tab-separated upload format
//!
//! A table is written as a header line `<table>_id<TAB>col1<TAB>col2...`
//! with the attribute columns sorted, followed by one line per row. The
//! `<table>_id` column holds a synthetic 0-based row index that only exists
//! on the wire; it is never a business key and is dropped again on parse.
//! Values are raw strings: no quoting, so tabs and line breaks are refused.

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::model::{ColumnTable, Row, ShapeCheck};

/// Name of the identity column for `table`.
pub fn id_column(table: &str) -> String {
    format!("{}_id", table)
}

/// Serialize uniform rows for upload as `table`.
pub fn serialize_rows(table: &str, rows: &[Row]) -> Result<String> {
    if rows.is_empty() {
        return Err(Error::EmptyTable {
            table: table.to_string(),
        });
    }

    let mut shape = ShapeCheck::new(Some(table));
    for (index, row) in rows.iter().enumerate() {
        shape.check(index, row)?;
    }
    let columns: Vec<String> = shape.finish().into_iter().collect();

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header = id_column(table);
    check_name(table)?;
    for column in &columns {
        check_name(column)?;
    }
    writer.write_record(std::iter::once(header.as_str()).chain(columns.iter().map(String::as_str)))?;

    for (index, row) in rows.iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(index.to_string());
        for column in &columns {
            let value = &row[column.as_str()];
            check_cell(column, value)?;
            record.push(value.clone());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| Error::from(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| Error::remote(err.to_string()))
}

/// Serialize a column-oriented table for upload as `table`.
pub fn serialize_columns(table: &str, columns: &ColumnTable) -> Result<String> {
    serialize_rows(table, &columns.to_rows()?)
}

/// Parse an uploaded TSV back into attribute rows.
///
/// The first header must be `<table>_id`; its values must be unique and are
/// discarded.
pub fn parse_table(table: &str, tsv: &str) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(true)
        .from_reader(tsv.as_bytes());

    let headers = reader.headers()?.clone();
    let expected = id_column(table);
    match headers.get(0) {
        Some(first) if first == expected => {}
        Some(first) => {
            return Err(Error::remote(format!(
                "first column of table '{}' must be '{}', found '{}'",
                table, expected, first
            )))
        }
        None => return Err(Error::remote(format!("table '{}' has no header", table))),
    }

    let mut seen = FxHashSet::default();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let entity = record.get(0).unwrap_or_default();
        if !seen.insert(entity.to_string()) {
            return Err(Error::remote(format!(
                "Duplicated entities are not allowed in TSV: {}",
                entity
            )));
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .skip(1)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn check_name(name: &str) -> Result<()> {
    if has_break(name) {
        return Err(Error::UnsupportedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn has_break(text: &str) -> bool {
    text.contains(['\t', '\n', '\r'])
}

fn check_cell(column: &str, value: &str) -> Result<()> {
    if has_break(value) {
        return Err(Error::UnsupportedCell {
            column: column.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
