//! Semicolon-separated, decimal-comma CSV input and output.
//!
//! The export side is the direct inverse of the locale convention used on
//! input: writing a prepared table and reading it back yields identical
//! data.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use indicator_core::Delta;

use crate::error::PrepareResult;
use crate::locale::format_locale_number;
use crate::prepare::{prepare, PreparedTable, RawCell, RawTable, YEAR_COLUMN};

/// Read a raw delimited table. First row is column names; no further header
/// contract.
pub fn read_raw<R: Read>(reader: R) -> PrepareResult<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut columns: Vec<(String, Vec<RawCell>)> = headers
        .into_iter()
        .map(|name| (name, Vec::new()))
        .collect();

    for record in csv_reader.records() {
        let record = record?;
        for (i, (_, cells)) in columns.iter_mut().enumerate() {
            let cell = record.get(i).unwrap_or("");
            cells.push(RawCell::Text(cell.to_string()));
        }
    }

    Ok(RawTable { columns })
}

/// Load and normalize a dataset from a file path.
pub fn load_prepared(path: impl AsRef<Path>) -> PrepareResult<PreparedTable> {
    let file = File::open(path)?;
    let raw = read_raw(file)?;
    prepare(&raw)
}

/// Write a prepared table back out in the source locale.
pub fn write_prepared<W: Write>(table: &PreparedTable, writer: W) -> PrepareResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    let keys = table.keys();
    let mut header: Vec<&str> = keys.iter().map(|k| k.source_label()).collect();
    header.push(YEAR_COLUMN);
    csv_writer.write_record(&header)?;

    for record in table.records() {
        let mut row: Vec<String> = keys
            .iter()
            .map(|k| format_locale_number(record.get(*k).unwrap_or(0.0)))
            .collect();
        row.push(record.year.to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_prepared(table: &PreparedTable, path: impl AsRef<Path>) -> PrepareResult<()> {
    let file = File::create(path)?;
    write_prepared(table, file)
}

/// Write the derived delta table in the same locale convention.
pub fn write_deltas<W: Write>(deltas: &[Delta], writer: W) -> PrepareResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_writer.write_record([
        "Indicador",
        "Ano Anterior",
        "Ano Atual",
        "Valor Anterior",
        "Valor Atual",
        "Variação Abs",
        "Variação %",
    ])?;

    for delta in deltas {
        csv_writer.write_record([
            delta.key.source_label().to_string(),
            delta.previous_year.to_string(),
            delta.current_year.to_string(),
            format_locale_number(delta.previous),
            format_locale_number(delta.current),
            format_locale_number(delta.absolute),
            delta
                .percentage
                .map(format_locale_number)
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_deltas(deltas: &[Delta], path: impl AsRef<Path>) -> PrepareResult<()> {
    let file = File::create(path)?;
    write_deltas(deltas, file)
}
