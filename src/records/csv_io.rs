//! CSV reading and writing of partner tables

use crate::records::{ProfileRecord, RecordTable};
use crate::Result;
use std::path::Path;

/// Reads a header-first CSV file into a table
///
/// Rows may have any number of columns. An empty file yields the default
/// header and no rows.
pub fn read_table(path: &Path) -> Result<RecordTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(first) => RecordTable::normalize_header(first?.iter().map(str::to_string).collect()),
        None => return Ok(RecordTable::with_default_header(Vec::new())),
    };

    let mut records = Vec::new();
    for row in rows {
        records.push(ProfileRecord::from_csv(&row?));
    }

    tracing::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(RecordTable { header, records })
}

/// Writes a table as CSV, header first, rows in table order
pub fn write_table(path: &Path, table: &RecordTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;

    writer.write_record(&table.header)?;
    for record in &table.records {
        writer.write_record(record.to_fields())?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to {}", table.records.len(), path.display());
    Ok(())
}
