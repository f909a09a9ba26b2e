//! Styled spreadsheet export
//!
//! Converts a CSV file into an `.xlsx` workbook with a single sheet:
//! - Bold 12pt white header text on a solid colored fill, centered
//! - Header row frozen
//! - Fixed column widths
//!
//! Every cell is written as a string, exactly as it appears in the CSV.

use crate::config::{parse_hex_color, SpreadsheetConfig};
use crate::{Result, ScoutError};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook};
use std::path::Path;

/// Converts `csv_path` into a styled workbook at `xlsx_path`
///
/// # Returns
///
/// * `Ok(usize)` - Number of CSV rows written, header included
/// * `Err(ScoutError)` - The CSV could not be read or the workbook not saved
pub fn export_spreadsheet(
    csv_path: &Path,
    xlsx_path: &Path,
    config: &SpreadsheetConfig,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    let header_color = parse_hex_color(&config.header_color)?;
    let header_format = Format::new()
        .set_bold()
        .set_font_size(12.0)
        .set_font_color(Color::White)
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(header_color))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(config.sheet_name.as_str())?;

    let mut rows = 0usize;
    for (row_index, row) in reader.records().enumerate() {
        let row = row?;
        let row_number = u32::try_from(row_index).map_err(|_| too_large("rows"))?;

        for (col_index, value) in row.iter().enumerate() {
            let col_number = u16::try_from(col_index).map_err(|_| too_large("columns"))?;
            if row_number == 0 {
                worksheet.write_string_with_format(row_number, col_number, value, &header_format)?;
            } else {
                worksheet.write_string(row_number, col_number, value)?;
            }
        }
        rows += 1;
    }

    for (col_index, width) in config.column_widths.iter().enumerate() {
        let col_number = u16::try_from(col_index).map_err(|_| too_large("columns"))?;
        worksheet.set_column_width(col_number, *width)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(xlsx_path)?;

    tracing::info!(
        "Exported {} rows from {} to {}",
        rows,
        csv_path.display(),
        xlsx_path.display()
    );
    Ok(rows)
}

fn too_large(what: &str) -> ScoutError {
    ScoutError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("CSV has too many {} for a worksheet", what),
    ))
}
