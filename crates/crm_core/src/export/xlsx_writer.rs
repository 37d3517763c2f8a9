//! Spreadsheet rendering.

use crate::config::ExportConfig;
use crate::export::columns::{Cell, ColumnMapping};
use crate::export::ExportResult;
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

const CURRENCY_FORMAT: &str = "$#,##0";
const PERCENT_FORMAT: &str = "0%";
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Renders one worksheet named `sheet_name` and returns the XLSX bytes.
///
/// Currency cells use `$#,##0`, percent cells are stored as fractions with
/// `0%`, dates use `yyyy-mm-dd`. Column widths follow `sizing`.
pub fn render_xlsx<T>(
    records: &[T],
    mapping: &ColumnMapping<'_, T>,
    sheet_name: &str,
    sizing: &ExportConfig,
) -> ExportResult<Vec<u8>> {
    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_FORMAT);
    let percent_format = Format::new().set_num_format(PERCENT_FORMAT);
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in mapping.headers().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in mapping.row(record).iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(value) => {
                    worksheet.write_string(row, col, value.as_str())?;
                }
                Cell::Integer(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                Cell::Currency(value) => {
                    worksheet.write_number_with_format(row, col, *value, &currency_format)?;
                }
                Cell::Percent(value) => {
                    let fraction = f64::from(*value) / 100.0;
                    worksheet.write_number_with_format(row, col, fraction, &percent_format)?;
                }
                Cell::Date(value) => {
                    let date = ExcelDateTime::from_ymd(
                        value.year() as u16,
                        value.month() as u8,
                        value.day() as u8,
                    )?;
                    worksheet.write_datetime_with_format(row, col, &date, &date_format)?;
                }
            }
        }
    }

    for (col, width) in column_widths(records, mapping, sizing).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Width per column from the longest rendered cell, header included.
pub fn column_widths<T>(
    records: &[T],
    mapping: &ColumnMapping<'_, T>,
    sizing: &ExportConfig,
) -> Vec<usize> {
    let mut longest: Vec<usize> = mapping.headers().map(|header| header.chars().count()).collect();
    for record in records {
        for (col, cell) in mapping.row(record).iter().enumerate() {
            longest[col] = longest[col].max(cell.render().chars().count());
        }
    }
    longest
        .into_iter()
        .map(|chars| sizing.column_width(chars))
        .collect()
}
