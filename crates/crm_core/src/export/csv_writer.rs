//! Delimited text rendering.

use crate::export::columns::{Cell, ColumnMapping};
use crate::export::{ExportError, ExportResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Renders a header row plus one row per record.
///
/// Rows are joined by `\n` with no trailing terminator. Fields containing a
/// comma, quote or line break are quoted with inner quotes doubled. An empty
/// record list renders as an empty string.
pub fn render_csv<T>(records: &[T], mapping: &ColumnMapping<'_, T>) -> ExportResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(mapping.headers())?;
    for record in records {
        writer.write_record(mapping.row(record).iter().map(Cell::render))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
