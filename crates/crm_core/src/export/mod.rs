//! Export of entity snapshots to CSV text and XLSX spreadsheets.
//!
//! # Responsibility
//! - Project records into flat rows through a `ColumnMapping`.
//! - Render CSV/XLSX content and name the resulting artifact.
//! - Write artifacts to a host directory on request.
//!
//! # Invariants
//! - Export never mutates a store; it works on the snapshot it is given.
//! - Artifact names follow `{entity}-export-{yyyy-MM-dd}.{csv|xlsx}`.

use crate::config::{CoreConfig, ExportConfig, Latency};
use crate::model::EntityKind;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

pub mod columns;
pub mod csv_writer;
pub mod xlsx_writer;

pub use columns::{contact_columns, deal_columns, task_columns, Cell, Column, ColumnMapping};
pub use csv_writer::render_csv;
pub use xlsx_writer::{column_widths, render_xlsx};

pub type ExportResult<T> = Result<T, ExportError>;

/// Rendering or write-out failure.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
    Io(std::io::Error),
    Utf8(FromUtf8Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Xlsx(err) => write!(f, "spreadsheet export failed: {err}"),
            Self::Io(err) => write!(f, "export write failed: {err}"),
            Self::Utf8(err) => write!(f, "csv output is not valid UTF-8: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Xlsx(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Utf8(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FromUtf8Error> for ExportError {
    fn from(value: FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

/// `{entity}-export-{yyyy-MM-dd}.{ext}`, e.g. `deals-export-2024-03-05.csv`.
pub fn artifact_file_name(kind: EntityKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}-export-{}.{}",
        kind.plural(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Rendered export ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` under its file name.
    pub fn save_into(&self, dir: &Path) -> ExportResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        info!(
            "event=export_save module=export status=ok file={} bytes={}",
            self.file_name,
            self.content.len()
        );
        Ok(path)
    }
}

/// Renders artifacts after the same simulated latency as the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exporter {
    latency: Latency,
    sizing: ExportConfig,
}

impl Exporter {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            latency: config.latency,
            sizing: config.export,
        }
    }

    /// Renders `records` of `kind` as `format`, named for `date`.
    pub async fn export<T>(
        &self,
        format: ExportFormat,
        kind: EntityKind,
        records: &[T],
        mapping: &ColumnMapping<'_, T>,
        date: NaiveDate,
    ) -> ExportResult<ExportArtifact> {
        self.latency.wait().await;

        let content = match format {
            ExportFormat::Csv => render_csv(records, mapping)?.into_bytes(),
            ExportFormat::Xlsx => render_xlsx(records, mapping, kind.sheet_name(), &self.sizing)?,
        };
        info!(
            "event=export_render module=export status=ok kind={} format={} rows={} bytes={}",
            kind,
            format.extension(),
            records.len(),
            content.len()
        );

        Ok(ExportArtifact {
            file_name: artifact_file_name(kind, format, date),
            mime_type: format.mime_type(),
            content,
        })
    }
}
