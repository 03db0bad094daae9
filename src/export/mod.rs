use crate::import::Cell;
use crate::record::{FieldValue, Record, FIELDS};

use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SHEET_NAME: &str = "PDR_Review_Log";
const COLUMN_WIDTH: f64 = 15.0;

#[derive(Debug)]
pub enum ExportError {
    XlsxError { path: PathBuf, source: XlsxError },
}
pub type Result<T> = std::result::Result<T, ExportError>;

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XlsxError { path, source } => {
                write!(f, "could not write workbook {}: {}", path.display(), source)
            }
        }
    }
}
impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::XlsxError { ref source, .. } => Some(source),
        }
    }
}

/// One record as a labeled spreadsheet row, in export column order.
pub fn export_row(record: &Record) -> Vec<(&'static str, Cell)> {
    FIELDS
        .iter()
        .map(|spec| {
            let cell = match record.get(spec.field) {
                FieldValue::Text(text) if text.is_empty() => Cell::Empty,
                FieldValue::Text(text) => Cell::Text(text),
                FieldValue::Integer(value) => Cell::Number(value as f64),
                FieldValue::Float(value) => Cell::Number(value),
            };
            (spec.export_label, cell)
        })
        .collect()
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("PDR_Export_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Writes the records into a single sheet workbook at `path` (replacing an existing file).
pub fn write_workbook(records: &[Record], path: &Path) -> Result<()> {
    write_sheet(records, path).map_err(|source| ExportError::XlsxError {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "exported records");

    Ok(())
}

/// Exports into `dir` under the dated default file name, returns the written path.
pub fn export_to_dir(records: &[Record], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(export_file_name(date));
    write_workbook(records, &path)?;

    Ok(path)
}

fn write_sheet(records: &[Record], path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, spec) in FIELDS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
        worksheet.write_string(0, col, spec.export_label)?;
    }

    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, (_, cell)) in export_row(record).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => (),
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row, col, value)?;
                }
            }
        }
    }

    workbook.save(path)
}
