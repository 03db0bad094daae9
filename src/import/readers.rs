use super::*;

use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::io;
use std::path::Path;
use tracing::debug;

/// Reads an import file, picking the parser by file extension.
pub fn read_file(path: &Path) -> Result<Vec<ImportRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => read_csv(path),
        Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
            read_workbook(path)
        }
        _ => Err(ImportError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads a CSV file with a header row. Any malformed line fails the whole file.
pub fn read_csv(path: &Path) -> Result<Vec<ImportRow>> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::CsvError {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;

    let rows = parse_csv(file).map_err(|e| ImportError::CsvError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "parsed CSV file");

    Ok(rows)
}

/// Parses CSV content: first line headers, blank lines skipped, short rows allowed.
/// All cells are text, numbers are converted during mapping.
pub fn parse_csv<R: io::Read>(input: R) -> csv::Result<Vec<ImportRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: ImportRow = headers.iter().zip(record.iter()).collect();
        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Reads the first worksheet of a workbook (xlsx, xls, ods), the first row holding the headers.
pub fn read_workbook(path: &Path) -> Result<Vec<ImportRow>> {
    let workbook_error = |source| ImportError::WorkbookError {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|data| match to_cell(data) {
                Cell::Empty => String::new(),
                Cell::Text(text) => text,
                Cell::Number(value) => format_number(value),
            })
            .collect(),
        None => return Ok(Vec::new()),
    };

    let rows: Vec<ImportRow> = sheet_rows
        .map(|data| {
            headers
                .iter()
                .map(String::as_str)
                .zip(data.iter().map(to_cell))
                .collect::<ImportRow>()
        })
        .filter(|row| !row.is_blank())
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "parsed workbook");

    Ok(rows)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        // Dates are kept as serials, the mapper converts them.
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
