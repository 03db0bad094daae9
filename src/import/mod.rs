mod errors;
pub use self::errors::*;
mod readers;
pub use self::readers::*;

use crate::record::{format_number, FieldKind, FieldValue, RecordPatch, FIELDS};

use chrono::NaiveDate;
use std::collections::HashMap;

/// A single spreadsheet/CSV cell as delivered by the file readers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Blank cells (empty or whitespace only) count as absent during mapping.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    fn to_value(&self) -> FieldValue {
        match self {
            Self::Empty => FieldValue::Text(String::new()),
            Self::Text(text) => FieldValue::Text(text.clone()),
            Self::Number(value) => FieldValue::Float(*value),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One data row of an import file, cells addressed by their column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow {
    cells: HashMap<String, Cell>,
}

impl ImportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell. Headers are trimmed, for duplicate headers the leftmost column wins.
    pub fn insert(&mut self, header: &str, cell: Cell) {
        self.cells.entry(header.trim().to_string()).or_insert(cell);
    }

    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.cells.get(header)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(Cell::is_blank)
    }
}

impl<'a, C: Into<Cell>> std::iter::FromIterator<(&'a str, C)> for ImportRow {
    fn from_iter<I: IntoIterator<Item = (&'a str, C)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (header, cell) in iter {
            row.insert(header, cell.into());
        }
        row
    }
}

/// Maps a raw import row onto the canonical record shape.
///
/// Each field takes the first non-blank cell among its long label, its short aliases and its
/// snake_case name. Fields without such a cell stay unset, so the stores apply their defaults.
/// Numbers never fail to parse: garbage becomes 0, integers are truncated.
pub fn map_row(row: &ImportRow) -> RecordPatch {
    let mut patch = RecordPatch::default();

    for spec in FIELDS {
        let cell = spec
            .accepted_headers()
            .filter_map(|header| row.get(header))
            .find(|cell| !cell.is_blank());

        if let Some(cell) = cell {
            let value = match spec.kind {
                FieldKind::Date => FieldValue::Text(normalize_date(cell)),
                _ => cell.to_value(),
            };
            patch.set(spec.field, value);
        }
    }

    patch
}

/// Days between the spreadsheet epoch (1899-12-30) and the unix epoch.
const SERIAL_UNIX_EPOCH: i64 = 25569;

/// Brings a date cell into MM/DD/YYYY form.
///
/// Text already containing a '/' is kept, ISO dates (YYYY-MM-DD) are rearranged and
/// numeric spreadsheet serials are converted (45000 is 03/15/2023). Anything else is
/// passed through as text.
pub fn normalize_date(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(serial) => serial_to_date(*serial).unwrap_or_else(|| format_number(*serial)),
        Cell::Text(text) => {
            if text.contains('/') {
                return text.clone();
            }

            let parts: Vec<_> = text.trim().split('-').collect();
            let is_iso = parts.len() == 3
                && parts
                    .iter()
                    .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
            if is_iso {
                format!("{}/{}/{}", parts[1], parts[2], parts[0])
            } else {
                text.clone()
            }
        }
    }
}

fn serial_to_date(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }

    let days = serial.trunc() as i64 - SERIAL_UNIX_EPOCH;
    let offset = chrono::Duration::try_days(days)?;
    let date = NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(offset)?;
    Some(date.format("%m/%d/%Y").to_string())
}
