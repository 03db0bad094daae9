use std::error::Error;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ImportError {
    CsvError {
        path: PathBuf,
        source: csv::Error,
    },
    WorkbookError {
        path: PathBuf,
        source: calamine::Error,
    },
    NoWorksheet {
        path: PathBuf,
    },
    UnsupportedFormat {
        path: PathBuf,
    },
}
pub type Result<T> = std::result::Result<T, ImportError>;

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CsvError { path, source } => {
                write!(f, "could not parse CSV file {}: {}", path.display(), source)
            }
            Self::WorkbookError { path, source } => {
                write!(f, "could not read workbook {}: {}", path.display(), source)
            }
            Self::NoWorksheet { path } => {
                write!(f, "workbook {} contains no worksheet", path.display())
            }
            Self::UnsupportedFormat { path } => write!(
                f,
                "unsupported import file {} (expected .csv, .xlsx, .xls or .ods)",
                path.display()
            ),
        }
    }
}
impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CsvError { ref source, .. } => Some(source),
            Self::WorkbookError { ref source, .. } => Some(source),
            Self::NoWorksheet { .. } => None,
            Self::UnsupportedFormat { .. } => None,
        }
    }
}
