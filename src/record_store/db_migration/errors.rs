use super::*;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MigrationError {
    // The schema version pragma could not be read or written.
    ReadWriteDBVersion { source: diesel::result::Error },
    UnknownDBVersion { version: DBVersion },
    SQLError { source: diesel::result::Error },
}
pub type Result<T> = std::result::Result<T, MigrationError>;

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadWriteDBVersion { source } => {
                write!(f, "could not access the record store schema version: {}", source)
            }
            Self::UnknownDBVersion { version } => write!(
                f,
                "record store schema version {} is not supported by this build",
                version
            ),
            Self::SQLError { source } => write!(f, "schema upgrade statement failed: {}", source),
        }
    }
}
impl From<diesel::result::Error> for MigrationError {
    fn from(error: diesel::result::Error) -> Self {
        Self::SQLError { source: error }
    }
}
impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadWriteDBVersion { source } | Self::SQLError { source } => Some(source),
            Self::UnknownDBVersion { .. } => None,
        }
    }
}
