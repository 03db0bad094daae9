use super::*;
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    DBMigrationError {
        source: db_migration::MigrationError,
    },
    DBConnectionError {
        source: diesel::result::ConnectionError,
    },
    GenericSQLError {
        source: diesel::result::Error,
    },
    // The local mirror's slot could not be read or written.
    StorageIOError {
        source: io::Error,
    },
    CorruptMirror {
        source: serde_json::Error,
    },
}
pub type Result<T> = std::result::Result<T, StoreError>;

// Error Boilerplate (Error display, conversion and source)
impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DBMigrationError { source } => {
                write!(f, "record store schema migration failed: {}", source)
            }
            Self::DBConnectionError { source } => {
                write!(f, "record store unreachable: {}", source)
            }
            Self::GenericSQLError { source } => write!(f, "record store error: {}", source),
            Self::StorageIOError { source } => write!(f, "local mirror not accessible: {}", source),
            Self::CorruptMirror { source } => write!(f, "local mirror is corrupt: {}", source),
        }
    }
}
impl From<db_migration::MigrationError> for StoreError {
    fn from(error: db_migration::MigrationError) -> Self {
        Self::DBMigrationError { source: error }
    }
}
impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        Self::GenericSQLError { source: error }
    }
}
impl From<diesel::result::ConnectionError> for StoreError {
    fn from(error: diesel::result::ConnectionError) -> Self {
        Self::DBConnectionError { source: error }
    }
}
impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        Self::StorageIOError { source: error }
    }
}
impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::CorruptMirror { source: error }
    }
}
impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DBMigrationError { ref source } => Some(source),
            Self::DBConnectionError { ref source } => Some(source),
            Self::GenericSQLError { ref source } => Some(source),
            Self::StorageIOError { ref source } => Some(source),
            Self::CorruptMirror { ref source } => Some(source),
        }
    }
}
