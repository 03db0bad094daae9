use crate::record_store::StoreError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TrackerError {
    // A mutation was rejected by the (reachable) record store, nothing changed.
    RecordStoreError { source: StoreError },
    LocalMirrorError { source: StoreError },
}
pub type Result<T> = std::result::Result<T, TrackerError>;

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordStoreError { source } => write!(f, "operation failed: {}", source),
            Self::LocalMirrorError { source } => write!(f, "offline operation failed: {}", source),
        }
    }
}
impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RecordStoreError { ref source } => Some(source),
            Self::LocalMirrorError { ref source } => Some(source),
        }
    }
}
