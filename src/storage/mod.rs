use std::io;

/// Abstraction layer above the persisted key/value slots of a workspace.
///
/// Two implementations exist:
/// 1) thin wrapper around a metadata directory on disk, one file per key
/// 2) in-memory mock that allows testing for storage errors (failing writes, ...)
///
/// Values are always replaced as a whole, there are no partial or merging writes.
/// Keys must be plain names (no path separators).
pub trait Storage: Clone {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
    fn keys(&self) -> io::Result<Vec<String>>;
}

fn check_key(key: &str) -> io::Result<()> {
    if key.is_empty() || key.contains(|c: char| c == '/' || c == '\\') || key.starts_with('.') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid storage key '{}'", key),
        ));
    }
    Ok(())
}

// Actual Implementations in Sub-Modules
mod dir_storage;
pub use self::dir_storage::{DirStorage, METADATA_DIR};

mod in_memory_storage;
pub use self::in_memory_storage::InMemoryStorage;

#[cfg(test)]
mod tests;
