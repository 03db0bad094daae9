use super::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const METADATA_DIR: &str = ".__pdr_tracker__";

/// Stores every key as a file inside the workspace's metadata directory.
#[derive(Clone, Debug)]
pub struct DirStorage {
    root_path: PathBuf,
}

impl DirStorage {
    /// Opens the metadata directory of the given workspace, creating it if required.
    pub fn open<P: AsRef<Path>>(workspace: P) -> io::Result<Self> {
        let root_path = workspace.as_ref().join(METADATA_DIR);
        fs::DirBuilder::new().recursive(true).create(&root_path)?;

        Ok(Self { root_path })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn key_path(&self, key: &str) -> io::Result<PathBuf> {
        check_key(key)?;
        Ok(self.root_path.join(key))
    }
}

impl Storage for DirStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let target = self.key_path(key)?;

        // Write next to the target and rename, readers never see a half written value.
        let mut tmp_file = tempfile::NamedTempFile::new_in(&self.root_path)?;
        tmp_file.write_all(value.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file.persist(&target).map_err(|e| e.error)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.key_path(key)?) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Left over temp files of interrupted writes are no keys.
                if !name.starts_with('.') {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();

        Ok(keys)
    }
}
