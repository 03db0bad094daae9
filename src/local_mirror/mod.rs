use crate::record::{Record, RecordPatch};
use crate::record_store::{RecordStore, Result};
use crate::storage::Storage;

use chrono::Datelike;
use tracing::{debug, warn};

/// Slot holding the JSON array of all mirrored records.
pub const MIRROR_KEY: &str = "pdr_records";
/// Marker slot, present while the mirror holds edits never seen by the record store.
pub const UNSYNCED_KEY: &str = "pdr_records.unsynced";
const ARCHIVE_KEY_PREFIX: &str = "pdr_records.unsynced-";

/// Client side snapshot of the last record set fetched from the record store.
///
/// Implements RecordStore itself, so it can stand in for the remote store while it is
/// unreachable. In that role it hands out its own ids (max + 1) and applies the same
/// defaults as the remote table for unset fields (current year, damage "N").
///
/// Every mutation replaces the whole slot, there are no partial writes.
pub struct LocalMirror<S: Storage> {
    storage: S,
}

impl<S: Storage> LocalMirror<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The mirrored records, empty if nothing was mirrored yet.
    pub fn load(&self) -> Result<Vec<Record>> {
        match self.storage.read(MIRROR_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn has_unsynced_edits(&self) -> Result<bool> {
        Ok(self.storage.read(UNSYNCED_KEY)?.is_some())
    }

    /// Overwrites the mirror with a freshly fetched record set.
    ///
    /// Local-only edits are not merged into the fetched set. If the mirror holds any, its
    /// previous content is kept under a new archive key first, which is returned.
    ///
    /// The unsynced marker is cleared before the mirror is overwritten, so a marker never
    /// labels fetched records as local edits.
    pub fn replace_all(&self, records: &[Record]) -> Result<Option<String>> {
        let archive_key = if self.has_unsynced_edits()? {
            let key = format!("{}{}", ARCHIVE_KEY_PREFIX, uuid::Uuid::new_v4());
            let previous = self
                .storage
                .read(MIRROR_KEY)?
                .unwrap_or_else(|| "[]".to_string());
            self.storage.write(&key, &previous)?;
            warn!(archive = %key, "record store replaced unsynced local edits, archived them");
            self.storage.remove(UNSYNCED_KEY)?;
            Some(key)
        } else {
            None
        };

        if let Err(error) = self.save(records) {
            if let Some(key) = &archive_key {
                warn!(archive = %key, "local edits archived but the mirror was not replaced");
            }
            return Err(error);
        }

        Ok(archive_key)
    }

    /// Keys of all snapshots archived by replace_all.
    pub fn archived_snapshots(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(ARCHIVE_KEY_PREFIX))
            .collect())
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.storage.write(MIRROR_KEY, &json)?;
        debug!(records = records.len(), "local mirror written");

        Ok(())
    }

    fn save_local_edit(&self, records: &[Record]) -> Result<()> {
        self.save(records)?;
        self.storage.write(UNSYNCED_KEY, "1")?;

        Ok(())
    }

    fn new_local_record(id: i64, row: &RecordPatch) -> Record {
        let mut record = Record::from_patch(id, row);
        if row.year.is_none() {
            record.year = chrono::Local::now().year();
        }
        if row.damage.is_none() {
            record.damage = "N".to_string();
        }
        record
    }
}

/// Next free local id: one above the highest id in use, 1 for an empty set.
pub fn next_id(records: &[Record]) -> i64 {
    records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
}

impl<S: Storage> RecordStore for LocalMirror<S> {
    fn select_all(&mut self) -> Result<Vec<Record>> {
        self.load()
    }

    fn insert(&mut self, rows: &[RecordPatch]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let existing = self.load()?;
        let first_id = next_id(&existing);

        // New records go in front (in their given order), like the newest-first remote listing.
        let mut records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Self::new_local_record(first_id + i as i64, row))
            .collect();
        records.extend(existing);

        self.save_local_edit(&records)?;
        Ok(rows.len())
    }

    fn update(&mut self, id: i64, fields: &RecordPatch) -> Result<usize> {
        let mut records = self.load()?;

        let mut changed = 0;
        for record in records.iter_mut().filter(|record| record.id == id) {
            record.apply(fields);
            changed += 1;
        }

        if changed > 0 {
            self.save_local_edit(&records)?;
        }
        Ok(changed)
    }

    fn delete(&mut self, id: i64) -> Result<usize> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        let deleted = before - records.len();
        if deleted > 0 {
            self.save_local_edit(&records)?;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests;
