mod errors;
pub use self::errors::*;

use crate::local_mirror::LocalMirror;
use crate::record::{Record, RecordPatch};
use crate::record_store::{self, RecordStore};
use crate::storage::Storage;

use std::fmt;
use tracing::{debug, info, warn};

/// Where the current working set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Live,
    Degraded,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "Connected to record store"),
            Self::Degraded => write!(f, "Offline mode / local mirror"),
        }
    }
}

/// The working set after a tracker operation.
#[derive(Debug, PartialEq)]
pub struct Snapshot<'a> {
    pub provenance: Provenance,
    pub records: &'a [Record],
    /// Number of records inserted, changed or deleted by the operation (0 for list).
    pub affected: usize,
    /// Set when a successful fetch replaced local-only edits, names the slot they were moved to.
    pub archived_local_edits: Option<String>,
}

/// Single create/read/update/delete/list contract over the record store and its local mirror.
///
/// The tracker owns both stores and routes every mutation to the active one: the record store
/// while Live, the local mirror while Degraded. Only `list` switches between the two, an
/// unreachable record store turns the tracker Degraded until the next successful `list`.
///
/// Failed mutations are reported and leave the working set untouched, they are never retried
/// and never fall back to the mirror.
pub struct Tracker<R: RecordStore, S: Storage> {
    remote: R,
    mirror: LocalMirror<S>,
    records: Vec<Record>,
    provenance: Provenance,
}

impl<R: RecordStore, S: Storage> Tracker<R, S> {
    pub fn new(remote: R, mirror: LocalMirror<S>) -> Self {
        Self {
            remote,
            mirror,
            records: Vec::new(),
            provenance: Provenance::Live,
        }
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// The current working set, newest first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn mirror(&self) -> &LocalMirror<S> {
        &self.mirror
    }

    /// Refreshes the working set from the record store, or from the local mirror if the
    /// store can not be reached.
    pub fn list(&mut self) -> Result<Snapshot<'_>> {
        match self.remote.select_all() {
            Ok(records) => {
                // The mirror is a cache only, failing to update it does not fail the listing.
                let archived = match self.mirror.replace_all(&records) {
                    Ok(archived) => archived,
                    Err(e) => {
                        warn!(error = %e, "could not update the local mirror");
                        None
                    }
                };

                if self.provenance == Provenance::Degraded {
                    info!("record store reachable again");
                }
                debug!(records = records.len(), "fetched records");
                self.records = records;
                self.provenance = Provenance::Live;

                Ok(self.snapshot(0, archived))
            }
            Err(e) => {
                warn!(error = %e, "record store unreachable, using local mirror");
                self.provenance = Provenance::Degraded;
                self.records = self
                    .mirror
                    .load()
                    .map_err(|source| TrackerError::LocalMirrorError { source })?;

                Ok(self.snapshot(0, None))
            }
        }
    }

    pub fn create(&mut self, record: &RecordPatch) -> Result<Snapshot<'_>> {
        let row = record.without_id();
        self.mutate(|store| store.insert(std::slice::from_ref(&row)))
    }

    pub fn update(&mut self, id: i64, fields: &RecordPatch) -> Result<Snapshot<'_>> {
        self.mutate(|store| store.update(id, fields))
    }

    pub fn delete(&mut self, id: i64) -> Result<Snapshot<'_>> {
        self.mutate(|store| store.delete(id))
    }

    /// Inserts all rows at once (all or nothing). Client ids are dropped, the active store
    /// assigns new ones in input order.
    pub fn bulk_import(&mut self, rows: &[RecordPatch]) -> Result<Snapshot<'_>> {
        let rows: Vec<_> = rows.iter().map(RecordPatch::without_id).collect();
        self.mutate(|store| store.insert(&rows))
    }

    fn active_store(&mut self) -> &mut dyn RecordStore {
        match self.provenance {
            Provenance::Live => &mut self.remote,
            Provenance::Degraded => &mut self.mirror,
        }
    }

    fn mutate<F>(&mut self, operation: F) -> Result<Snapshot<'_>>
    where
        F: FnOnce(&mut dyn RecordStore) -> record_store::Result<usize>,
    {
        let provenance = self.provenance;
        let affected = operation(self.active_store()).map_err(|source| match provenance {
            Provenance::Live => TrackerError::RecordStoreError { source },
            Provenance::Degraded => TrackerError::LocalMirrorError { source },
        })?;
        debug!(affected, ?provenance, "mutation applied");

        match provenance {
            Provenance::Live => {
                let snapshot = self.list()?;
                Ok(Snapshot {
                    affected,
                    ..snapshot
                })
            }
            Provenance::Degraded => {
                self.records = self
                    .mirror
                    .load()
                    .map_err(|source| TrackerError::LocalMirrorError { source })?;
                Ok(self.snapshot(affected, None))
            }
        }
    }

    fn snapshot(&self, affected: usize, archived_local_edits: Option<String>) -> Snapshot<'_> {
        Snapshot {
            provenance: self.provenance,
            records: &self.records,
            affected,
            archived_local_edits,
        }
    }
}
