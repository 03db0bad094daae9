pub mod db_migration;
mod errors;
pub use self::errors::*;
mod sql_store;
pub use self::sql_store::SqlRecordStore;

use crate::record::{Record, RecordPatch};

/// Uniform interface above a tabular record service.
///
/// Mirrors the generic operations of the hosted backend: select everything ordered by id
/// descending, insert rows, update fields by id and delete by id. Each call is a single,
/// synchronous round trip that either succeeds or reports an error, nothing is retried.
///
/// Stores assign ids themselves, ids present in inserted rows are ignored.
pub trait RecordStore {
    fn select_all(&mut self) -> Result<Vec<Record>>;

    /// Inserts all rows or none of them. Returns the number of inserted rows.
    fn insert(&mut self, rows: &[RecordPatch]) -> Result<usize>;

    /// Overwrites the fields set in `fields`. Returns the number of changed records.
    fn update(&mut self, id: i64, fields: &RecordPatch) -> Result<usize>;

    /// Returns the number of deleted records.
    fn delete(&mut self, id: i64) -> Result<usize>;
}
