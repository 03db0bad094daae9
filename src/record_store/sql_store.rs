use super::*;
use crate::record::schema::pdr_records;

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

/// Record store backed by a relational database reached through diesel.
///
/// The connection is established lazily on first use (and the schema migrated to the
/// current application version), so constructing the store never fails. An unreachable
/// database surfaces as an error of the first operation.
pub struct SqlRecordStore {
    database_url: String,
    conn: Option<SqliteConnection>,
}

impl SqlRecordStore {
    pub fn new(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            conn: None,
        }
    }

    /// Same as new, but connects right away.
    pub fn open(database_url: &str) -> Result<Self> {
        let mut result = Self::new(database_url);
        result.connection()?;

        Ok(result)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn connection(&mut self) -> Result<&SqliteConnection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => Self::connect(&self.database_url)?,
        };

        Ok(self.conn.get_or_insert(conn))
    }

    fn connect(database_url: &str) -> Result<SqliteConnection> {
        debug!(database_url, "connecting to record store");
        let conn = SqliteConnection::establish(database_url)?;

        sql_query("PRAGMA journal_mode = WAL").execute(&conn)?;
        sql_query("PRAGMA busy_timeout = 5000").execute(&conn)?;
        conn.transaction(|| db_migration::upgrade_db(&conn))?;

        Ok(conn)
    }
}

impl RecordStore for SqlRecordStore {
    fn select_all(&mut self) -> Result<Vec<Record>> {
        let conn = self.connection()?;
        let records = pdr_records::table
            .order(pdr_records::id.desc())
            .load::<Record>(conn)?;

        Ok(records)
    }

    fn insert(&mut self, rows: &[RecordPatch]) -> Result<usize> {
        let conn = self.connection()?;

        // One transaction for the whole batch, a failing row rejects all of them.
        let inserted = conn.transaction::<_, StoreError, _>(|| {
            let mut inserted = 0;
            for row in rows {
                let row = row.without_id();
                inserted += if row.is_empty() {
                    sql_query("INSERT INTO pdr_records DEFAULT VALUES").execute(conn)?
                } else {
                    diesel::insert_into(pdr_records::table)
                        .values(&row)
                        .execute(conn)?
                };
            }
            Ok(inserted)
        })?;

        Ok(inserted)
    }

    fn update(&mut self, record_id: i64, fields: &RecordPatch) -> Result<usize> {
        // Diesel refuses empty change sets, nothing to do for them anyway.
        if fields.is_empty() {
            return Ok(0);
        }

        let conn = self.connection()?;
        let changed = diesel::update(pdr_records::table.find(record_id))
            .set(fields)
            .execute(conn)?;

        Ok(changed)
    }

    fn delete(&mut self, record_id: i64) -> Result<usize> {
        let conn = self.connection()?;
        let deleted = diesel::delete(pdr_records::table.find(record_id)).execute(conn)?;

        Ok(deleted)
    }
}
