//! SQLite record store: an ordered, subject-indexed log of memory entries.
//!
//! Entries are returned in insertion order (oldest first). Every write runs in
//! SQLite's autocommit mode, so it is durable by the time the call returns.

use crate::schema::{ensure_schema, validate_table_name};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use mnemo_types::config::DEFAULT_TABLE_NAME;
use mnemo_types::error::{MnemoError, MnemoResult};
use mnemo_types::memory::{MemoryEntry, SubjectCount};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// Location string SQLite treats as a private in-memory database.
const IN_MEMORY: &str = ":memory:";

/// How long a statement waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Record store backed by a single SQLite table.
#[derive(Clone)]
pub struct RecordStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl RecordStore {
    /// Open (or create) the store at `location`.
    ///
    /// The parent directory is created when missing. `table` defaults to
    /// `memories`.
    pub fn open(location: impl AsRef<Path>, table: Option<&str>) -> MnemoResult<Self> {
        let location = location.as_ref();
        let table = table.unwrap_or(DEFAULT_TABLE_NAME);
        validate_table_name(table)?;

        if location != Path::new(IN_MEMORY) {
            if let Some(parent) = location.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MnemoError::StoreUnavailable(format!(
                        "cannot create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(location).map_err(|e| {
            MnemoError::StoreUnavailable(format!("cannot open {}: {e}", location.display()))
        })?;
        info!(path = %location.display(), table, "Opened memory store");
        Self::with_connection(conn, table)
    }

    /// Open a private in-memory store. Contents vanish when it is dropped.
    pub fn open_in_memory(table: Option<&str>) -> MnemoResult<Self> {
        let table = table.unwrap_or(DEFAULT_TABLE_NAME);
        let conn = Connection::open_in_memory()
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        Self::with_connection(conn, table)
    }

    /// Wrap an already-open connection, creating the table if needed.
    pub fn with_connection(conn: Connection, table: &str) -> MnemoResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        ensure_schema(&conn, table)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        })
    }

    fn lock(&self) -> MnemoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))
    }

    /// Append an entry stamped with the current time.
    pub fn insert(&self, subject: &str, text: &str) -> MnemoResult<MemoryEntry> {
        self.insert_at(subject, text, Utc::now())
    }

    /// Append an entry with an explicit timestamp.
    ///
    /// Duplicates are allowed. Position is decided by insertion order, not by
    /// `timestamp`. The timestamp is kept to microseconds, both in storage and
    /// in the returned entry.
    pub fn insert_at(
        &self,
        subject: &str,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> MnemoResult<MemoryEntry> {
        let timestamp = timestamp.trunc_subsecs(6);
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO \"{}\" (ts, subject, memory) VALUES (?1, ?2, ?3)",
                self.table
            ),
            rusqlite::params![format_timestamp(&timestamp), subject, text],
        )
        .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        debug!(subject, "Inserted memory entry");
        Ok(MemoryEntry::at(subject, text, timestamp))
    }

    /// Every distinct subject with its live entry count, sorted by subject.
    pub fn list_subjects(&self) -> MnemoResult<Vec<SubjectCount>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT subject, COUNT(*) FROM \"{}\" GROUP BY subject ORDER BY subject",
                self.table
            ))
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SubjectCount {
                    subject: row.get(0)?,
                    count: row.get::<_, i64>(1)? as usize,
                })
            })
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        let mut subjects = Vec::new();
        for row in rows {
            subjects.push(row.map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?);
        }
        Ok(subjects)
    }

    /// All entries for `subject`, oldest first. Unknown subjects yield an empty list.
    pub fn entries_for(&self, subject: &str) -> MnemoResult<Vec<MemoryEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT ts, subject, memory FROM \"{}\" WHERE subject = ?1 ORDER BY rowid",
                self.table
            ))
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(rusqlite::params![subject], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            let (ts, subject, text) =
                row.map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
            entries.push(MemoryEntry {
                timestamp: parse_timestamp(&ts)?,
                subject,
                text,
            });
        }
        Ok(entries)
    }

    /// Number of entries for `subject`.
    pub fn count(&self, subject: &str) -> MnemoResult<usize> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\" WHERE subject = ?1", self.table),
            rusqlite::params![subject],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n as usize)
        .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))
    }

    /// Remove the entry at 1-based `ordinal`, counted from the oldest.
    pub fn delete_entry(&self, subject: &str, ordinal: usize) -> MnemoResult<()> {
        let offset = ordinal
            .checked_sub(1)
            .and_then(|o| i64::try_from(o).ok())
            .ok_or_else(|| {
                MnemoError::NotFound(format!("no entry {ordinal} for subject '{subject}'"))
            })?;

        let conn = self.lock()?;
        let removed = conn
            .execute(
                &format!(
                    "DELETE FROM \"{t}\" WHERE rowid = (
                        SELECT rowid FROM \"{t}\" WHERE subject = ?1 ORDER BY rowid LIMIT 1 OFFSET ?2
                    )",
                    t = self.table
                ),
                rusqlite::params![subject, offset],
            )
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;

        if removed == 0 {
            return Err(MnemoError::NotFound(format!(
                "no entry {ordinal} for subject '{subject}'"
            )));
        }
        debug!(subject, ordinal, "Deleted memory entry");
        Ok(())
    }

    /// Remove every entry for `subject`. Returns how many were removed.
    pub fn delete_all(&self, subject: &str) -> MnemoResult<usize> {
        let conn = self.lock()?;
        let removed = conn
            .execute(
                &format!("DELETE FROM \"{}\" WHERE subject = ?1", self.table),
                rusqlite::params![subject],
            )
            .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
        debug!(subject, removed, "Deleted all memory entries");
        Ok(removed)
    }

    /// Release the connection.
    ///
    /// When other clones of this store are still alive the connection stays
    /// open until the last one is dropped.
    pub fn close(self) -> MnemoResult<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex
                    .into_inner()
                    .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
                conn.close()
                    .map_err(|(_, e)| MnemoError::StoreUnavailable(e.to_string()))?;
                debug!(table = %self.table, "Closed memory store");
                Ok(())
            }
            Err(_) => {
                debug!(table = %self.table, "Store still shared, leaving connection open");
                Ok(())
            }
        }
    }
}

/// RFC 3339 in UTC with microseconds; sorts lexically in time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp. Accepts RFC 3339 and the legacy naive
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` form, which is read as UTC.
fn parse_timestamp(raw: &str) -> MnemoResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| MnemoError::StoreUnavailable(format!("malformed timestamp '{raw}': {e}")))
}
