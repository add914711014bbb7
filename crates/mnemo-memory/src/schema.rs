//! SQLite schema bootstrap.
//!
//! Creates the entry table on first open. Reopening an existing database is a no-op.

use mnemo_types::error::{MnemoError, MnemoResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// The table already existed.
    Found,
    /// The table was created by this call.
    Created,
}

/// Check that `name` is a plain SQL identifier.
///
/// Table names cannot be bound as parameters, so anything outside
/// `[A-Za-z_][A-Za-z0-9_]*` is refused before it reaches a statement.
pub fn validate_table_name(name: &str) -> MnemoResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(MnemoError::Config(format!("invalid table name '{name}'")))
    }
}

/// Whether a table called `name` exists. SQLite table names are case-insensitive.
pub fn table_exists(conn: &Connection, name: &str) -> MnemoResult<bool> {
    conn.query_row(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        rusqlite::params![name],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))
}

/// Create the entry table (and its subject index) unless it already exists.
pub fn ensure_schema(conn: &Connection, table: &str) -> MnemoResult<SchemaState> {
    validate_table_name(table)?;

    if table_exists(conn, table)? {
        debug!(table, "Found memory table");
        return Ok(SchemaState::Found);
    }

    info!(table, "Memory table not found, creating it");
    conn.execute_batch(&format!(
        "
        CREATE TABLE IF NOT EXISTS \"{table}\" (
            ts TEXT NOT NULL,
            subject TEXT NOT NULL,
            memory TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS \"idx_{table}_subject\" ON \"{table}\"(subject);
        "
    ))
    .map_err(|e| MnemoError::StoreUnavailable(e.to_string()))?;
    Ok(SchemaState::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(ensure_schema(&conn, "memories").unwrap(), SchemaState::Created);
        assert!(table_exists(&conn, "memories").unwrap());

        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(memories)")
            .unwrap()
            .query_map([], |row| row.get(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert_eq!(columns, vec!["ts", "subject", "memory"]);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn, "memories").unwrap();
        assert_eq!(ensure_schema(&conn, "memories").unwrap(), SchemaState::Found);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'memories'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_schema_accepts_legacy_table() {
        // Layout written by the earlier tool: untyped-ish columns, no index
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE memories(ts timestamp, subject text, memory text)")
            .unwrap();
        assert_eq!(ensure_schema(&conn, "memories").unwrap(), SchemaState::Found);
    }

    #[test]
    fn test_schema_table_name_case_insensitive() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE Memories(ts timestamp, subject text, memory text)")
            .unwrap();
        assert_eq!(ensure_schema(&conn, "memories").unwrap(), SchemaState::Found);

        let indexes: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 0);
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("memories").is_ok());
        assert!(validate_table_name("_notes_2").is_ok());
        for bad in ["", "2fast", "memories; DROP TABLE x", "a-b", "t\"q"] {
            assert!(
                matches!(validate_table_name(bad), Err(MnemoError::Config(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_schema_rejects_bad_table_name() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            ensure_schema(&conn, "x; DROP TABLE y"),
            Err(MnemoError::Config(_))
        ));
    }
}
