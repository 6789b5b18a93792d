use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::{KeyValueStore, StorageError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS vault_blobs (
    key        TEXT PRIMARY KEY,
    value      BLOB NOT NULL,
    updated_at TEXT NOT NULL
);";

/// SQLite-backed key-value store.
///
/// One table of opaque blobs; the caller encrypts before `set`, so the
/// database file never sees plaintext health data.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        configure_pragmas(&conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        configure_pragmas(&conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn configure_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockFailed)?;
        let mut stmt = conn.prepare("SELECT value FROM vault_blobs WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockFailed)?;
        conn.execute(
            "INSERT INTO vault_blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, chrono::Local::now().naive_local().to_string()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("absent").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("user/abc/history", b"blob").unwrap();
        assert_eq!(store.get("user/abc/history").unwrap().unwrap(), b"blob");
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("k", b"old").unwrap();
        store.set("k", b"new").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"new");
    }

    #[test]
    fn store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("k", b"durable").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"durable");
    }
}
