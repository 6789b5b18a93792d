pub mod memory;
pub mod sqlite;
pub mod vault;

pub use memory::*;
pub use sqlite::*;
pub use vault::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    LockFailed,

    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Durable on-device key-value store.
///
/// Values are opaque byte blobs — callers own serialization and encryption.
/// A missing key is `Ok(None)`, never an error; errors mean the backend
/// itself failed.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
