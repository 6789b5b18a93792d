use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::{CryptoError, EncryptedData, VaultKey};

use super::{KeyValueStore, StorageError};

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Undecryptable health data is surfaced, never silently treated as
    /// empty — a corrupted blob must reach the caller.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Encrypting record store over an opaque [`KeyValueStore`].
///
/// Owns the serialize → encrypt → set path on save and the mirror on load.
/// Keys are scoped per user identity so one user's records are never
/// reachable under another's key names.
pub struct Vault {
    store: Box<dyn KeyValueStore>,
    key: VaultKey,
}

impl Vault {
    pub fn new(store: Box<dyn KeyValueStore>, key: VaultKey) -> Self {
        Self { store, key }
    }

    fn scoped_key(user_id: &Uuid, record: &str) -> String {
        format!("user/{user_id}/{record}")
    }

    /// Serialize, encrypt, and persist one record for one user.
    pub fn save<T: Serialize>(
        &self,
        user_id: &Uuid,
        record: &str,
        value: &T,
    ) -> Result<(), VaultError> {
        let json =
            serde_json::to_vec(value).map_err(|e| VaultError::Serialization(e.to_string()))?;
        let encrypted = self.key.encrypt(&json)?;
        self.store
            .set(&Self::scoped_key(user_id, record), &encrypted.to_bytes())?;
        Ok(())
    }

    /// Load, decrypt, and deserialize one record for one user.
    ///
    /// A record that was never written is `Ok(None)`; a record that exists
    /// but cannot be decrypted or parsed is an error.
    pub fn load<T: DeserializeOwned>(
        &self,
        user_id: &Uuid,
        record: &str,
    ) -> Result<Option<T>, VaultError> {
        let Some(bytes) = self.store.get(&Self::scoped_key(user_id, record))? else {
            return Ok(None);
        };
        let encrypted = EncryptedData::from_bytes(&bytes)?;
        let json = self.key.decrypt(&encrypted)?;
        let value =
            serde_json::from_slice(&json).map_err(|e| VaultError::Serialization(e.to_string()))?;
        Ok(Some(value))
    }
}
