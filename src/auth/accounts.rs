use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::crypto::{generate_salt, CryptoError, EncryptedData, VaultKey, SALT_LENGTH};
use crate::storage::{KeyValueStore, Vault};

use super::{AuthError, IdentityProvider};

const VERIFICATION_PLAINTEXT: &[u8] = b"CARDEA_ACCOUNT_VERIFICATION_V1";

/// Account metadata (stored unencrypted — names are visible by design).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Unlocked account — holds the derived vault key in memory.
///
/// The key is zeroed when the session is dropped; dropping the session is
/// the logout primitive.
pub struct AccountSession {
    pub account_id: Uuid,
    pub account_name: String,
    key: VaultKey,
}

impl AccountSession {
    /// Build a vault over the given store, encrypting with this account's key.
    pub fn open_vault(&self, store: Box<dyn KeyValueStore>) -> Vault {
        Vault::new(store, VaultKey::from_bytes(*self.key.as_bytes()))
    }
}

impl IdentityProvider for AccountSession {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn current_user_id(&self) -> Option<Uuid> {
        Some(self.account_id)
    }
}

impl Drop for AccountSession {
    fn drop(&mut self) {
        tracing::info!(account_id = %self.account_id, "Account session closed, key zeroed");
    }
}

/// Create a new local account under `accounts_dir`.
///
/// Writes the salt and an encrypted verification token, then registers the
/// account in `accounts.json`. Returns the unlocked session.
pub fn create_account(
    accounts_dir: &Path,
    name: &str,
    password: &str,
) -> Result<AccountSession, AuthError> {
    let accounts = list_accounts(accounts_dir)?;
    if accounts.iter().any(|a| a.name == name) {
        return Err(AuthError::AccountExists(name.to_string()));
    }

    let id = Uuid::new_v4();
    let account_dir = account_dir(accounts_dir, &id);
    std::fs::create_dir_all(&account_dir)?;

    let salt = generate_salt();
    std::fs::write(account_dir.join("salt"), salt)?;

    let key = VaultKey::derive(password, &salt);
    let verification = key.encrypt(VERIFICATION_PLAINTEXT)?;
    std::fs::write(account_dir.join("verification.enc"), verification.to_bytes())?;

    save_account_info(
        accounts_dir,
        &AccountInfo {
            id,
            name: name.to_string(),
            created_at: chrono::Local::now().naive_local(),
        },
    )?;

    tracing::info!(account_id = %id, "Account created");

    Ok(AccountSession {
        account_id: id,
        account_name: name.to_string(),
        key,
    })
}

/// Unlock an existing account with its password.
pub fn unlock_account(
    accounts_dir: &Path,
    name: &str,
    password: &str,
) -> Result<AccountSession, AuthError> {
    let accounts = list_accounts(accounts_dir)?;
    let info = accounts
        .into_iter()
        .find(|a| a.name == name)
        .ok_or_else(|| AuthError::AccountNotFound(name.to_string()))?;

    let account_dir = account_dir(accounts_dir, &info.id);
    let salt = load_salt(&account_dir.join("salt"))?;
    let key = VaultKey::derive(password, &salt);

    let verification_bytes = std::fs::read(account_dir.join("verification.enc"))?;
    let verification = EncryptedData::from_bytes(&verification_bytes)?;
    if !verify_password(&key, &verification) {
        return Err(AuthError::WrongPassword);
    }

    tracing::info!(account_id = %info.id, "Account unlocked");

    Ok(AccountSession {
        account_id: info.id,
        account_name: info.name,
        key,
    })
}

/// List registered accounts (empty when none exist yet).
pub fn list_accounts(accounts_dir: &Path) -> Result<Vec<AccountInfo>, AuthError> {
    let path = accounts_dir.join("accounts.json");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|_| AuthError::CorruptedAccount)
}

fn account_dir(accounts_dir: &Path, id: &Uuid) -> PathBuf {
    accounts_dir.join(id.to_string())
}

fn load_salt(path: &Path) -> Result<[u8; SALT_LENGTH], AuthError> {
    let bytes = std::fs::read(path)?;
    bytes
        .try_into()
        .map_err(|_| AuthError::Crypto(CryptoError::CorruptedBlob))
}

fn verify_password(key: &VaultKey, stored: &EncryptedData) -> bool {
    match key.decrypt(stored) {
        Ok(plaintext) => plaintext.ct_eq(VERIFICATION_PLAINTEXT).into(),
        Err(_) => false,
    }
}

fn save_account_info(accounts_dir: &Path, info: &AccountInfo) -> Result<(), AuthError> {
    std::fs::create_dir_all(accounts_dir)?;
    let mut accounts = list_accounts(accounts_dir)?;
    accounts.push(info.clone());
    let json =
        serde_json::to_string_pretty(&accounts).map_err(|_| AuthError::CorruptedAccount)?;
    std::fs::write(accounts_dir.join("accounts.json"), json)?;
    Ok(())
}
