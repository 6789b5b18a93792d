use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Cardea";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Cardea/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Cardea")
}

/// Get the accounts directory
pub fn accounts_dir() -> PathBuf {
    app_data_dir().join("accounts")
}

/// Get the on-device vault database path
pub fn vault_db_path() -> PathBuf {
    app_data_dir().join("vault.db")
}

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "cardea=info"
}
