//! Durable key-value storage backing the session.
//!
//! Values are plain strings, matching the semantics of a browser's local storage:
//! the identity is stored as serialized JSON and parsed on restore.

pub mod file;
pub mod memory;

use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::StorageConfig;

/// Serialized current identity
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Bearer token attached to every guarded request
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Last accepted second-factor code
pub const SUPER_ADMIN_2FA_KEY: &str = "superAdmin2FA";

/// Every key owned by the session. All of them are cleared together.
pub const SESSION_KEYS: [&str; 3] = [CURRENT_USER_KEY, AUTH_TOKEN_KEY, SUPER_ADMIN_2FA_KEY];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HOME environment variable not set")]
    MissingHome,
}

/// Synchronous string store. Every write goes straight through; there is no batching.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Resolve the directory holding the session file, creating it if needed.
pub fn config_dir(config: &StorageConfig) -> Result<PathBuf, StorageError> {
    let dir = match &config.config_dir {
        Some(dir) => dir.clone(),
        None => {
            let home = std::env::var("HOME").map_err(|_| StorageError::MissingHome)?;
            PathBuf::from(home).join(".config").join("lms").join("console")
        }
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}
