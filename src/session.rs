//! Client-side session storage
//!
//! All persisted client state (session token plus identity keys) lives in a
//! small key/value store reached only through the [`SessionStore`] seam, so
//! tests can substitute an in-memory or mock store.
//!
//! ## Table of Contents
//! - **keys**: the fixed set of persisted entries
//! - **SessionStore**: the storage seam
//! - **MemorySessionStore**: process-local store
//! - **FileSessionStore**: JSON document under the platform config dir

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

/// Keys for the persisted session entries.
pub mod keys {
    /// Bearer token from the last successful login
    pub const TOKEN: &str = "session_token";
    /// Authenticated user id
    pub const USER_ID: &str = "user_id";
    /// Authenticated user email
    pub const EMAIL: &str = "user_email";
    /// Authenticated user display name
    pub const DISPLAY_NAME: &str = "user_display_name";
    /// RFC 3339 timestamp of the last login
    pub const LAST_LOGIN: &str = "last_login";
}

/// Every key cleared together on logout or an unauthorized response.
pub const SESSION_KEYS: &[&str] = &[
    keys::TOKEN,
    keys::USER_ID,
    keys::EMAIL,
    keys::DISPLAY_NAME,
    keys::LAST_LOGIN,
];

/// Storage backend failure.
///
/// Store errors never propagate past [`crate::TokenManager`]; they are logged
/// and treated as absent data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unavailable or rejected the operation
    #[error("storage backend error: {0}")]
    Backend(String),

    /// IO error from a file-backed store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Store document could not be read or written
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value seam over the ambient client-side store.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and non-persistent embeddings.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// File-backed store holding one JSON document.
///
/// Reads and writes go through a process-local mutex; each operation loads
/// and rewrites the whole document, which stays small (five keys).
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store under the platform config directory
    /// (`<config_dir>/pallicare/session.json`), or `None` when the platform
    /// exposes no config directory.
    pub fn new() -> Option<Self> {
        let dir = dirs::config_dir()?.join("pallicare");
        Some(Self::with_path(dir.join("session.json")))
    }

    /// Store at an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
