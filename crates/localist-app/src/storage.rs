//! # Credential Storage
//!
//! The persisted session record is the only durable state this client owns.
//! It is read once at hydration and written only by login/register success
//! paths and cleared by logout.
//!
//! Token and user are stored as one record, so joint presence holds by
//! construction: there is no way to persist a token without its user.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use localist_api::UserRecord;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The persisted token/user pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Opaque bearer token
    pub token: String,
    /// The user the token belongs to
    pub user: UserRecord,
}

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("credential storage I/O: {0}")]
    Io(#[from] std::io::Error),
    /// The record could not be serialized
    #[error("credential record encoding: {0}")]
    Encoding(#[from] serde_json::Error),
    /// No per-user data directory could be resolved on this platform
    #[error("no user data directory available")]
    NoDataDir,
}

/// Persistent storage for the session credential record.
///
/// Implementations are synchronous; all callers run on the UI event loop and
/// the record is a few hundred bytes.
pub trait CredentialStore: Send + Sync {
    /// Read the stored record, if any. A missing or unreadable record is
    /// `Ok(None)`, not an error: hydration treats both as logged-out.
    fn load(&self) -> Result<Option<Credentials>, StorageError>;

    /// Persist the record, replacing any previous one.
    fn save(&self, credentials: &Credentials) -> Result<(), StorageError>;

    /// Remove the record. Removing an absent record succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// File-backed store
// =============================================================================

/// JSON-file-backed [`CredentialStore`].
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the record at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the record under the platform's per-user data directory
    /// (`<data_dir>/localist/session.json`).
    pub fn in_user_data_dir() -> Result<Self, StorageError> {
        let base = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(base.join("localist").join("session.json")))
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                // A corrupt record reads as logged-out rather than wedging
                // startup; the next login overwrites it.
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable credential record");
                Ok(None)
            }
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(credentials)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory [`CredentialStore`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a record, as if a prior session had saved it.
    #[must_use]
    pub fn with_record(credentials: Credentials) -> Self {
        Self {
            record: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StorageError> {
        Ok(self.record.lock().clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        *self.record.lock() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.record.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            token: "t1".into(),
            user: UserRecord {
                id: "u1".into(),
                email: "a@b.c".into(),
                name: "Ann".into(),
            },
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save(&credentials()).unwrap();
        assert_eq!(store.load().unwrap(), Some(credentials()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/deep/session.json"));
        store.save(&credentials()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileCredentialStore::new(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        store.save(&credentials()).unwrap();
        assert_eq!(store.load().unwrap(), Some(credentials()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
