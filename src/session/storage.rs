//! Durable storage for the operator session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::domain::session::Session;

/// Fixed key the session record is stored under.
pub const SESSION_STORAGE_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum SessionStorageError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type SessionStorageResult<T> = Result<T, SessionStorageError>;

/// Backend persisting a single session record across restarts.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> SessionStorageResult<Option<Session>>;
    fn save(&self, session: &Session) -> SessionStorageResult<()>;
    fn clear(&self) -> SessionStorageResult<()>;
}

/// Stores the session as `<dir>/user.json`.
#[derive(Clone, Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> SessionStorageResult<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, session: &Session) -> SessionStorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(session)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> SessionStorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the serialized record in memory. Used by tests and embedders.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    record: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    /// Returns the raw persisted record, if any.
    pub fn raw(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> SessionStorageResult<Option<Session>> {
        match self.raw() {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> SessionStorageResult<()> {
        let raw = serde_json::to_string(session)?;
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }

    fn clear(&self) -> SessionStorageResult<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::for_operator("op@example.com", "abc".to_string())
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested"));

        assert!(storage.load().unwrap().is_none());

        storage.save(&session()).unwrap();
        assert!(storage.path().ends_with("user.json"));
        assert_eq!(storage.load().unwrap(), Some(session()));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        storage.clear().unwrap();
    }

    #[test]
    fn file_storage_persists_expected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());
        storage.save(&session()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();

        assert_eq!(
            raw,
            serde_json::json!({
                "id": 1,
                "email": "op@example.com",
                "name": "Administrator",
                "token": "abc"
            })
        );
    }

    #[test]
    fn file_storage_reports_malformed_records() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());
        fs::write(storage.path(), "{not json").unwrap();

        assert!(matches!(
            storage.load(),
            Err(SessionStorageError::Malformed(_))
        ));
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemorySessionStorage::default();

        storage.save(&session()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(session()));

        storage.clear().unwrap();
        assert!(storage.raw().is_none());
    }
}
