//! Durable credential storage. The token and role are persisted as one JSON
//! record so they are always written, read and cleared together; a reader
//! never observes one without the other.

use super::{session::Session, types::Role};
use crate::app_lib::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::{debug, warn};
use ulid::Ulid;

/// On-disk shape of the session file. Both fields are optional on read so a
/// partial or hand-edited record can be detected and rejected.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CredentialRecord {
    fn new(token: &SecretString, role: Role) -> Self {
        Self {
            token: Some(token.expose_secret().to_string()),
            role: Some(role.as_str().to_string()),
        }
    }

    #[must_use]
    pub fn to_session(&self) -> Session {
        Session::from_parts(self.token.as_deref(), self.role.as_deref())
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialRecord")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("role", &self.role)
            .finish()
    }
}

/// Persistence for the signed-in credential.
pub trait CredentialStore: Send + Sync {
    /// Reads the persisted session; partial or unknown records restore as
    /// [`Session::Anonymous`].
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn load(&self) -> Result<Session, AppError>;

    /// Persists token and role in a single write.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the record cannot be written.
    fn save(&self, token: &SecretString, role: Role) -> Result<(), AppError>;

    /// Removes the record. Clearing an empty store succeeds.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the record exists but cannot be removed.
    fn clear(&self) -> Result<(), AppError>;
}

/// Session file on disk, replaced atomically via a temp file and rename.
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Ulid::new()));
        self.path.with_file_name(name)
    }

    fn write_record(&self, record: &CredentialRecord) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| storage_error("create", parent, &err))?;
        }

        let payload = serde_json::to_vec_pretty(record)
            .map_err(|err| AppError::Serialization(format!("Failed to encode session: {err}")))?;

        let temp = self.temp_path();
        let result = write_private(&temp, &payload)
            .and_then(|()| fs::rename(&temp, &self.path))
            .map_err(|err| storage_error("write", &self.path, &err));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Session, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session file");
                return Ok(Session::Anonymous);
            }
            Err(err) => return Err(storage_error("read", &self.path, &err)),
        };

        match serde_json::from_str::<CredentialRecord>(&contents) {
            Ok(record) => {
                let session = record.to_session();
                if !session.is_authenticated() {
                    warn!(path = %self.path.display(), "incomplete session record; signed out");
                }
                Ok(session)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable session record; signed out"
                );
                Ok(Session::Anonymous)
            }
        }
    }

    fn save(&self, token: &SecretString, role: Role) -> Result<(), AppError> {
        self.write_record(&CredentialRecord::new(token, role))
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error("remove", &self.path, &err)),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> AppError {
    AppError::Storage(format!(
        "Failed to {action} session file {}: {err}",
        path.display()
    ))
}

/// In-process store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Mutex<Option<CredentialRecord>>,
}

impl MemoryCredentialStore {
    /// Seeds the store with a raw record, including partial ones.
    #[must_use]
    pub fn with_record(record: CredentialRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    /// Snapshot of what is currently persisted.
    #[must_use]
    pub fn record(&self) -> Option<CredentialRecord> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Session, AppError> {
        Ok(self
            .record()
            .map_or(Session::Anonymous, |record| record.to_session()))
    }

    fn save(&self, token: &SecretString, role: Role) -> Result<(), AppError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(CredentialRecord::new(token, role));
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
