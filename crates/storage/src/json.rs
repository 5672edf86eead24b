use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::repository::{StateStore, StorageError, StoredUser};

/// On-disk layout of the client-state file: the same two keys the browser
/// client kept in localStorage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ClientStateFile {
    #[serde(default)]
    user: Option<StoredUser>,
    #[serde(default)]
    token: Option<String>,
}

/// State store backed by a single JSON file.
///
/// A missing file means "no persisted state"; a file that exists but does
/// not decode is a `Serialization` error, which callers degrade to the
/// default identity.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(&self) -> Result<ClientStateFile, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(ClientStateFile::default());
            }
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };
        serde_json::from_slice(&raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn write_state(&self, state: &ClientStateFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| StorageError::Io(err.to_string()))?;
            }
        }
        let raw = serde_json::to_vec_pretty(state)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load_user(&self) -> Result<Option<StoredUser>, StorageError> {
        Ok(self.read_state().await?.user)
    }

    async fn save_user(&self, user: &StoredUser) -> Result<(), StorageError> {
        let mut state = self.read_state().await.unwrap_or_default();
        state.user = Some(user.clone());
        self.write_state(&state).await
    }

    async fn load_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read_state().await?.token)
    }
}
