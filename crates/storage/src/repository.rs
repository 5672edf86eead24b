use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mastery_core::model::{User, UserId};

/// Errors surfaced by client-state stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the local `user` record.
///
/// Every field is optional so partially written or legacy records still
/// load; whether a record is usable is the session store's call, not the
/// storage layer's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub streak: Option<u32>,
    #[serde(default)]
    pub xp: Option<u64>,
}

impl StoredUser {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id().value()),
            name: Some(user.name().to_owned()),
            streak: Some(user.streak()),
            xp: Some(user.xp()),
        }
    }

    /// Converts the record into a domain user.
    ///
    /// Returns `None` when the required identity fields (`id`, `name`) are
    /// missing; missing counters default to zero.
    #[must_use]
    pub fn into_user(self) -> Option<User> {
        let id = self.id?;
        let name = self.name?;
        Some(User::new(
            UserId::new(id),
            name,
            self.streak.unwrap_or(0),
            self.xp.unwrap_or(0),
        ))
    }
}

/// Contract for persisted client state, the browser-localStorage analog:
/// one `user` record and one bearer `token` string.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the persisted user record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be read or decoded.
    async fn load_user(&self) -> Result<Option<StoredUser>, StorageError>;

    /// Persists the user record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be written.
    async fn save_user(&self, user: &StoredUser) -> Result<(), StorageError>;

    /// Reads the persisted bearer token, if one exists. Absence of a token
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be read or decoded.
    async fn load_token(&self) -> Result<Option<String>, StorageError>;
}
