use std::sync::Mutex;

use async_trait::async_trait;

use crate::repository::{StateStore, StorageError, StoredUser};

/// In-memory state store for tests and demo hosts.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    user: Mutex<Option<StoredUser>>,
    token: Mutex<Option<String>>,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(self, user: StoredUser) -> Self {
        *self.user.lock().expect("state store lock poisoned") = Some(user);
        self
    }

    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.lock().expect("state store lock poisoned") = Some(token.into());
        self
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load_user(&self) -> Result<Option<StoredUser>, StorageError> {
        Ok(self.user.lock().expect("state store lock poisoned").clone())
    }

    async fn save_user(&self, user: &StoredUser) -> Result<(), StorageError> {
        *self.user.lock().expect("state store lock poisoned") = Some(user.clone());
        Ok(())
    }

    async fn load_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().expect("state store lock poisoned").clone())
    }
}
