use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use mastery_core::model::{MasteryMap, Theme, User, UserId, UserUpdate};
use storage::repository::StateStore;

use crate::gateway::ApiClient;
use crate::state::{lock, SharedState};

/// Server profile for `/user/{id}`.
///
/// Every field is optional: the server may return partial data, and only
/// the fields it actually sent overwrite local state. A payload without a
/// valid `id` (including `{"error": ...}` bodies) merges nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub streak: Option<u32>,
    #[serde(default)]
    pub xp: Option<u64>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub mastery_map: Option<BTreeMap<String, f64>>,
}

impl UserProfile {
    fn into_update(self) -> UserUpdate {
        UserUpdate {
            id: self.id.map(UserId::new),
            name: self.name,
            streak: self.streak,
            xp: self.xp,
            theme: self.theme.as_deref().map(Theme::from_wire),
        }
    }
}

/// Seeds the session user from persisted state and reconciles it against
/// the server. Loading never fails: anything short of a complete local
/// record yields the fixed default identity.
pub struct SessionStore {
    store: Arc<dyn StateStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Loads the persisted user, or the default identity when the record is
    /// missing, unreadable, or incomplete.
    pub async fn load_user(&self) -> User {
        match self.store.load_user().await {
            Ok(Some(record)) => record.into_user().unwrap_or_else(|| {
                debug!("persisted user record is incomplete, using default identity");
                User::default_local()
            }),
            Ok(None) => User::default_local(),
            Err(err) => {
                warn!(error = %err, "could not read persisted user, using default identity");
                User::default_local()
            }
        }
    }

    /// The persisted bearer token, if any. Absence is not an error.
    pub async fn load_token(&self) -> Option<String> {
        match self.store.load_token().await {
            Ok(token) => token,
            Err(err) => {
                debug!(error = %err, "could not read persisted token");
                None
            }
        }
    }

    /// Reconciles local state against `GET /user/{id}`.
    ///
    /// A payload carrying a valid `id` merges server fields over the local
    /// user and replaces the mastery map with the fetched one (empty when
    /// the server sent none). A gateway failure leaves the locally seeded
    /// state untouched: demo mode, not an error.
    pub async fn reconcile(&self, api: &dyn ApiClient, state: &SharedState) {
        let user_id = lock(state).user.id();
        let Ok(payload) = api.get(&format!("/user/{user_id}")).await else {
            return;
        };
        let Ok(mut profile) = serde_json::from_value::<UserProfile>(payload) else {
            debug!("user profile payload had an unexpected shape, keeping local seed");
            return;
        };
        if profile.id.is_none() {
            debug!("user profile carried no id, keeping local seed");
            return;
        }

        let mastery = profile
            .mastery_map
            .take()
            .map(MasteryMap::from_wire)
            .unwrap_or_default();

        let mut guard = lock(state);
        guard.mastery = mastery;
        guard.user.merge(profile.into_update());
    }
}
