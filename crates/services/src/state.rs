use std::sync::{Arc, Mutex, MutexGuard};

use mastery_core::model::{MasteryMap, TopicCatalog, User};

/// The session's mutable state, shared across the dashboard components.
///
/// Lock discipline: the mutex is never held across an await. Every handler
/// reads its gateway result fully, then takes the lock for a short,
/// synchronous mutation.
#[derive(Debug)]
pub struct DashboardState {
    pub user: User,
    pub catalog: TopicCatalog,
    pub mastery: MasteryMap,
}

impl DashboardState {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            catalog: TopicCatalog::default(),
            mastery: MasteryMap::new(),
        }
    }

    #[must_use]
    pub fn shared(user: User) -> SharedState {
        Arc::new(Mutex::new(Self::new(user)))
    }
}

pub type SharedState = Arc<Mutex<DashboardState>>;

/// Takes the state lock, recovering the guard from a poisoned mutex.
///
/// State mutations are plain field writes; a panic elsewhere cannot leave
/// the map half-updated, so continuing past poison is sound here.
pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, DashboardState> {
    state
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
