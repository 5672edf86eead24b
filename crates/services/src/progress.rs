use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use mastery_core::model::{MasteryBuckets, TopicId, WeakTopic};

use crate::gateway::ApiClient;
use crate::seq::RequestSequencer;
use crate::state::{lock, SharedState};

/// Owns the mastery map: posts quiz scores, commits them on server
/// confirmation, and derives the weak-topic and bucket views.
pub struct ProgressTracker {
    state: SharedState,
    api: Arc<dyn ApiClient>,
    seq: Arc<RequestSequencer>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(state: SharedState, api: Arc<dyn ApiClient>, seq: Arc<RequestSequencer>) -> Self {
        Self { state, api, seq }
    }

    /// Posts a quiz score to `/progress/{userId}/{topicId}`.
    ///
    /// The score is committed into the mastery map (and XP awarded) only
    /// on an explicit `{"success": true}` response that is still the latest
    /// for this topic. A gateway failure, `{"success": false}`, or a stale
    /// (superseded) response leaves state unchanged; there is no optimistic
    /// update ahead of server confirmation.
    ///
    /// Returns `true` when the score was committed.
    pub async fn update_progress(&self, topic_id: &TopicId, score: u8) -> bool {
        let user_id = lock(&self.state).user.id();
        let key = format!("progress/{topic_id}");
        let ticket = self.seq.issue(&key);

        let confirmed = match self
            .api
            .post(&format!("/progress/{user_id}/{topic_id}"), &json!({ "score": score }))
            .await
        {
            Ok(payload) => payload
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(_) => false,
        };
        if !confirmed {
            debug!(%topic_id, score, "progress update not confirmed, keeping local state");
            return false;
        }
        if !self.seq.is_current(&key, ticket) {
            debug!(%topic_id, "discarding stale progress response");
            return false;
        }

        let mut guard = lock(&self.state);
        guard.mastery.insert(topic_id.clone(), score);
        guard.user.award_xp(score);
        true
    }

    /// Weak topics resolved for display, weakest first.
    #[must_use]
    pub fn weak_topics(&self) -> Vec<WeakTopic> {
        let guard = lock(&self.state);
        guard.mastery.weak_topics(&guard.catalog)
    }

    /// Mastery band counts for the progress chart.
    #[must_use]
    pub fn mastery_buckets(&self) -> MasteryBuckets {
        lock(&self.state).mastery.buckets()
    }
}
