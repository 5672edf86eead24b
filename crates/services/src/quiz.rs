use std::sync::{Arc, Mutex};

use tracing::debug;

use mastery_core::model::QuizSession;

use crate::progress::ProgressTracker;
use crate::render::{DashboardRenderer, QuizView, ToastTone};
use crate::state::{lock, SharedState};

/// Scores above this use success styling for the result toast.
const SUCCESS_TOAST_THRESHOLD: u8 = 70;

/// Drives the Idle → Presenting → Submitted quiz lifecycle.
///
/// Everything here fails soft: unknown topics do not open a modal, answers
/// with no open session are dropped, and a second submit is a no-op.
pub struct QuizEngine {
    state: SharedState,
    renderer: Arc<dyn DashboardRenderer>,
    progress: Arc<ProgressTracker>,
    active: Mutex<Option<QuizSession>>,
}

impl QuizEngine {
    #[must_use]
    pub fn new(
        state: SharedState,
        renderer: Arc<dyn DashboardRenderer>,
        progress: Arc<ProgressTracker>,
    ) -> Self {
        Self {
            state,
            renderer,
            progress,
            active: Mutex::new(None),
        }
    }

    /// Opens the quiz modal for a topic, looked up by id or exact name.
    /// Unknown keys silently do nothing.
    pub fn start_quiz(&self, key: &str) {
        let session = {
            let guard = lock(&self.state);
            guard.catalog.resolve(key).map(QuizSession::start)
        };
        let Some(session) = session else {
            debug!(key, "quiz topic not found, ignoring");
            return;
        };

        let view = QuizView {
            topic_name: session.topic_name().to_string(),
            questions: session.questions().to_vec(),
        };
        *self.active_guard() = Some(session);
        self.renderer.show_quiz_modal(&view);
    }

    /// Records a selection in the open session. Selections with no open
    /// session, or with out-of-range indices, are dropped.
    pub fn select_answer(&self, question: usize, option: usize) {
        let mut active = self.active_guard();
        let Some(session) = active.as_mut() else {
            return;
        };
        if let Err(err) = session.select(question, option) {
            debug!(error = %err, "ignoring quiz selection");
        }
    }

    /// Scores and closes the open session: close the modal, post the score,
    /// toast the result. Returns `true` when the score was committed to the
    /// mastery map. Submitting with no open session is a no-op.
    pub async fn submit_quiz(&self) -> bool {
        let Some(session) = self.active_guard().take() else {
            return false;
        };
        let score = session.score();
        self.renderer.close_quiz_modal();

        let committed = self
            .progress
            .update_progress(session.topic_id(), score)
            .await;

        let tone = if score > SUCCESS_TOAST_THRESHOLD {
            ToastTone::Success
        } else {
            ToastTone::Warning
        };
        self.renderer.show_toast(
            &format!("Great job! {score}% on {}", session.topic_name()),
            tone,
        );
        committed
    }

    /// Dismisses the open quiz without scoring it.
    pub fn dismiss(&self) {
        if self.active_guard().take().is_some() {
            self.renderer.close_quiz_modal();
        }
    }

    /// True while a quiz modal is presenting.
    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.active_guard().is_some()
    }

    fn active_guard(&self) -> std::sync::MutexGuard<'_, Option<QuizSession>> {
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
