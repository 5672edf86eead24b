use std::sync::Arc;

use serde_json::Value;

use mastery_core::model::{MasteryMap, Topic, TopicCatalog, User, DEFAULT_TOPIC};
use mastery_core::time::Clock;
use storage::repository::StateStore;

use crate::error::InvalidBaseUrl;
use crate::extras;
use crate::gateway::{ApiClient, HttpGateway};
use crate::progress::ProgressTracker;
use crate::quiz::QuizEngine;
use crate::recommend::RecommendationEngine;
use crate::render::DashboardRenderer;
use crate::seq::RequestSequencer;
use crate::session::SessionStore;
use crate::state::{lock, DashboardState, SharedState};
use crate::streak::StreakScheduler;

/// UI events forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// The "continue learning" call-to-action; starts the default topic.
    Continue,
    StartTopic { name: String },
    StartQuiz { topic: String },
    SelectAnswer { question: usize, option: usize },
    SubmitQuiz,
    DismissQuiz,
}

/// The dashboard engine: session state, remote reconciliation, mastery
/// tracking, recommendations, and the quiz lifecycle behind one façade.
///
/// Hosts construct one per session and inject it wherever a view needs it;
/// there is no ambient global instance.
pub struct LearningSystem {
    state: SharedState,
    api: Arc<dyn ApiClient>,
    renderer: Arc<dyn DashboardRenderer>,
    session: SessionStore,
    progress: Arc<ProgressTracker>,
    recommendations: RecommendationEngine,
    quiz: QuizEngine,
    clock: Clock,
}

impl LearningSystem {
    #[must_use]
    pub fn new(
        api: Arc<dyn ApiClient>,
        store: Arc<dyn StateStore>,
        renderer: Arc<dyn DashboardRenderer>,
    ) -> Self {
        Self::with_clock(api, store, renderer, Clock::default_clock())
    }

    #[must_use]
    pub fn with_clock(
        api: Arc<dyn ApiClient>,
        store: Arc<dyn StateStore>,
        renderer: Arc<dyn DashboardRenderer>,
        clock: Clock,
    ) -> Self {
        let state = DashboardState::shared(User::default_local());
        let seq = Arc::new(RequestSequencer::new());
        let progress = Arc::new(ProgressTracker::new(
            state.clone(),
            api.clone(),
            seq.clone(),
        ));
        let recommendations =
            RecommendationEngine::new(state.clone(), api.clone(), seq.clone());
        let quiz = QuizEngine::new(state.clone(), renderer.clone(), progress.clone());

        Self {
            state,
            api,
            renderer,
            session: SessionStore::new(store),
            progress,
            recommendations,
            quiz,
            clock,
        }
    }

    /// Convenience constructor: builds the HTTP gateway against `base_url`,
    /// attaching the persisted bearer token when one exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` when the base URL does not parse.
    pub async fn connect(
        base_url: &str,
        store: Arc<dyn StateStore>,
        renderer: Arc<dyn DashboardRenderer>,
    ) -> Result<Self, InvalidBaseUrl> {
        let token = SessionStore::new(store.clone()).load_token().await;
        let gateway = Arc::new(HttpGateway::new(base_url, token)?);
        Ok(Self::new(gateway, store, renderer))
    }

    /// Boots the dashboard: seed the user from persisted state, reconcile
    /// against the server, load the topic catalog, then render every
    /// section. Each step degrades independently to demo-mode data; init
    /// itself cannot fail.
    pub async fn init(&self) {
        let user = self.session.load_user().await;
        lock(&self.state).user = user;

        self.session.reconcile(self.api.as_ref(), &self.state).await;
        if lock(&self.state).user.theme().is_dark() {
            self.renderer.set_dark_mode(true);
        }

        self.load_topics().await;
        self.render_dashboard().await;
        self.render_dashboard_extras().await;
    }

    /// Replaces the catalog with `/topics`; anything but an array payload
    /// leaves an empty catalog.
    async fn load_topics(&self) {
        let topics: Vec<Topic> = match self.api.get("/topics").await {
            Ok(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            Ok(_) | Err(_) => Vec::new(),
        };
        lock(&self.state).catalog = TopicCatalog::new(topics);
    }

    /// Renders every dashboard section. Sections that depend only on local
    /// state land immediately; the recommendation panel follows when its
    /// remote call resolves (or falls back).
    pub async fn render_dashboard(&self) {
        {
            let guard = lock(&self.state);
            self.renderer.render_progress_chart(guard.mastery.buckets());
            self.renderer
                .render_weak_topics(&guard.mastery.weak_topics(&guard.catalog));
            self.renderer.render_streak(guard.user.streak());
        }

        if let Some(recommendation) = self.recommendations.refresh().await {
            self.renderer.render_recommendation(&recommendation);
        }
    }

    /// Renders the secondary dashboard slots: downloads, recent test
    /// scores, and the leaderboard.
    pub async fn render_dashboard_extras(&self) {
        let user_id = lock(&self.state).user.id();
        let api = self.api.as_ref();

        self.renderer
            .render_downloads(&extras::fetch_downloads(api, user_id).await);
        self.renderer
            .render_test_scores(&extras::fetch_test_scores(api, user_id).await);
        self.renderer
            .render_leaderboard(&extras::fetch_leaderboard(api).await);
    }

    /// Dispatches a UI event. A committed quiz submission re-renders the
    /// dashboard, mirroring the progress-then-re-render flow.
    pub async fn handle_action(&self, action: UserAction) {
        match action {
            UserAction::Continue => self.start_topic(DEFAULT_TOPIC),
            UserAction::StartTopic { name } => self.start_topic(&name),
            UserAction::StartQuiz { topic } => self.quiz.start_quiz(&topic),
            UserAction::SelectAnswer { question, option } => {
                self.quiz.select_answer(question, option);
            }
            UserAction::SubmitQuiz => {
                if self.quiz.submit_quiz().await {
                    self.render_dashboard().await;
                }
            }
            UserAction::DismissQuiz => self.quiz.dismiss(),
        }
    }

    /// Hands navigation to the presentation layer.
    pub fn start_topic(&self, topic_name: &str) {
        self.renderer.navigate_to_topic(topic_name);
    }

    /// The midnight streak-reset task, ready for the host to spawn.
    #[must_use]
    pub fn streak_scheduler(&self) -> StreakScheduler {
        StreakScheduler::new(self.state.clone(), self.renderer.clone(), self.clock)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        self.progress.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    #[must_use]
    pub fn recommendations(&self) -> &RecommendationEngine {
        &self.recommendations
    }

    /// Snapshot of the current user.
    #[must_use]
    pub fn user(&self) -> User {
        lock(&self.state).user.clone()
    }

    /// Snapshot of the current mastery map.
    #[must_use]
    pub fn mastery(&self) -> MasteryMap {
        lock(&self.state).mastery.clone()
    }

    /// Snapshot of the loaded topic catalog.
    #[must_use]
    pub fn catalog(&self) -> TopicCatalog {
        lock(&self.state).catalog.clone()
    }
}
