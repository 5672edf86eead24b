use std::sync::Mutex;

use mastery_core::model::{MasteryBuckets, Question, Recommendation, WeakTopic};

use crate::extras::{DownloadItem, LeaderboardEntry, TestScore};

/// Tone of a transient toast notification. Dismissal timing belongs to the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTone {
    Success,
    Warning,
    Info,
}

/// Ready-to-render view of an open quiz modal: topic title plus the
/// presented question subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub topic_name: String,
    pub questions: Vec<Question>,
}

/// The presentation seam.
///
/// The engine pushes typed view data through these hooks; markup, styling,
/// charting, and dismissal timers are the host's concern. Every hook
/// defaults to a no-op so a host can bind only the slots its page actually
/// has, the way the original bound only existing DOM anchors.
pub trait DashboardRenderer: Send + Sync {
    fn render_recommendation(&self, recommendation: &Recommendation) {
        let _ = recommendation;
    }

    fn render_progress_chart(&self, buckets: MasteryBuckets) {
        let _ = buckets;
    }

    fn render_weak_topics(&self, weak: &[WeakTopic]) {
        let _ = weak;
    }

    fn render_streak(&self, streak: u32) {
        let _ = streak;
    }

    fn render_downloads(&self, items: &[DownloadItem]) {
        let _ = items;
    }

    fn render_test_scores(&self, scores: &[TestScore]) {
        let _ = scores;
    }

    fn render_leaderboard(&self, entries: &[LeaderboardEntry]) {
        let _ = entries;
    }

    /// Dark mode is only ever switched on, mirroring the original client.
    fn set_dark_mode(&self, enabled: bool) {
        let _ = enabled;
    }

    fn show_quiz_modal(&self, quiz: &QuizView) {
        let _ = quiz;
    }

    fn close_quiz_modal(&self) {}

    fn show_toast(&self, message: &str, tone: ToastTone) {
        let _ = (message, tone);
    }

    fn navigate_to_topic(&self, topic_name: &str) {
        let _ = topic_name;
    }
}

/// Renderer that ignores everything. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl DashboardRenderer for NullRenderer {}

/// Everything the engine asked a renderer to show, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Recommendation(Recommendation),
    ProgressChart(MasteryBuckets),
    WeakTopics(Vec<WeakTopic>),
    Streak(u32),
    Downloads(Vec<DownloadItem>),
    TestScores(Vec<TestScore>),
    Leaderboard(Vec<LeaderboardEntry>),
    DarkMode(bool),
    QuizShown(QuizView),
    QuizClosed,
    Toast { message: String, tone: ToastTone },
    Navigate(String),
}

/// Renderer that records every hook invocation. The test suites assert on
/// it; an embedding host can also use it as a change feed.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: RenderEvent) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event);
    }

    /// Snapshot of all recorded events, in call order.
    #[must_use]
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recently rendered recommendation, if any.
    #[must_use]
    pub fn last_recommendation(&self) -> Option<Recommendation> {
        self.events().into_iter().rev().find_map(|e| match e {
            RenderEvent::Recommendation(rec) => Some(rec),
            _ => None,
        })
    }

    /// All toasts shown so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<(String, ToastTone)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RenderEvent::Toast { message, tone } => Some((message, tone)),
                _ => None,
            })
            .collect()
    }

    /// All streak badge updates, in order.
    #[must_use]
    pub fn streaks(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RenderEvent::Streak(streak) => Some(streak),
                _ => None,
            })
            .collect()
    }
}

impl DashboardRenderer for RecordingRenderer {
    fn render_recommendation(&self, recommendation: &Recommendation) {
        self.push(RenderEvent::Recommendation(recommendation.clone()));
    }

    fn render_progress_chart(&self, buckets: MasteryBuckets) {
        self.push(RenderEvent::ProgressChart(buckets));
    }

    fn render_weak_topics(&self, weak: &[WeakTopic]) {
        self.push(RenderEvent::WeakTopics(weak.to_vec()));
    }

    fn render_streak(&self, streak: u32) {
        self.push(RenderEvent::Streak(streak));
    }

    fn render_downloads(&self, items: &[DownloadItem]) {
        self.push(RenderEvent::Downloads(items.to_vec()));
    }

    fn render_test_scores(&self, scores: &[TestScore]) {
        self.push(RenderEvent::TestScores(scores.to_vec()));
    }

    fn render_leaderboard(&self, entries: &[LeaderboardEntry]) {
        self.push(RenderEvent::Leaderboard(entries.to_vec()));
    }

    fn set_dark_mode(&self, enabled: bool) {
        self.push(RenderEvent::DarkMode(enabled));
    }

    fn show_quiz_modal(&self, quiz: &QuizView) {
        self.push(RenderEvent::QuizShown(quiz.clone()));
    }

    fn close_quiz_modal(&self) {
        self.push(RenderEvent::QuizClosed);
    }

    fn show_toast(&self, message: &str, tone: ToastTone) {
        self.push(RenderEvent::Toast {
            message: message.to_string(),
            tone,
        });
    }

    fn navigate_to_topic(&self, topic_name: &str) {
        self.push(RenderEvent::Navigate(topic_name.to_string()));
    }
}
