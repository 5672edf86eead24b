#![forbid(unsafe_code)]

pub mod error;
pub mod extras;
pub mod gateway;
pub mod progress;
pub mod quiz;
pub mod recommend;
pub mod render;
pub mod seq;
pub mod session;
pub mod state;
pub mod streak;
pub mod system;

pub use mastery_core::Clock;

pub use error::{ApiError, InvalidBaseUrl};
pub use extras::{DownloadItem, LeaderboardEntry, TestScore};
pub use gateway::{ApiClient, ApiResult, HttpGateway};
pub use progress::ProgressTracker;
pub use quiz::QuizEngine;
pub use recommend::RecommendationEngine;
pub use render::{
    DashboardRenderer, NullRenderer, QuizView, RecordingRenderer, RenderEvent, ToastTone,
};
pub use seq::RequestSequencer;
pub use session::{SessionStore, UserProfile};
pub use state::{DashboardState, SharedState};
pub use streak::StreakScheduler;
pub use system::{LearningSystem, UserAction};
