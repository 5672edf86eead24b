mod ids;
mod mastery;
mod quiz;
mod recommendation;
mod topic;
mod user;

pub use ids::{TopicId, UserId};

pub use mastery::{
    MasteryBuckets, MasteryMap, WeakTopic, MASTERED_THRESHOLD, MAX_SCORE, WEAK_THRESHOLD,
};
pub use quiz::{QuizError, QuizSession, POINTS_PER_ANSWER, PRESENTED_QUESTIONS};
pub use recommendation::{Recommendation, DEFAULT_TOPIC};
pub use topic::{Question, Topic, TopicCatalog};
pub use user::{Theme, User, UserUpdate};
