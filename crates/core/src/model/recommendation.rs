use serde::{Deserialize, Serialize};

use crate::model::mastery::WeakTopic;

/// The topic suggested when the mastery map has no weak entries at all.
pub const DEFAULT_TOPIC: &str = "Arrays";

const ESTIMATED_COMPLETION: &str = "2.5 hours";

/// What to study next. Transient: recomputed on every dashboard render and
/// never persisted. Extra wire fields (e.g. `priority`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub next_topic: String,
    pub daily_plan: Vec<String>,
    pub estimated_completion: String,
}

impl Recommendation {
    /// The deterministic rule-based recommendation used when the remote
    /// service is unavailable or returns a malformed payload.
    ///
    /// `weak` must be sorted weakest-first (see `MasteryMap::weak_topics`);
    /// an empty slice falls back to the literal default topic.
    #[must_use]
    pub fn fallback(weak: &[WeakTopic]) -> Self {
        let next = weak.first().map_or(DEFAULT_TOPIC, |w| w.label.as_str());
        Self {
            next_topic: next.to_string(),
            daily_plan: vec![
                format!("Day 1: {next} basics (45min)"),
                "Day 2: Practice problems (60min)".to_string(),
                "Day 3: Quiz + Review (30min)".to_string(),
            ],
            estimated_completion: ESTIMATED_COMPLETION.to_string(),
        }
    }
}
