use std::collections::BTreeMap;

use crate::model::ids::TopicId;
use crate::model::topic::TopicCatalog;

/// Scores below this mark a topic as weak.
pub const WEAK_THRESHOLD: u8 = 60;

/// Scores at or above this mark a topic as mastered.
pub const MASTERED_THRESHOLD: u8 = 80;

/// Upper bound for a mastery score.
pub const MAX_SCORE: u8 = 100;

/// Per-user mapping from topic to a 0-100 proficiency score.
///
/// Updated only by the progress tracker; replaced wholesale when the server
/// profile carries a `mastery_map`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteryMap {
    scores: BTreeMap<TopicId, u8>,
}

/// A weak topic resolved for display: catalog name (or raw id) plus score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakTopic {
    pub id: TopicId,
    pub label: String,
    pub score: u8,
}

/// Score counts per mastery band, ready for chart rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasteryBuckets {
    /// Scores in `[80, 100]`.
    pub mastered: usize,
    /// Scores in `[60, 80)`.
    pub good: usize,
    /// Scores in `[0, 60)`.
    pub needs_work: usize,
}

impl MasteryBuckets {
    #[must_use]
    pub fn total(&self) -> usize {
        self.mastered + self.good + self.needs_work
    }
}

impl MasteryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from wire entries. Keys are stringified topic ids (or
    /// names); values may be floats and are rounded and clamped to
    /// `[0, 100]`.
    #[must_use]
    pub fn from_wire(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut map = Self::new();
        for (key, score) in entries {
            map.insert(TopicId::new(key), clamp_score(score));
        }
        map
    }

    /// Records a score for a topic, clamped to `MAX_SCORE`.
    pub fn insert(&mut self, topic: TopicId, score: u8) {
        self.scores.insert(topic, score.min(MAX_SCORE));
    }

    #[must_use]
    pub fn get(&self, topic: &TopicId) -> Option<u8> {
        self.scores.get(topic).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, u8)> {
        self.scores.iter().map(|(id, score)| (id, *score))
    }

    /// All entries below `WEAK_THRESHOLD`, weakest first.
    ///
    /// The sort is stable, so equally-weak topics keep map iteration order.
    #[must_use]
    pub fn weak_entries(&self) -> Vec<(&TopicId, u8)> {
        let mut weak: Vec<_> = self
            .iter()
            .filter(|(_, score)| *score < WEAK_THRESHOLD)
            .collect();
        weak.sort_by_key(|(_, score)| *score);
        weak
    }

    /// Weak entries resolved against the catalog for display, weakest first.
    /// Unknown ids keep the raw id as their label.
    #[must_use]
    pub fn weak_topics(&self, catalog: &TopicCatalog) -> Vec<WeakTopic> {
        self.weak_entries()
            .into_iter()
            .map(|(id, score)| WeakTopic {
                id: id.clone(),
                label: catalog.label_for(id),
                score,
            })
            .collect()
    }

    /// Partitions all scores into the three mastery bands.
    #[must_use]
    pub fn buckets(&self) -> MasteryBuckets {
        let mut buckets = MasteryBuckets::default();
        for (_, score) in self.iter() {
            if score >= MASTERED_THRESHOLD {
                buckets.mastered += 1;
            } else if score >= WEAK_THRESHOLD {
                buckets.good += 1;
            } else {
                buckets.needs_work += 1;
            }
        }
        buckets
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    let rounded = raw.round().clamp(0.0, f64::from(MAX_SCORE));
    rounded as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::topic::Topic;

    fn catalog() -> TopicCatalog {
        TopicCatalog::new(vec![
            Topic {
                id: TopicId::from(1),
                name: "Arrays".into(),
                quiz: Vec::new(),
            },
            Topic {
                id: TopicId::from(2),
                name: "Strings".into(),
                quiz: Vec::new(),
            },
        ])
    }

    #[test]
    fn weak_entries_are_exactly_sub_sixty_ascending() {
        let mut map = MasteryMap::new();
        map.insert(TopicId::from(1), 40);
        map.insert(TopicId::from(2), 90);
        map.insert(TopicId::from(3), 59);
        map.insert(TopicId::from(4), 60);

        let weak = map.weak_entries();
        let scores: Vec<u8> = weak.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![40, 59]);
    }

    #[test]
    fn weak_topics_resolve_names_with_raw_id_fallback() {
        let mut map = MasteryMap::new();
        map.insert(TopicId::from(1), 40);
        map.insert(TopicId::from(7), 10);

        let weak = map.weak_topics(&catalog());
        assert_eq!(weak[0].label, "7");
        assert_eq!(weak[0].score, 10);
        assert_eq!(weak[1].label, "Arrays");
    }

    #[test]
    fn buckets_partition_all_scores() {
        let mut map = MasteryMap::new();
        for (id, score) in [(1, 100), (2, 80), (3, 79), (4, 60), (5, 59), (6, 0)] {
            map.insert(TopicId::from(id), score);
        }

        let buckets = map.buckets();
        assert_eq!(buckets.mastered, 2);
        assert_eq!(buckets.good, 2);
        assert_eq!(buckets.needs_work, 2);
        assert_eq!(buckets.total(), map.len());
    }

    #[test]
    fn insert_clamps_to_max_score() {
        let mut map = MasteryMap::new();
        map.insert(TopicId::from(1), 250);
        assert_eq!(map.get(&TopicId::from(1)), Some(MAX_SCORE));
    }

    #[test]
    fn from_wire_rounds_and_clamps_float_scores() {
        let map = MasteryMap::from_wire(vec![
            ("1".to_string(), 77.5),
            ("2".to_string(), -3.0),
            ("3".to_string(), 120.0),
        ]);
        assert_eq!(map.get(&TopicId::from(1)), Some(78));
        assert_eq!(map.get(&TopicId::from(2)), Some(0));
        assert_eq!(map.get(&TopicId::from(3)), Some(100));
    }
}
