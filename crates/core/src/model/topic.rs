use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;

/// A single multiple-choice question as served by the topic catalog.
///
/// The wire field for the prompt text is `q`. A `correct` index exists in
/// the stored quiz data but is not part of the client scoring path, so it
/// is not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One study topic with its attached quiz questions.
///
/// Immutable once loaded from the catalog for the session's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub quiz: Vec<Question>,
}

impl Topic {
    /// True when `key` is this topic's id or its exact name.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.id.as_str() == key || self.name == key
    }
}

/// The session's loaded set of topics, shared read-only across components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    #[must_use]
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    /// Looks a topic up by id or exact name.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.matches(key))
    }

    /// The catalog name for a topic id, if the id is known.
    #[must_use]
    pub fn name_for(&self, id: &TopicId) -> Option<&str> {
        self.topics
            .iter()
            .find(|t| t.id == *id)
            .map(|t| t.name.as_str())
    }

    /// Display label for a topic id: the catalog name, or the raw id when
    /// the id is stale or otherwise unknown.
    #[must_use]
    pub fn label_for(&self, id: &TopicId) -> String {
        self.name_for(id)
            .map_or_else(|| id.as_str().to_string(), str::to_string)
    }
}
