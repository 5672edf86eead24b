use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::topic::{Question, Topic};

/// How many questions of a topic's quiz are presented per session.
pub const PRESENTED_QUESTIONS: usize = 3;

/// Demo scoring: each answered question is worth a flat 25 points,
/// regardless of correctness. With three questions presented the maximum
/// reachable score is 75.
pub const POINTS_PER_ANSWER: u8 = 25;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question index {index} is out of range for this session")]
    QuestionOutOfRange { index: usize },

    #[error("option {option} is out of range for question {question}")]
    OptionOutOfRange { question: usize, option: usize },
}

/// Ephemeral state of one open quiz: the presented question subset and the
/// user's partial answer selection. Created when a quiz starts, discarded
/// on submit or dismissal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    topic_id: TopicId,
    topic_name: String,
    questions: Vec<Question>,
    answers: BTreeMap<usize, usize>,
}

impl QuizSession {
    /// Opens a session over the first `PRESENTED_QUESTIONS` of the topic's
    /// quiz.
    #[must_use]
    pub fn start(topic: &Topic) -> Self {
        Self {
            topic_id: topic.id.clone(),
            topic_name: topic.name.clone(),
            questions: topic.quiz.iter().take(PRESENTED_QUESTIONS).cloned().collect(),
            answers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    /// The presented question subset, in catalog order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The selected option for a presented question, if any.
    #[must_use]
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Records (or replaces) the selected option for one question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the question or option index is out of range
    /// for this session.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        let q = self
            .questions
            .get(question)
            .ok_or(QuizError::QuestionOutOfRange { index: question })?;
        if option >= q.options.len() {
            return Err(QuizError::OptionOutOfRange { question, option });
        }
        self.answers.insert(question, option);
        Ok(())
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// The demo score: answered count times `POINTS_PER_ANSWER`.
    #[must_use]
    pub fn score(&self) -> u8 {
        u8::try_from(self.answers.len() * usize::from(POINTS_PER_ANSWER)).unwrap_or(u8::MAX)
    }
}
