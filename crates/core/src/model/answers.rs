use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::paper::Paper;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {0} is not part of this paper")]
    UnknownQuestion(QuestionId),
}

/// Respondent answers keyed by question id.
///
/// Grows only by upsert: writing the same key again replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the answer for `question_id`, returning the previous value.
    pub fn upsert(&mut self, question_id: QuestionId, value: impl Into<String>) -> Option<String> {
        self.0.insert(question_id, value.into())
    }

    /// Upserts an answer after checking the question belongs to `paper`.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::UnknownQuestion` if `paper` has no such question.
    pub fn record(
        &mut self,
        paper: &Paper,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), AnswerError> {
        if !paper.contains_question(&question_id) {
            return Err(AnswerError::UnknownQuestion(question_id));
        }
        self.upsert(question_id, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.0.contains_key(question_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }
}

impl<K: Into<QuestionId>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut answers = Self::new();
        for (id, value) in iter {
            answers.upsert(id.into(), value);
        }
        answers
    }
}
