use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{PaperId, QuestionId};

/// Correct answer for one question, returned after an attempt is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    pub question_id: QuestionId,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Scored outcome of a single submission. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    #[serde(default)]
    pub answer_key: Vec<AnswerKeyEntry>,
}

impl AttemptResult {
    #[must_use]
    pub fn key_for(&self, question_id: &QuestionId) -> Option<&AnswerKeyEntry> {
        self.answer_key
            .iter()
            .find(|entry| &entry.question_id == question_id)
    }
}

/// A past attempt as listed on the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub id: String,
    pub paper_id: PaperId,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate statistics over all attempts of the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub total_attempts: u32,
    pub average_score: f64,
    pub highest_score: f64,
    #[serde(default)]
    pub recent_attempts: Vec<AttemptSummary>,
}
