use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{PaperId, QuestionId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaperError {
    #[error("paper has no questions")]
    NoQuestions,

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),
}

//
// ─── PAPER ─────────────────────────────────────────────────────────────────────
//

/// A generated question paper, fetched once per practice attempt.
///
/// Any answer key shipped alongside the paper is dropped on deserialization;
/// answers only become visible through an attempt result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaperRecord", into = "PaperRecord")]
pub struct Paper {
    id: PaperId,
    title: String,
    exam_type: String,
    subject: String,
    topics: Vec<String>,
    language: Option<String>,
    instructions: Option<String>,
    questions: Vec<Question>,
    total_marks: u32,
    duration_minutes: u32,
    created_at: Option<DateTime<Utc>>,
}

/// Wire representation of a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaperRecord {
    id: PaperId,
    paper_title: String,
    exam_type: String,
    subject: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    questions: Vec<Question>,
    total_marks: u32,
    duration_minutes: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PaperRecord> for Paper {
    type Error = PaperError;

    fn try_from(record: PaperRecord) -> Result<Self, Self::Error> {
        let mut paper = Paper::new(
            record.id,
            record.paper_title,
            record.exam_type,
            record.subject,
            record.questions,
            record.total_marks,
            record.duration_minutes,
        )?;
        paper.topics = record.topics;
        paper.language = record.language;
        paper.instructions = record.instructions;
        paper.created_at = record.created_at;
        Ok(paper)
    }
}

impl From<Paper> for PaperRecord {
    fn from(paper: Paper) -> Self {
        Self {
            id: paper.id,
            paper_title: paper.title,
            exam_type: paper.exam_type,
            subject: paper.subject,
            topics: paper.topics,
            language: paper.language,
            instructions: paper.instructions,
            questions: paper.questions,
            total_marks: paper.total_marks,
            duration_minutes: paper.duration_minutes,
            created_at: paper.created_at,
        }
    }
}

impl Paper {
    /// Builds a paper from its parts.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::NoQuestions` for an empty question list and
    /// `PaperError::DuplicateQuestion` when two questions share an id.
    pub fn new(
        id: PaperId,
        title: impl Into<String>,
        exam_type: impl Into<String>,
        subject: impl Into<String>,
        questions: Vec<Question>,
        total_marks: u32,
        duration_minutes: u32,
    ) -> Result<Self, PaperError> {
        if questions.is_empty() {
            return Err(PaperError::NoQuestions);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(PaperError::DuplicateQuestion(question.id().clone()));
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            exam_type: exam_type.into(),
            subject: subject.into(),
            topics: Vec::new(),
            language: None,
            instructions: None,
            questions,
            total_marks,
            duration_minutes,
            created_at: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &PaperId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn exam_type(&self) -> &str {
        &self.exam_type
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn contains_question(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|question| question.id() == id)
    }

    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

//
// ─── LISTING ───────────────────────────────────────────────────────────────────
//

/// A paper as it appears in the user's library (questions omitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
    pub id: PaperId,
    #[serde(rename = "paper_title")]
    pub title: String,
    pub exam_type: String,
    pub subject: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub total_marks: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
