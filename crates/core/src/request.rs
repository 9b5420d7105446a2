use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, CatalogError};
use crate::model::QuestionKind;

pub const DEFAULT_TOTAL_MARKS: u32 = 100;
pub const DEFAULT_DURATION_MINUTES: u32 = 180;
pub const DEFAULT_INSTRUCTIONS: &str = "• Read all questions carefully\n• Answer all questions\n• Write your answers in the space provided\n• All questions carry equal marks unless specified";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaperRequestError {
    #[error("please fill all required fields: {0}")]
    MissingField(&'static str),

    #[error("please add at least one question")]
    NoQuestions,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// How many questions of each kind to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCounts {
    pub mcq: u32,
    pub short_answer: u32,
    pub true_false: u32,
    pub essay: u32,
}

impl QuestionCounts {
    #[must_use]
    pub fn get(&self, kind: QuestionKind) -> u32 {
        match kind {
            QuestionKind::Mcq => self.mcq,
            QuestionKind::ShortAnswer => self.short_answer,
            QuestionKind::TrueFalse => self.true_false,
            QuestionKind::Essay => self.essay,
        }
    }

    pub fn set(&mut self, kind: QuestionKind, count: u32) {
        match kind {
            QuestionKind::Mcq => self.mcq = count,
            QuestionKind::ShortAnswer => self.short_answer = count,
            QuestionKind::TrueFalse => self.true_false = count,
            QuestionKind::Essay => self.essay = count,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.mcq
            .saturating_add(self.short_answer)
            .saturating_add(self.true_false)
            .saturating_add(self.essay)
    }
}

/// Body of a paper generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRequest {
    pub exam_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    pub subject: String,
    pub topics: Vec<String>,
    pub question_types: QuestionCounts,
    pub paper_format: String,
    pub total_marks: u32,
    pub duration_minutes: u32,
    pub paper_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_marks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_allowed: Option<String>,
}

impl Default for PaperRequest {
    fn default() -> Self {
        Self {
            exam_type: String::new(),
            stream: None,
            subject: String::new(),
            topics: Vec::new(),
            question_types: QuestionCounts::default(),
            paper_format: "standard".to_string(),
            total_marks: DEFAULT_TOTAL_MARKS,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            paper_title: String::new(),
            instructions: Some(DEFAULT_INSTRUCTIONS.to_string()),
            language: catalog::DEFAULT_LANGUAGE.to_string(),
            school_name: None,
            exam_date: None,
            max_marks: None,
            time_allowed: None,
        }
    }
}

impl PaperRequest {
    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns `PaperRequestError::MissingField` when exam type, subject or
    /// title is blank, `PaperRequestError::Catalog` for an unknown exam type or
    /// a missing stream, and `PaperRequestError::NoQuestions` when every count
    /// is zero.
    pub fn validate(&self) -> Result<(), PaperRequestError> {
        if self.exam_type.trim().is_empty() {
            return Err(PaperRequestError::MissingField("exam type"));
        }
        if self.subject.trim().is_empty() {
            return Err(PaperRequestError::MissingField("subject"));
        }
        if self.paper_title.trim().is_empty() {
            return Err(PaperRequestError::MissingField("paper title"));
        }
        catalog::check_selection(&self.exam_type, self.stream.as_deref())?;
        if self.question_types.total() == 0 {
            return Err(PaperRequestError::NoQuestions);
        }
        Ok(())
    }
}
