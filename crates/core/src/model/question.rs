use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::QuestionId;

/// Values offered for a true/false question.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// The four question formats a generated paper may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq,
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::Mcq,
        QuestionKind::ShortAnswer,
        QuestionKind::TrueFalse,
        QuestionKind::Essay,
    ];

    /// Wire name used by the backend (`mcq`, `true_false`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::TrueFalse => "true_false",
            QuestionKind::ShortAnswer => "short_answer",
            QuestionKind::Essay => "essay",
        }
    }

    /// Badge text shown above a question, e.g. `TRUE FALSE`.
    #[must_use]
    pub fn badge(self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }

    /// Answers for these kinds are typed rather than picked from a list.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        matches!(self, QuestionKind::ShortAnswer | QuestionKind::Essay)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single question of a paper. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "type")]
    kind: QuestionKind,
    #[serde(rename = "question")]
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        prompt: impl Into<String>,
        marks: Option<u32>,
    ) -> Self {
        Self {
            id,
            kind,
            prompt: prompt.into(),
            marks,
            options: Vec::new(),
        }
    }

    /// Builds a multiple choice question with its ordered options.
    #[must_use]
    pub fn mcq(
        id: QuestionId,
        prompt: impl Into<String>,
        marks: Option<u32>,
        options: Vec<String>,
    ) -> Self {
        Self {
            options,
            ..Self::new(id, QuestionKind::Mcq, prompt, marks)
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn marks(&self) -> Option<u32> {
        self.marks
    }

    /// Ordered options. Always empty for anything but `mcq`.
    #[must_use]
    pub fn options(&self) -> &[String] {
        if self.kind == QuestionKind::Mcq {
            &self.options
        } else {
            &[]
        }
    }

    /// The values a respondent may pick, or `None` for free-text questions.
    #[must_use]
    pub fn choices(&self) -> Option<Vec<&str>> {
        match self.kind {
            QuestionKind::Mcq => Some(self.options.iter().map(String::as_str).collect()),
            QuestionKind::TrueFalse => Some(TRUE_FALSE_OPTIONS.to_vec()),
            QuestionKind::ShortAnswer | QuestionKind::Essay => None,
        }
    }
}
