//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{AnswerError, PlanDraftError, TransactionDraftError};
use exam_core::request::PaperRequestError;

use crate::quiz::QuizPhase;

/// Errors returned by backend calls.
///
/// Variants that come from an HTTP error response carry the server's
/// `detail` text, or a generic message when the body had none.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("invalid api configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// The server-provided explanation, for variants that carry one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation(detail)
            | ApiError::NotFound(detail)
            | ApiError::Unauthorized(detail)
            | ApiError::Forbidden(detail) => Some(detail),
            ApiError::Network(_) | ApiError::InvalidResponse(_) | ApiError::Config(_) => None,
        }
    }

    /// Message for the user: the server detail when present, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ApiError::Config(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("answer at least one question")]
    NoAnswers,
    #[error("quiz submission already in progress")]
    AlreadySubmitting,
    #[error("operation not allowed while quiz is {0}")]
    InvalidPhase(QuizPhase),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl QuizError {
    /// True for rejections the user can fix by changing their answers.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            QuizError::NoAnswers | QuizError::Answer(_) | QuizError::Api(ApiError::Validation(_))
        )
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `GeneratorService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error(transparent)]
    Request(#[from] PaperRequestError),
    #[error("paper limit reached: {0}")]
    LimitReached(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AdminService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AdminError {
    #[error(transparent)]
    Plan(#[from] PlanDraftError),
    #[error(transparent)]
    Transaction(#[from] TransactionDraftError),
    #[error("no fields to update")]
    NothingToUpdate,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AdminError {
    /// True when the signed-in user is not an admin.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AdminError::Api(ApiError::Forbidden(_)))
    }
}

/// Errors emitted while downloading and storing files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DownloadError {
    #[error("download already in progress")]
    InProgress,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
