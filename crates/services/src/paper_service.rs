use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use exam_core::model::{AnswerMap, AttemptResult, Paper, PaperId};

use crate::api::{ApiClient, Credentials};
use crate::error::ApiError;

/// Backend operations a practice attempt depends on.
#[async_trait]
pub trait PaperService: Send + Sync {
    /// Fetch a paper by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id, `ApiError::Network` for
    /// transport failures.
    async fn fetch_paper(&self, paper_id: &PaperId) -> Result<Paper, ApiError>;

    /// Submit answers for scoring.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the answers,
    /// `ApiError::Network` for transport failures.
    async fn submit_answers(
        &self,
        paper_id: &PaperId,
        answers: &AnswerMap,
    ) -> Result<AttemptResult, ApiError>;
}

/// `PaperService` backed by the exam HTTP API.
#[derive(Clone)]
pub struct HttpPaperService {
    api: ApiClient,
    credentials: Credentials,
}

impl HttpPaperService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    paper_id: &'a PaperId,
    answers: &'a AnswerMap,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    result: AttemptResult,
}

#[async_trait]
impl PaperService for HttpPaperService {
    async fn fetch_paper(&self, paper_id: &PaperId) -> Result<Paper, ApiError> {
        self.api
            .get_json(&["papers", paper_id.as_str()], Some(&self.credentials))
            .await
    }

    async fn submit_answers(
        &self,
        paper_id: &PaperId,
        answers: &AnswerMap,
    ) -> Result<AttemptResult, ApiError> {
        let body = SubmitRequest { paper_id, answers };
        let response: SubmitResponse = self
            .api
            .post_json(&["quiz", "submit"], &body, Some(&self.credentials))
            .await?;
        Ok(response.result)
    }
}
