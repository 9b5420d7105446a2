use serde::Deserialize;

use exam_core::model::Paper;
use exam_core::request::PaperRequest;

use crate::api::{ApiClient, Credentials};
use crate::error::{ApiError, GeneratorError};

#[derive(Deserialize)]
struct GenerateResponse {
    paper: Paper,
}

/// Requests new papers from the backend generator.
#[derive(Clone)]
pub struct GeneratorService {
    api: ApiClient,
    credentials: Credentials,
}

impl GeneratorService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// Validate `request` and ask the backend to generate a paper.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::Request` when the form is incomplete,
    /// `GeneratorError::LimitReached` when the backend refuses with 403, and
    /// `GeneratorError::Api` for other failures.
    pub async fn generate(&self, request: &PaperRequest) -> Result<Paper, GeneratorError> {
        request.validate()?;

        let response: Result<GenerateResponse, ApiError> = self
            .api
            .post_json(&["papers", "generate"], request, Some(&self.credentials))
            .await;
        match response {
            Ok(response) => {
                tracing::info!(
                    paper_id = %response.paper.id(),
                    questions = response.paper.question_count(),
                    "paper generated"
                );
                Ok(response.paper)
            }
            Err(ApiError::Forbidden(detail)) => {
                tracing::warn!(%detail, "paper limit reached");
                Err(GeneratorError::LimitReached(detail))
            }
            Err(err) => Err(err.into()),
        }
    }
}
