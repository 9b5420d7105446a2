use serde::Deserialize;

use exam_core::model::{AttemptSummary, QuizStats};

use crate::api::{ApiClient, Credentials};
use crate::error::ApiError;

#[derive(Deserialize)]
struct AttemptsResponse {
    attempts: Vec<AttemptSummary>,
}

/// Past attempts and aggregate statistics of the signed-in user.
#[derive(Clone)]
pub struct ResultsService {
    api: ApiClient,
    credentials: Credentials,
}

impl ResultsService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn attempts(&self) -> Result<Vec<AttemptSummary>, ApiError> {
        let response: AttemptsResponse = self
            .api
            .get_json(&["quiz", "attempts"], Some(&self.credentials))
            .await?;
        Ok(response.attempts)
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn stats(&self) -> Result<QuizStats, ApiError> {
        self.api
            .get_json(&["quiz", "stats"], Some(&self.credentials))
            .await
    }
}
