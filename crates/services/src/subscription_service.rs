use serde::Deserialize;

use exam_core::model::SubscriptionPlan;

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Deserialize)]
struct PlansResponse {
    plans: Vec<SubscriptionPlan>,
}

/// Public catalogue of subscription plans.
#[derive(Clone)]
pub struct SubscriptionService {
    api: ApiClient,
}

impl SubscriptionService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Plans a user can subscribe to. Inactive plans are dropped even if the
    /// backend lists them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ApiError> {
        let response: PlansResponse = self.api.get_json(&["subscriptions", "plans"], None).await?;
        Ok(response
            .plans
            .into_iter()
            .filter(|plan| plan.is_active)
            .collect())
    }
}
