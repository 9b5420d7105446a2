use serde::Deserialize;
use serde::de::IgnoredAny;

use exam_core::model::{
    AdminStats, PlanDraft, PlanId, SubscriptionPlan, Transaction, TransactionDraft,
    UserDetailsUpdate, UserId, UserProfile, UserRole,
};

use crate::api::{ApiClient, Credentials};
use crate::error::AdminError;
use crate::transactions_service::TransactionsResponse;

#[derive(Deserialize)]
struct UsersResponse {
    users: Vec<UserProfile>,
}

#[derive(Deserialize)]
struct PlansResponse {
    plans: Vec<SubscriptionPlan>,
}

#[derive(Deserialize)]
struct CreatedPlan {
    plan: SubscriptionPlan,
}

#[derive(Deserialize)]
struct CreatedTransaction {
    transaction: Transaction,
}

/// Admin-only management of users, plans and transactions.
///
/// Every call needs an admin account; the backend answers others with 403,
/// surfaced as an `AdminError` whose `is_forbidden` is true.
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
    credentials: Credentials,
}

impl AdminService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    fn auth(&self) -> Option<&Credentials> {
        Some(&self.credentials)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn stats(&self) -> Result<AdminStats, AdminError> {
        Ok(self.api.get_json(&["admin", "stats"], self.auth()).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn users(&self) -> Result<Vec<UserProfile>, AdminError> {
        let response: UsersResponse = self.api.get_json(&["admin", "users"], self.auth()).await?;
        Ok(response.users)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn set_user_role(&self, user_id: &UserId, role: UserRole) -> Result<(), AdminError> {
        let _: IgnoredAny = self
            .api
            .put_query(
                &["admin", "users", user_id.as_str(), "role"],
                &[("role", role.as_str())],
                self.auth(),
            )
            .await?;
        tracing::info!(user = %user_id, role = role.as_str(), "user role changed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api`; the backend refuses to deactivate the
    /// caller's own account with a validation error.
    pub async fn set_user_active(&self, user_id: &UserId, active: bool) -> Result<(), AdminError> {
        let _: IgnoredAny = self
            .api
            .put_query(
                &["admin", "users", user_id.as_str(), "status"],
                &[("is_active", bool_param(active))],
                self.auth(),
            )
            .await?;
        tracing::info!(user = %user_id, active, "user status changed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::NothingToUpdate` for an empty update, otherwise
    /// `AdminError::Api` if the request fails.
    pub async fn update_user_details(
        &self,
        user_id: &UserId,
        update: &UserDetailsUpdate,
    ) -> Result<(), AdminError> {
        if update.is_empty() {
            return Err(AdminError::NothingToUpdate);
        }
        let _: IgnoredAny = self
            .api
            .put_json(
                &["admin", "users", user_id.as_str(), "details"],
                update,
                self.auth(),
            )
            .await?;
        tracing::info!(user = %user_id, "user details updated");
        Ok(())
    }

    /// Every plan, including inactive ones.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn plans(&self) -> Result<Vec<SubscriptionPlan>, AdminError> {
        let response: PlansResponse = self.api.get_json(&["admin", "plans"], self.auth()).await?;
        Ok(response.plans)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Plan` for an invalid draft, otherwise
    /// `AdminError::Api` if the request fails.
    pub async fn create_plan(&self, draft: &PlanDraft) -> Result<SubscriptionPlan, AdminError> {
        draft.validate()?;
        let response: CreatedPlan = self
            .api
            .post_json(&["admin", "plans"], draft, self.auth())
            .await?;
        tracing::info!(plan = %response.plan.id, "plan created");
        Ok(response.plan)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Plan` for an invalid draft, otherwise
    /// `AdminError::Api` if the request fails.
    pub async fn update_plan(&self, plan_id: &PlanId, draft: &PlanDraft) -> Result<(), AdminError> {
        draft.validate()?;
        let _: IgnoredAny = self
            .api
            .put_json(&["admin", "plans", plan_id.as_str()], draft, self.auth())
            .await?;
        tracing::info!(plan = %plan_id, "plan updated");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn set_plan_active(&self, plan_id: &PlanId, active: bool) -> Result<(), AdminError> {
        let _: IgnoredAny = self
            .api
            .put_query(
                &["admin", "plans", plan_id.as_str(), "status"],
                &[("is_active", bool_param(active))],
                self.auth(),
            )
            .await?;
        tracing::info!(plan = %plan_id, active, "plan status changed");
        Ok(())
    }

    /// Deleting a plan only deactivates it; the record stays.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn deactivate_plan(&self, plan_id: &PlanId) -> Result<(), AdminError> {
        self.api
            .delete(&["admin", "plans", plan_id.as_str()], self.auth())
            .await?;
        tracing::info!(plan = %plan_id, "plan deactivated");
        Ok(())
    }

    /// Every user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` if the request fails.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, AdminError> {
        let response: TransactionsResponse = self
            .api
            .get_json(&["admin", "transactions"], self.auth())
            .await?;
        Ok(response.transactions)
    }

    /// Record a payment confirmed outside the app. The backend also moves
    /// the user onto the plan.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transaction` for an invalid draft, otherwise
    /// `AdminError::Api` if the request fails.
    pub async fn record_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, AdminError> {
        draft.validate()?;
        let response: CreatedTransaction = self
            .api
            .post_json(&["admin", "transactions"], draft, self.auth())
            .await?;
        tracing::info!(
            transaction = %response.transaction.id,
            user = %draft.user_id,
            "transaction recorded"
        );
        Ok(response.transaction)
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
