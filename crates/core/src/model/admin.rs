use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::plan::SubscriptionPlan;

/// Site-wide counters for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u32,
    pub total_papers: u32,
    pub total_attempts: u32,
    pub active_subscriptions: u32,
}

/// Partial update of a user's quota and subscription. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDetailsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_papers_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub papers_limit: Option<i32>,
}

impl UserDetailsUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free_papers_limit.is_none()
            && self.subscription_plan.is_none()
            && self.subscription_expiry.is_none()
            && self.papers_limit.is_none()
    }

    /// Put the user on `plan`: its name and paper limit, expiring
    /// `duration_days` after `now`.
    #[must_use]
    pub fn assign_plan(mut self, plan: &SubscriptionPlan, now: DateTime<Utc>) -> Self {
        self.subscription_plan = Some(plan.name.clone());
        self.papers_limit = Some(plan.papers_limit);
        self.subscription_expiry = Some(now + Duration::days(i64::from(plan.duration_days)));
        self
    }
}
