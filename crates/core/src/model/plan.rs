use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::PlanId;

pub const DEFAULT_CURRENCY: &str = "INR";

/// `papers_limit` value the backend uses for unlimited plans.
pub const UNLIMITED_PAPERS: i32 = -1;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

/// A subscription plan offered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub papers_limit: i32,
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SubscriptionPlan {
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.papers_limit == UNLIMITED_PAPERS
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanDraftError {
    #[error("plan name is required")]
    MissingName,
    #[error("price must be a non-negative amount")]
    InvalidPrice,
    #[error("papers limit must be -1 (unlimited) or positive")]
    InvalidPapersLimit,
    #[error("duration must be at least one day")]
    InvalidDuration,
    #[error("a plan needs at least one feature")]
    NoFeatures,
}

/// Body of the admin create and update plan requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDraft {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub papers_limit: i32,
    pub duration_days: u32,
    pub features: Vec<String>,
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: 0.0,
            currency: default_currency(),
            papers_limit: 1,
            duration_days: 30,
            features: Vec::new(),
        }
    }
}

impl PlanDraft {
    /// Draft prefilled from an existing plan, for editing.
    #[must_use]
    pub fn from_plan(plan: &SubscriptionPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price: plan.price,
            currency: plan.currency.clone(),
            papers_limit: plan.papers_limit,
            duration_days: plan.duration_days,
            features: plan.features.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns the first `PlanDraftError` the draft violates.
    pub fn validate(&self) -> Result<(), PlanDraftError> {
        if self.name.trim().is_empty() {
            return Err(PlanDraftError::MissingName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PlanDraftError::InvalidPrice);
        }
        if self.papers_limit != UNLIMITED_PAPERS && self.papers_limit < 1 {
            return Err(PlanDraftError::InvalidPapersLimit);
        }
        if self.duration_days == 0 {
            return Err(PlanDraftError::InvalidDuration);
        }
        if self.features.is_empty() {
            return Err(PlanDraftError::NoFeatures);
        }
        Ok(())
    }
}

/// One feature per non-blank line.
#[must_use]
pub fn features_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
