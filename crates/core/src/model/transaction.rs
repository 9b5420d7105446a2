use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{PlanId, TransactionId, UserId};
use crate::model::plan::DEFAULT_CURRENCY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Unknown => "unknown",
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A recorded subscription purchase and its validity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub transaction_number: String,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    #[serde(default)]
    pub user_mobile: Option<String>,
    pub plan_id: PlanId,
    pub plan_name: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
    pub validity_start: DateTime<Utc>,
    pub validity_end: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// File name the receipt PDF is stored under.
    #[must_use]
    pub fn receipt_file_name(&self) -> String {
        format!("Receipt_{}.pdf", self.transaction_number)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionDraftError {
    #[error("amount must be greater than zero")]
    InvalidAmount,
}

/// Manual payment record an admin enters after confirming a payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionDraft {
    #[must_use]
    pub fn manual(user_id: UserId, plan_id: PlanId, amount: f64) -> Self {
        Self {
            user_id,
            plan_id,
            amount,
            payment_id: None,
            payment_method: "Manual".into(),
            notes: None,
        }
    }

    /// # Errors
    ///
    /// Returns `TransactionDraftError::InvalidAmount` for a zero, negative or
    /// non-finite amount.
    pub fn validate(&self) -> Result<(), TransactionDraftError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TransactionDraftError::InvalidAmount);
        }
        Ok(())
    }
}
