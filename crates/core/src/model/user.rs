use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Wire value, also used as the `role` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

/// The signed-in user as reported by the backend.
///
/// Login responses only carry a subset of these fields; the rest default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub free_papers_used: u32,
    #[serde(default = "default_limit")]
    pub free_papers_limit: u32,
    #[serde(default)]
    pub total_papers_generated: u32,
    /// `-1` means unlimited.
    #[serde(default = "default_papers_limit")]
    pub papers_limit: i32,
    #[serde(default)]
    pub subscription_plan: Option<String>,
    #[serde(default)]
    pub subscription_expiry: Option<String>,
}

fn default_active() -> bool {
    true
}

fn default_limit() -> u32 {
    1
}

fn default_papers_limit() -> i32 {
    1
}

impl UserProfile {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Name of the current plan, or `Free Tier` without a subscription.
    #[must_use]
    pub fn plan_name(&self) -> &str {
        self.subscription_plan.as_deref().unwrap_or("Free Tier")
    }

    /// Papers the user may still generate, or `None` when unlimited.
    #[must_use]
    pub fn remaining_papers(&self) -> Option<u32> {
        let limit = u32::try_from(self.papers_limit).ok()?;
        Some(limit.saturating_sub(self.total_papers_generated))
    }
}
