use exam_core::model::{
    AdminStats, PlanDraft, PlanId, SubscriptionPlan, TransactionDraft, UserDetailsUpdate, UserId,
    UserProfile, features_from_text,
};
use exam_core::time::Timestamp;

use super::plans_vm::{amount_label, papers_limit_label};

pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin access required";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Users,
    Plans,
    Transactions,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Users, AdminTab::Plans, AdminTab::Transactions];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Users => "Users",
            AdminTab::Plans => "Subscription Plans",
            AdminTab::Transactions => "Transactions",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminStatsVm {
    pub total_users: String,
    pub total_papers: String,
    pub total_attempts: String,
    pub active_subscriptions: String,
}

#[must_use]
pub fn map_admin_stats(stats: &AdminStats) -> AdminStatsVm {
    AdminStatsVm {
        total_users: stats.total_users.to_string(),
        total_papers: stats.total_papers.to_string(),
        total_attempts: stats.total_attempts.to_string(),
        active_subscriptions: stats.active_subscriptions.to_string(),
    }
}

/// Toast after flipping a user's or plan's active flag.
#[must_use]
pub fn status_changed_message(subject: &str, now_active: bool) -> String {
    let verb = if now_active { "activated" } else { "deactivated" };
    format!("{subject} {verb} successfully")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminUserRowVm {
    pub user: UserProfile,
    pub role_label: &'static str,
    pub status_label: &'static str,
    pub free_papers_label: String,
    pub plan_label: String,
    /// Admins may not deactivate themselves.
    pub can_toggle: bool,
    pub toggle_label: &'static str,
}

#[must_use]
pub fn map_user_rows(users: &[UserProfile], me: Option<&UserId>) -> Vec<AdminUserRowVm> {
    users
        .iter()
        .map(|user| AdminUserRowVm {
            user: user.clone(),
            role_label: user.role.as_str(),
            status_label: if user.is_active { "Active" } else { "Inactive" },
            free_papers_label: format!("{} / {}", user.free_papers_used, user.free_papers_limit),
            plan_label: user.plan_name().to_string(),
            can_toggle: me != Some(&user.id),
            toggle_label: if user.is_active { "Deactivate" } else { "Activate" },
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdminPlanCardVm {
    pub plan: SubscriptionPlan,
    pub price_label: String,
    pub duration_label: String,
    pub papers_label: String,
    pub currency_label: String,
    pub status_label: &'static str,
    pub toggle_label: &'static str,
}

#[must_use]
pub fn map_admin_plan_cards(plans: &[SubscriptionPlan]) -> Vec<AdminPlanCardVm> {
    plans
        .iter()
        .map(|plan| AdminPlanCardVm {
            plan: plan.clone(),
            price_label: amount_label(plan.price, &plan.currency),
            duration_label: format!("/ {} days", plan.duration_days),
            papers_label: format!("Papers: {}", papers_limit_label(plan.papers_limit)),
            currency_label: format!("Currency: {}", plan.currency),
            status_label: if plan.is_active { "Active" } else { "Inactive" },
            toggle_label: if plan.is_active { "Deactivate" } else { "Activate" },
        })
        .collect()
}

fn parse_field<T: std::str::FromStr>(value: &str, label: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{label} must be a number"))
}

/// Text fields of the create/edit plan dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanFormVm {
    pub editing: Option<PlanId>,
    pub name: String,
    pub price: String,
    pub currency: String,
    pub papers_limit: String,
    pub duration_days: String,
    pub features: String,
}

impl PlanFormVm {
    #[must_use]
    pub fn create() -> Self {
        let draft = PlanDraft::default();
        Self {
            editing: None,
            currency: draft.currency,
            papers_limit: draft.papers_limit.to_string(),
            duration_days: draft.duration_days.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn edit(plan: &SubscriptionPlan) -> Self {
        Self {
            editing: Some(plan.id.clone()),
            name: plan.name.clone(),
            price: plan.price.to_string(),
            currency: plan.currency.clone(),
            papers_limit: plan.papers_limit.to_string(),
            duration_days: plan.duration_days.to_string(),
            features: plan.features.join("\n"),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Plan"
        } else {
            "Create New Plan"
        }
    }

    /// # Errors
    ///
    /// Returns a message naming the first field that is not a number or
    /// fails plan validation.
    pub fn to_draft(&self) -> Result<PlanDraft, String> {
        let draft = PlanDraft {
            name: self.name.trim().to_string(),
            price: parse_field(&self.price, "Price")?,
            currency: self.currency.trim().to_uppercase(),
            papers_limit: parse_field(&self.papers_limit, "Papers limit")?,
            duration_days: parse_field(&self.duration_days, "Duration")?,
            features: features_from_text(&self.features),
        };
        draft.validate().map_err(|err| err.to_string())?;
        Ok(draft)
    }
}

/// Fields of the edit-user dialog. An empty `subscription_plan` means free tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEditVm {
    pub user_id: UserId,
    pub name: String,
    pub free_papers_limit: String,
    pub subscription_plan: String,
    pub papers_limit: String,
}

impl UserEditVm {
    #[must_use]
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            free_papers_limit: user.free_papers_limit.to_string(),
            subscription_plan: user.subscription_plan.clone().unwrap_or_default(),
            papers_limit: user.papers_limit.to_string(),
        }
    }

    /// Picking an active plan copies its paper limit and sets the expiry
    /// `duration_days` from `now`; otherwise the typed limit is used.
    ///
    /// # Errors
    ///
    /// Returns a message when a numeric field does not parse.
    pub fn to_update(
        &self,
        plans: &[SubscriptionPlan],
        now: Timestamp,
    ) -> Result<UserDetailsUpdate, String> {
        let base = UserDetailsUpdate {
            free_papers_limit: Some(parse_field(&self.free_papers_limit, "Free papers limit")?),
            ..UserDetailsUpdate::default()
        };
        let chosen = plans
            .iter()
            .find(|plan| plan.is_active && plan.name == self.subscription_plan);
        Ok(match chosen {
            Some(plan) => base.assign_plan(plan, now),
            None => UserDetailsUpdate {
                papers_limit: Some(parse_field(&self.papers_limit, "Papers limit")?),
                ..base
            },
        })
    }
}

/// Manual transaction entry on the admin transactions tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFormVm {
    pub user_id: String,
    pub plan_id: String,
    pub amount: String,
    pub payment_id: String,
    pub notes: String,
}

impl TransactionFormVm {
    /// Select `plan`, prefilling the amount with its price.
    pub fn choose_plan(&mut self, plan: &SubscriptionPlan) {
        self.plan_id = plan.id.to_string();
        self.amount = plan.price.to_string();
    }

    /// # Errors
    ///
    /// Returns a message for a missing user or plan, or an invalid amount.
    pub fn to_draft(&self) -> Result<TransactionDraft, String> {
        if self.user_id.trim().is_empty() {
            return Err("Select a user".to_string());
        }
        if self.plan_id.trim().is_empty() {
            return Err("Select a plan".to_string());
        }
        let mut draft = TransactionDraft::manual(
            UserId::new(self.user_id.trim()),
            PlanId::new(self.plan_id.trim()),
            parse_field(&self.amount, "Amount")?,
        );
        let optional = |text: &str| Some(text.trim().to_string()).filter(|text| !text.is_empty());
        draft.payment_id = optional(&self.payment_id);
        draft.notes = optional(&self.notes);
        draft.validate().map_err(|err| err.to_string())?;
        Ok(draft)
    }
}
