use exam_core::model::{DEFAULT_CURRENCY, PlanId, SubscriptionPlan, UNLIMITED_PAPERS, UserProfile};

/// `₹599` for rupees, `USD 12.5` for anything else.
#[must_use]
pub fn amount_label(amount: f64, currency: &str) -> String {
    if currency.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
        format!("₹{amount}")
    } else {
        format!("{currency} {amount}")
    }
}

/// Billing period: `month`, `year`, or `N days`.
#[must_use]
pub fn period_label(duration_days: u32) -> String {
    match duration_days {
        30 => "month".to_string(),
        365 => "year".to_string(),
        days => format!("{days} days"),
    }
}

#[must_use]
pub fn papers_limit_label(papers_limit: i32) -> String {
    if papers_limit == UNLIMITED_PAPERS {
        "Unlimited".to_string()
    } else {
        papers_limit.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanCardVm {
    pub id: PlanId,
    pub name: String,
    pub price_label: String,
    pub period_label: String,
    pub papers_label: String,
    pub features: Vec<String>,
    pub is_current: bool,
}

#[must_use]
pub fn map_plan_cards(plans: &[SubscriptionPlan], user: Option<&UserProfile>) -> Vec<PlanCardVm> {
    let current = user.and_then(|user| user.subscription_plan.as_deref());
    plans
        .iter()
        .map(|plan| PlanCardVm {
            id: plan.id.clone(),
            name: plan.name.clone(),
            price_label: amount_label(plan.price, &plan.currency),
            period_label: format!("/ {}", period_label(plan.duration_days)),
            papers_label: format!("Papers: {}", papers_limit_label(plan.papers_limit)),
            features: plan.features.clone(),
            is_current: current == Some(plan.name.as_str()),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanSummaryVm {
    pub plan_label: String,
    pub usage_label: String,
    pub expiry_label: Option<String>,
}

#[must_use]
pub fn map_plan_summary(user: &UserProfile) -> PlanSummaryVm {
    PlanSummaryVm {
        plan_label: format!("Current Plan: {}", user.plan_name()),
        usage_label: format!(
            "Papers Used: {} / {}",
            user.free_papers_used, user.free_papers_limit
        ),
        expiry_label: user
            .subscription_expiry
            .as_deref()
            .filter(|expiry| !expiry.is_empty())
            .map(|expiry| format!("Valid until {}", expiry.get(..10).unwrap_or(expiry))),
    }
}
