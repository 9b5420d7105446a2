use dioxus::prelude::*;
use dioxus_router::Link;
use services::NotificationSink;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PlanCardVm, map_plan_cards, map_plan_summary};

const LOAD_FAILED_MESSAGE: &str = "Failed to load subscription plans";

#[component]
pub fn PlansView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let subscriptions = ctx.subscriptions();
    let user = ctx.user().cloned();
    let summary = user.as_ref().map(map_plan_summary);

    let resource = use_resource(move || {
        let subscriptions = subscriptions.clone();
        let user = user.clone();
        async move {
            match subscriptions.plans().await {
                Ok(plans) => Ok(map_plan_cards(&plans, user.as_ref())),
                Err(err) => {
                    toasts.notify_error(LOAD_FAILED_MESSAGE);
                    Err(ViewError::from(&err))
                }
            }
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Choose Your Plan" }
            if let Some(summary) = summary {
                div { class: "card summary",
                    p { "{summary.plan_label}" }
                    p { class: "muted", "{summary.usage_label}" }
                    if let Some(expiry) = summary.expiry_label {
                        p { class: "muted", "{expiry}" }
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    PlanGrid { cards }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            p { class: "muted",
                "After completing your payment, contact our support team with your transaction details to activate your subscription."
            }
            Link { to: Route::Transactions {}, "View transaction history" }
        }
    }
}

#[component]
pub fn PlanGrid(cards: Vec<PlanCardVm>) -> Element {
    if cards.is_empty() {
        return rsx! {
            p { "No plans are available right now." }
        };
    }

    rsx! {
        ul { class: "plans",
            for card in cards {
                li { key: "{card.id}",
                    class: if card.is_current { "card plan current" } else { "card plan" },
                    h3 { "{card.name}" }
                    if card.is_current {
                        span { class: "badge", "Current Plan" }
                    }
                    p { class: "price",
                        strong { "{card.price_label}" }
                        span { class: "muted", " {card.period_label}" }
                    }
                    p { "{card.papers_label}" }
                    ul {
                        for feature in card.features {
                            li { "{feature}" }
                        }
                    }
                }
            }
        }
    }
}
