use dioxus::prelude::*;
use dioxus_router::Link;
use services::NotificationSink;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, StatsVm, map_attempt_rows, map_stats};

const LOAD_FAILED_MESSAGE: &str = "Failed to load results";

#[derive(Clone, Debug, PartialEq)]
struct ResultsData {
    stats: StatsVm,
    rows: Vec<AttemptRowVm>,
}

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let results = ctx.results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            let loaded = async {
                let stats = results.stats().await?;
                let attempts = results.attempts().await?;
                Ok::<_, services::ApiError>((stats, attempts))
            }
            .await;
            match loaded {
                Ok((stats, attempts)) => Ok(ResultsData {
                    stats: map_stats(&stats),
                    rows: map_attempt_rows(&attempts),
                }),
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
            h2 { "My Results" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    StatsRow { stats: data.stats }
                    AttemptTable { rows: data.rows }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn StatsRow(stats: StatsVm) -> Element {
    rsx! {
        div { class: "stats",
            div { class: "card",
                div { class: "stat-value", "{stats.total_attempts}" }
                div { class: "muted", "Total Attempts" }
            }
            div { class: "card",
                div { class: "stat-value", "{stats.average_score}" }
                div { class: "muted", "Average Score" }
            }
            div { class: "card",
                div { class: "stat-value", "{stats.highest_score}" }
                div { class: "muted", "Highest Score" }
            }
        }
    }
}

/// Attempt history, already ordered newest first.
#[component]
pub fn AttemptTable(rows: Vec<AttemptRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: "card",
                p { "No quiz attempts yet" }
                Link { to: Route::Library {}, "Take a quiz" }
            }
        };
    }

    rsx! {
        table { class: "attempts",
            thead {
                tr {
                    th { "Date" }
                    th { "Score" }
                    th { "Percentage" }
                    th { "Performance" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.id}",
                        td { "{row.completed_at_str}" }
                        td { "{row.score_label}" }
                        td { class: row.grade.class(), "{row.percentage_label}" }
                        td { "{row.grade.label()}" }
                    }
                }
            }
        }
    }
}
