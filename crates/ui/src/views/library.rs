use dioxus::prelude::*;
use dioxus_router::Link;
use exam_core::model::PaperId;
use services::{DownloadError, DownloadVariant, NotificationSink};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PaperCardVm, map_paper_cards, quota_label};

const LOAD_FAILED_MESSAGE: &str = "Failed to load data";
const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download";
const DELETED_MESSAGE: &str = "Paper deleted successfully!";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete paper";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperAction {
    Download(DownloadVariant),
    AskDelete,
    ConfirmDelete,
    CancelDelete,
}

#[component]
pub fn LibraryView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let library = ctx.library();
    let downloader = ctx.downloader();
    let quota = ctx.user().map(quota_label);
    let mut delete_target = use_signal(|| None::<PaperId>);

    let library_for_resource = library.clone();
    let mut resource = use_resource(move || {
        let library = library_for_resource.clone();
        async move {
            match library.list().await {
                Ok(papers) => Ok(map_paper_cards(&papers)),
                Err(err) => {
                    toasts.notify_error(LOAD_FAILED_MESSAGE);
                    Err(ViewError::from(&err))
                }
            }
        }
    });

    let on_action = use_callback(move |(card, action): (PaperCardVm, PaperAction)| {
        match action {
            PaperAction::Download(variant) => {
                let library = library.clone();
                let downloader = downloader.clone();
                spawn(async move {
                    let saved = library
                        .download(&card.id, &card.title, variant, downloader.as_ref())
                        .await;
                    match saved {
                        Ok(_) => toasts.notify_success(variant.success_message()),
                        Err(DownloadError::InProgress) => {}
                        Err(err) => {
                            tracing::warn!(paper_id = %card.id, error = %err, "download failed");
                            toasts.notify_error(DOWNLOAD_FAILED_MESSAGE);
                        }
                    }
                });
            }
            PaperAction::AskDelete => delete_target.set(Some(card.id)),
            PaperAction::CancelDelete => delete_target.set(None),
            PaperAction::ConfirmDelete => {
                delete_target.set(None);
                let library = library.clone();
                spawn(async move {
                    match library.delete(&card.id).await {
                        Ok(()) => {
                            toasts.notify_success(DELETED_MESSAGE);
                            resource.restart();
                        }
                        Err(err) => toasts.notify_error(&err.user_message(DELETE_FAILED_MESSAGE)),
                    }
                });
            }
        }
    });

    let state = view_state_from_resource(&resource);
    let pending_delete = delete_target.read().clone();

    rsx! {
        div { class: "page",
            header {
                h2 { "My Papers" }
                if let Some(quota) = quota {
                    p { class: "muted", "{quota}" }
                }
                Link { to: Route::Generator {}, "Generate New Paper" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No papers yet. Generate your first paper to get started." }
                    } else {
                        ul { class: "papers",
                            for card in cards.iter() {
                                PaperCard {
                                    key: "{card.id}",
                                    card: card.clone(),
                                    confirming: pending_delete.as_ref() == Some(&card.id),
                                    on_action,
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
pub fn PaperCard(
    card: PaperCardVm,
    confirming: bool,
    on_action: Callback<(PaperCardVm, PaperAction)>,
) -> Element {
    let for_actions = card.clone();
    let act = move |action: PaperAction| {
        let card = for_actions.clone();
        move |_: Event<MouseData>| on_action.call((card.clone(), action))
    };

    rsx! {
        li { class: "card paper",
            h3 { "{card.title}" }
            p { class: "muted", "{card.meta}" }
            if let Some(topics) = card.topics_label.clone() {
                p { "{topics}" }
            }
            p { "{card.marks_label} • {card.duration_label}" }
            if let Some(created) = card.created_label.clone() {
                p { class: "muted", "Created {created}" }
            }

            div { class: "actions",
                Link { to: Route::Practice { paper_id: card.id.to_string() }, "Practice" }
                button { onclick: act(PaperAction::Download(DownloadVariant::Paper)), "Download" }
                button { onclick: act(PaperAction::Download(DownloadVariant::AnswerKey)), "Answer Key" }
                button { onclick: act(PaperAction::AskDelete), "Delete" }
            }

            if confirming {
                div { class: "confirm",
                    p { "Are you sure you want to delete this paper?" }
                    button { class: "primary", onclick: act(PaperAction::ConfirmDelete), "Delete" }
                    button { onclick: act(PaperAction::CancelDelete), "Cancel" }
                }
            }
        }
    }
}
