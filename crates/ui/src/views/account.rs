use dioxus::prelude::*;
use services::{AuthError, NotificationSink};

use crate::context::AppContext;
use crate::views::toast::Toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};

const LOAD_FAILED_MESSAGE: &str = "Failed to load profile";
const UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";

fn update_error_message(err: &AuthError) -> String {
    match err {
        AuthError::Api(api) => api.user_message(UPDATE_FAILED_MESSAGE),
        other => other.to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileField {
    Name,
    Mobile,
}

#[component]
pub fn AccountView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let profile = ctx.profile();
    let mut name = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let saving = use_signal(|| false);

    let profile_for_resource = profile.clone();
    let mut resource = use_resource(move || {
        let profile = profile_for_resource.clone();
        async move {
            match profile.me().await {
                Ok(user) => {
                    name.set(user.name.clone());
                    mobile.set(user.mobile.clone().unwrap_or_default());
                    Ok(user)
                }
                Err(err) => {
                    toasts.notify_error(LOAD_FAILED_MESSAGE);
                    Err(match &err {
                        AuthError::Api(api) => ViewError::from(api),
                        _ => ViewError::Unknown,
                    })
                }
            }
        }
    });

    let on_save = use_callback(move |field: ProfileField| {
        let mut saving = saving;
        if *saving.peek() {
            return;
        }
        saving.set(true);
        let profile = profile.clone();
        let value = match field {
            ProfileField::Name => name.peek().clone(),
            ProfileField::Mobile => mobile.peek().clone(),
        };
        spawn(async move {
            let outcome = match field {
                ProfileField::Name => profile.update_name(&value).await,
                ProfileField::Mobile => profile.update_mobile(&value).await,
            };
            saving.set(false);
            match outcome {
                Ok(message) => {
                    toasts.notify_success(&message);
                    resource.restart();
                }
                Err(err) => toasts.notify_error(&update_error_message(&err)),
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let busy = saving();

    rsx! {
        div { class: "page",
            h2 { "My Account" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(user) => rsx! {
                    div { class: "card",
                        p { "Email: {user.email}" }
                        p { "Plan: {user.plan_name()}" }

                        label { "Name" }
                        input {
                            value: "{name}",
                            oninput: move |evt| name.set(evt.value()),
                        }
                        button {
                            disabled: busy,
                            onclick: move |_| on_save.call(ProfileField::Name),
                            "Save name"
                        }

                        label { "Mobile number" }
                        input {
                            r#type: "tel",
                            value: "{mobile}",
                            oninput: move |evt| mobile.set(evt.value()),
                        }
                        button {
                            disabled: busy,
                            onclick: move |_| on_save.call(ProfileField::Mobile),
                            "Save mobile"
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
