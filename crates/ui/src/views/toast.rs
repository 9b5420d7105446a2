use std::time::Duration;

use dioxus::prelude::*;
use services::NotificationSink;

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Signal-backed notification stack shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    fn push(&self, kind: ToastKind, message: &str) {
        let mut list = self.items;
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut items = list.write();
        items.push(Toast {
            id,
            kind,
            message: message.to_string(),
        });
        let overflow = items.len().saturating_sub(MAX_VISIBLE);
        items.drain(..overflow);
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|toast| toast.id != id);
    }

    #[must_use]
    pub fn items(&self) -> Vec<Toast> {
        self.items.read().clone()
    }
}

impl NotificationSink for Toasts {
    fn notify_success(&self, message: &str) {
        tracing::debug!(message, "toast success");
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&self, message: &str) {
        tracing::debug!(message, "toast error");
        self.push(ToastKind::Error, message);
    }
}

/// Provide an empty toast stack to the component tree.
pub fn use_toasts_provider() -> Toasts {
    use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

#[component]
pub fn ToastStack() -> Element {
    let toasts = use_context::<Toasts>();

    rsx! {
        div { class: "toasts",
            for toast in toasts.items() {
                ToastItem { key: "{toast.id}", toast }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let toasts = use_context::<Toasts>();
    let id = toast.id;
    use_future(move || async move {
        tokio::time::sleep(TOAST_TTL).await;
        toasts.dismiss(id);
    });

    let class = match toast.kind {
        ToastKind::Success => "toast success",
        ToastKind::Error => "toast error",
    };

    rsx! {
        div { class, role: "status",
            span { "{toast.message}" }
            button { onclick: move |_| toasts.dismiss(id), "×" }
        }
    }
}
