use dioxus::prelude::*;
use dioxus_router::Link;
use exam_core::model::Transaction;
use services::NotificationSink;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TransactionRowVm, map_transaction_rows};

const LOAD_FAILED_MESSAGE: &str = "Failed to load transactions";
const RECEIPT_SAVED_MESSAGE: &str = "Receipt downloaded successfully";
const RECEIPT_FAILED_MESSAGE: &str = "Failed to download receipt";

#[component]
pub fn TransactionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let transactions = ctx.transactions();
    let downloader = ctx.downloader();

    let transactions_for_resource = transactions.clone();
    let resource = use_resource(move || {
        let transactions = transactions_for_resource.clone();
        async move {
            match transactions.list().await {
                Ok(list) => Ok(map_transaction_rows(&list)),
                Err(err) => {
                    toasts.notify_error(LOAD_FAILED_MESSAGE);
                    Err(ViewError::from(&err))
                }
            }
        }
    });

    let on_receipt = use_callback(move |transaction: Transaction| {
        let transactions = transactions.clone();
        let downloader = downloader.clone();
        spawn(async move {
            match transactions
                .download_receipt(&transaction, downloader.as_ref())
                .await
            {
                Ok(_) => toasts.notify_success(RECEIPT_SAVED_MESSAGE),
                Err(err) => {
                    tracing::warn!(transaction = %transaction.id, error = %err, "receipt download failed");
                    toasts.notify_error(RECEIPT_FAILED_MESSAGE);
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Transaction History" }
            p { class: "muted", "View all your subscription payments and download receipts" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    TransactionList { rows, show_user: false, on_receipt }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

/// Transaction cards; admins also see whose purchase each one is.
#[component]
pub fn TransactionList(
    rows: Vec<TransactionRowVm>,
    show_user: bool,
    on_receipt: Callback<Transaction>,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: "card",
                h3 { "No Transactions Yet" }
                p { "You haven't made any subscription payments yet" }
                Link { to: Route::Plans {}, "View Subscription Plans" }
            }
        };
    }

    rsx! {
        ul { class: "transactions",
            for row in rows {
                li { key: "{row.number}", class: "card transaction",
                    div {
                        h3 { "{row.plan_name}" }
                        span { class: "badge {row.status_class}", "{row.status_label}" }
                    }
                    if show_user {
                        p { "{row.user_label}" }
                    }
                    dl {
                        dt { "Transaction Number" }
                        dd { "{row.number}" }
                        dt { "Amount" }
                        dd { "{row.amount_label}" }
                        dt { "Date" }
                        dd { "{row.date_label}" }
                        dt { "Validity" }
                        dd { "{row.validity_label}" }
                    }
                    if let Some(method) = row.payment_method.clone() {
                        p { class: "muted", "Payment Method: {method}" }
                    }
                    button {
                        onclick: {
                            let transaction = row.transaction.clone();
                            move |_| on_receipt.call(transaction.clone())
                        },
                        "Receipt"
                    }
                }
            }
        }
    }
}
