use dioxus::prelude::*;
use exam_core::model::{SubscriptionPlan, Transaction, UserProfile, UserRole};
use exam_core::time;
use services::{AdminError, NotificationSink};

use crate::context::AppContext;
use crate::views::toast::Toasts;
use crate::views::transactions::TransactionList;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ADMIN_REQUIRED_MESSAGE, AdminPlanCardVm, AdminStatsVm, AdminTab, AdminUserRowVm, PlanFormVm,
    TransactionFormVm, UserEditVm, map_admin_plan_cards, map_admin_stats, map_transaction_rows,
    map_user_rows, status_changed_message,
};

const LOAD_FAILED_MESSAGE: &str = "Failed to load admin data";
const USER_STATUS_FAILED: &str = "Failed to update user status";
const USER_ROLE_CHANGED: &str = "User role updated successfully";
const USER_UPDATED: &str = "User updated successfully";
const USER_UPDATE_FAILED: &str = "Failed to update user";
const PLAN_STATUS_FAILED: &str = "Failed to update plan status";
const PLAN_CREATED: &str = "Plan created successfully";
const PLAN_UPDATED: &str = "Plan updated successfully";
const PLAN_SAVE_FAILED: &str = "Failed to save plan";
const PLAN_DEACTIVATED: &str = "Plan deactivated successfully";
const TRANSACTION_RECORDED: &str = "Transaction recorded successfully";
const TRANSACTION_FAILED: &str = "Failed to record transaction";
const RECEIPT_SAVED: &str = "Receipt downloaded successfully";
const RECEIPT_FAILED: &str = "Failed to download receipt";

fn admin_error_message(err: &AdminError, fallback: &str) -> String {
    match err {
        AdminError::Api(api) => api.user_message(fallback),
        other => other.to_string(),
    }
}

/// Toast the outcome; true when the panel should reload.
fn report(toasts: Toasts, outcome: Result<(), AdminError>, success: &str, fallback: &str) -> bool {
    match outcome {
        Ok(()) => {
            toasts.notify_success(success);
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "admin action failed");
            toasts.notify_error(&admin_error_message(&err, fallback));
            false
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct AdminData {
    stats: AdminStatsVm,
    users: Vec<UserProfile>,
    plans: Vec<SubscriptionPlan>,
    transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdminAction {
    ToggleUser(UserProfile),
    ToggleRole(UserProfile),
    EditUser(UserProfile),
    TogglePlan(SubscriptionPlan),
    EditPlan(SubscriptionPlan),
    DeletePlan(SubscriptionPlan),
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();

    if !ctx.is_admin() {
        return rsx! {
            div { class: "page",
                h2 { "Admin Panel" }
                p { "{ADMIN_REQUIRED_MESSAGE}" }
            }
        };
    }

    rsx! { AdminPanel {} }
}

#[component]
fn AdminPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let admin = ctx.admin();
    let me = ctx.user().map(|user| user.id.clone());
    let mut tab = use_signal(AdminTab::default);
    let mut plan_form = use_signal(|| None::<PlanFormVm>);
    let mut user_form = use_signal(|| None::<UserEditVm>);
    let mut transaction_form = use_signal(TransactionFormVm::default);

    let admin_for_resource = admin.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        async move {
            let loaded = async {
                let stats = admin.stats().await?;
                let users = admin.users().await?;
                let plans = admin.plans().await?;
                let transactions = admin.transactions().await?;
                Ok::<_, AdminError>(AdminData {
                    stats: map_admin_stats(&stats),
                    users,
                    plans,
                    transactions,
                })
            }
            .await;
            loaded.map_err(|err| {
                if err.is_forbidden() {
                    toasts.notify_error(ADMIN_REQUIRED_MESSAGE);
                    ViewError::Unauthorized
                } else {
                    toasts.notify_error(LOAD_FAILED_MESSAGE);
                    match err {
                        AdminError::Api(api) => ViewError::from(&api),
                        _ => ViewError::Unknown,
                    }
                }
            })
        }
    });

    let admin_for_actions = admin.clone();
    let on_action = use_callback(move |action: AdminAction| {
        let admin = admin_for_actions.clone();
        match action {
            AdminAction::ToggleUser(user) => {
                let now_active = !user.is_active;
                spawn(async move {
                    let outcome = admin.set_user_active(&user.id, now_active).await;
                    let message = status_changed_message("User", now_active);
                    if report(toasts, outcome, &message, USER_STATUS_FAILED) {
                        resource.restart();
                    }
                });
            }
            AdminAction::ToggleRole(user) => {
                let role = if user.is_admin() {
                    UserRole::User
                } else {
                    UserRole::Admin
                };
                spawn(async move {
                    let outcome = admin.set_user_role(&user.id, role).await;
                    if report(toasts, outcome, USER_ROLE_CHANGED, USER_UPDATE_FAILED) {
                        resource.restart();
                    }
                });
            }
            AdminAction::EditUser(user) => user_form.set(Some(UserEditVm::from_user(&user))),
            AdminAction::TogglePlan(plan) => {
                let now_active = !plan.is_active;
                spawn(async move {
                    let outcome = admin.set_plan_active(&plan.id, now_active).await;
                    let message = status_changed_message("Plan", now_active);
                    if report(toasts, outcome, &message, PLAN_STATUS_FAILED) {
                        resource.restart();
                    }
                });
            }
            AdminAction::EditPlan(plan) => plan_form.set(Some(PlanFormVm::edit(&plan))),
            AdminAction::DeletePlan(plan) => {
                spawn(async move {
                    let outcome = admin.deactivate_plan(&plan.id).await;
                    if report(toasts, outcome, PLAN_DEACTIVATED, PLAN_STATUS_FAILED) {
                        resource.restart();
                    }
                });
            }
        }
    });

    let admin_for_plan = admin.clone();
    let on_save_plan = use_callback(move |()| {
        let Some(form) = plan_form.peek().clone() else {
            return;
        };
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                toasts.notify_error(&message);
                return;
            }
        };
        let admin = admin_for_plan.clone();
        spawn(async move {
            let (outcome, success) = match &form.editing {
                Some(plan_id) => (admin.update_plan(plan_id, &draft).await, PLAN_UPDATED),
                None => (admin.create_plan(&draft).await.map(|_| ()), PLAN_CREATED),
            };
            if report(toasts, outcome, success, PLAN_SAVE_FAILED) {
                plan_form.set(None);
                resource.restart();
            }
        });
    });

    let admin_for_user = admin.clone();
    let on_save_user = use_callback(move |plans: Vec<SubscriptionPlan>| {
        let Some(form) = user_form.peek().clone() else {
            return;
        };
        let update = match form.to_update(&plans, time::now()) {
            Ok(update) => update,
            Err(message) => {
                toasts.notify_error(&message);
                return;
            }
        };
        let admin = admin_for_user.clone();
        spawn(async move {
            let outcome = admin.update_user_details(&form.user_id, &update).await;
            if report(toasts, outcome, USER_UPDATED, USER_UPDATE_FAILED) {
                user_form.set(None);
                resource.restart();
            }
        });
    });

    let on_record = use_callback(move |()| {
        let draft = match transaction_form.peek().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                toasts.notify_error(&message);
                return;
            }
        };
        let admin = admin.clone();
        spawn(async move {
            let outcome = admin.record_transaction(&draft).await.map(|_| ());
            if report(toasts, outcome, TRANSACTION_RECORDED, TRANSACTION_FAILED) {
                transaction_form.set(TransactionFormVm::default());
                resource.restart();
            }
        });
    });

    let transactions = ctx.transactions();
    let downloader = ctx.downloader();
    let on_receipt = use_callback(move |transaction: Transaction| {
        let transactions = transactions.clone();
        let downloader = downloader.clone();
        spawn(async move {
            match transactions
                .download_receipt(&transaction, downloader.as_ref())
                .await
            {
                Ok(_) => toasts.notify_success(RECEIPT_SAVED),
                Err(err) => {
                    tracing::warn!(transaction = %transaction.id, error = %err, "receipt download failed");
                    toasts.notify_error(RECEIPT_FAILED);
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let active_tab = tab();

    rsx! {
        div { class: "page",
            h2 { "Admin Panel" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    AdminStatsRow { stats: data.stats.clone() }

                    div { class: "tabs",
                        for candidate in AdminTab::ALL {
                            button {
                                key: "{candidate.label()}",
                                class: if candidate == active_tab { "tab active" } else { "tab" },
                                onclick: move |_| tab.set(candidate),
                                "{candidate.label()}"
                            }
                        }
                    }

                    match active_tab {
                        AdminTab::Users => rsx! {
                            AdminUserTable { rows: map_user_rows(&data.users, me.as_ref()), on_action }
                            if let Some(form) = user_form() {
                                UserEditDialog {
                                    form,
                                    plans: data.plans.clone(),
                                    on_change: move |form| user_form.set(Some(form)),
                                    on_save: on_save_user,
                                    on_cancel: move |()| user_form.set(None),
                                }
                            }
                        },
                        AdminTab::Plans => rsx! {
                            button { onclick: move |_| plan_form.set(Some(PlanFormVm::create())), "Create Plan" }
                            AdminPlanGrid { cards: map_admin_plan_cards(&data.plans), on_action }
                            if let Some(form) = plan_form() {
                                PlanDialog {
                                    form,
                                    on_change: move |form| plan_form.set(Some(form)),
                                    on_save: on_save_plan,
                                    on_cancel: move |()| plan_form.set(None),
                                }
                            }
                        },
                        AdminTab::Transactions => rsx! {
                            TransactionEntry {
                                form: transaction_form(),
                                users: data.users.clone(),
                                plans: data.plans.clone(),
                                on_change: move |form| transaction_form.set(form),
                                on_save: on_record,
                            }
                            TransactionList {
                                rows: map_transaction_rows(&data.transactions),
                                show_user: true,
                                on_receipt,
                            }
                        },
                    }
                },
            }
        }
    }
}

#[component]
fn AdminStatsRow(stats: AdminStatsVm) -> Element {
    rsx! {
        div { class: "stats",
            div { class: "card",
                div { class: "stat-value", "{stats.total_users}" }
                div { class: "muted", "Total Users" }
            }
            div { class: "card",
                div { class: "stat-value", "{stats.total_papers}" }
                div { class: "muted", "Papers Generated" }
            }
            div { class: "card",
                div { class: "stat-value", "{stats.total_attempts}" }
                div { class: "muted", "Quiz Attempts" }
            }
            div { class: "card",
                div { class: "stat-value", "{stats.active_subscriptions}" }
                div { class: "muted", "Active Subscriptions" }
            }
        }
    }
}

#[component]
pub fn AdminUserTable(rows: Vec<AdminUserRowVm>, on_action: Callback<AdminAction>) -> Element {
    rsx! {
        table { class: "users",
            thead {
                tr {
                    th { "Name" }
                    th { "Email" }
                    th { "Role" }
                    th { "Status" }
                    th { "Free Papers" }
                    th { "Subscription" }
                    th { "Actions" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.user.id}",
                        td { "{row.user.name}" }
                        td { "{row.user.email}" }
                        td { span { class: "badge", "{row.role_label}" } }
                        td { "{row.status_label}" }
                        td { "{row.free_papers_label}" }
                        td { "{row.plan_label}" }
                        td {
                            button {
                                onclick: {
                                    let user = row.user.clone();
                                    move |_| on_action.call(AdminAction::EditUser(user.clone()))
                                },
                                "Edit"
                            }
                            if row.can_toggle {
                                button {
                                    onclick: {
                                        let user = row.user.clone();
                                        move |_| on_action.call(AdminAction::ToggleUser(user.clone()))
                                    },
                                    "{row.toggle_label}"
                                }
                                button {
                                    onclick: {
                                        let user = row.user.clone();
                                        move |_| on_action.call(AdminAction::ToggleRole(user.clone()))
                                    },
                                    if row.user.is_admin() { "Make user" } else { "Make admin" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AdminPlanGrid(cards: Vec<AdminPlanCardVm>, on_action: Callback<AdminAction>) -> Element {
    rsx! {
        ul { class: "plans",
            for card in cards {
                li { key: "{card.plan.id}",
                    class: if card.plan.is_active { "card plan" } else { "card plan inactive" },
                    h3 { "{card.plan.name}" }
                    span { class: "badge", "{card.status_label}" }
                    p { class: "price",
                        strong { "{card.price_label}" }
                        span { class: "muted", " {card.duration_label}" }
                    }
                    p { "{card.papers_label}" }
                    p { class: "muted", "{card.currency_label}" }
                    ul {
                        for feature in card.plan.features.iter() {
                            li { "{feature}" }
                        }
                    }
                    div { class: "actions",
                        button {
                            onclick: {
                                let plan = card.plan.clone();
                                move |_| on_action.call(AdminAction::EditPlan(plan.clone()))
                            },
                            "Edit"
                        }
                        button {
                            onclick: {
                                let plan = card.plan.clone();
                                move |_| on_action.call(AdminAction::TogglePlan(plan.clone()))
                            },
                            "{card.toggle_label}"
                        }
                        if card.plan.is_active {
                            button {
                                onclick: {
                                    let plan = card.plan.clone();
                                    move |_| on_action.call(AdminAction::DeletePlan(plan.clone()))
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PlanDialog(
    form: PlanFormVm,
    on_change: Callback<PlanFormVm>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> Element {
    let edit = |apply: fn(&mut PlanFormVm, String)| {
        let form = form.clone();
        move |evt: Event<FormData>| {
            let mut next = form.clone();
            apply(&mut next, evt.value());
            on_change.call(next);
        }
    };

    rsx! {
        div { class: "card dialog",
            h3 { "{form.title()}" }
            label { "Plan Name" }
            input { value: "{form.name}", placeholder: "e.g., Monthly Plan",
                oninput: edit(|form, value| form.name = value) }
            label { "Price" }
            input { value: "{form.price}", placeholder: "999",
                oninput: edit(|form, value| form.price = value) }
            label { "Currency" }
            input { value: "{form.currency}",
                oninput: edit(|form, value| form.currency = value) }
            label { "Papers Limit" }
            input { value: "{form.papers_limit}", placeholder: "-1 for unlimited",
                oninput: edit(|form, value| form.papers_limit = value) }
            label { "Duration (Days)" }
            input { value: "{form.duration_days}", placeholder: "30 for monthly, 365 for annual",
                oninput: edit(|form, value| form.duration_days = value) }
            label { "Features (one per line)" }
            textarea { value: "{form.features}", rows: 4,
                oninput: edit(|form, value| form.features = value) }
            div { class: "actions",
                button { class: "primary", onclick: move |_| on_save.call(()), "Save" }
                button { onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

#[component]
fn UserEditDialog(
    form: UserEditVm,
    plans: Vec<SubscriptionPlan>,
    on_change: Callback<UserEditVm>,
    on_save: Callback<Vec<SubscriptionPlan>>,
    on_cancel: Callback<()>,
) -> Element {
    let edit = |apply: fn(&mut UserEditVm, String)| {
        let form = form.clone();
        move |evt: Event<FormData>| {
            let mut next = form.clone();
            apply(&mut next, evt.value());
            on_change.call(next);
        }
    };
    let active: Vec<SubscriptionPlan> = plans.iter().filter(|plan| plan.is_active).cloned().collect();

    rsx! {
        div { class: "card dialog",
            h3 { "Edit User: {form.name}" }
            label { "Free Papers Limit" }
            input { value: "{form.free_papers_limit}", placeholder: "1",
                oninput: edit(|form, value| form.free_papers_limit = value) }
            label { "Subscription Plan" }
            select {
                value: "{form.subscription_plan}",
                onchange: edit(|form, value| form.subscription_plan = value),
                option { value: "", "No Subscription (Free Tier)" }
                for plan in active.iter() {
                    option { key: "{plan.id}", value: "{plan.name}",
                        "{plan.name} - ₹{plan.price} ({plan.duration_days} days)"
                    }
                }
            }
            if form.subscription_plan.is_empty() {
                label { "Papers Limit (if no subscription)" }
                input { value: "{form.papers_limit}", placeholder: "1",
                    oninput: edit(|form, value| form.papers_limit = value) }
            }
            div { class: "actions",
                button { class: "primary", onclick: move |_| on_save.call(plans.clone()), "Save" }
                button { onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

#[component]
fn TransactionEntry(
    form: TransactionFormVm,
    users: Vec<UserProfile>,
    plans: Vec<SubscriptionPlan>,
    on_change: Callback<TransactionFormVm>,
    on_save: Callback<()>,
) -> Element {
    let edit = |apply: fn(&mut TransactionFormVm, String)| {
        let form = form.clone();
        move |evt: Event<FormData>| {
            let mut next = form.clone();
            apply(&mut next, evt.value());
            on_change.call(next);
        }
    };
    let on_plan = {
        let form = form.clone();
        let plans = plans.clone();
        move |evt: Event<FormData>| {
            let mut next = form.clone();
            match plans.iter().find(|plan| plan.id.as_str() == evt.value()) {
                Some(plan) => next.choose_plan(plan),
                None => next.plan_id.clear(),
            }
            on_change.call(next);
        }
    };

    rsx! {
        div { class: "card",
            h3 { "Record Manual Payment" }
            select {
                value: "{form.user_id}",
                onchange: edit(|form, value| form.user_id = value),
                option { value: "", "Select user" }
                for user in users.iter() {
                    option { key: "{user.id}", value: "{user.id}", "{user.name} ({user.email})" }
                }
            }
            select {
                value: "{form.plan_id}",
                onchange: on_plan,
                option { value: "", "Select plan" }
                for plan in plans.iter().filter(|plan| plan.is_active) {
                    option { key: "{plan.id}", value: "{plan.id}", "{plan.name}" }
                }
            }
            input { value: "{form.amount}", placeholder: "Amount",
                oninput: edit(|form, value| form.amount = value) }
            input { value: "{form.payment_id}", placeholder: "Payment reference (optional)",
                oninput: edit(|form, value| form.payment_id = value) }
            input { value: "{form.notes}", placeholder: "Notes (optional)",
                oninput: edit(|form, value| form.notes = value) }
            button { class: "primary", onclick: move |_| on_save.call(()), "Record Payment" }
        }
    }
}
