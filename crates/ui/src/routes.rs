use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{
    AccountView, AdminView, GeneratorView, LibraryView, PlansView, PracticeView, ResultsView,
    ToastStack, TransactionsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LibraryView)] Library {},
        #[route("/practice/:paper_id", PracticeView)] Practice { paper_id: String },
        #[route("/generate", GeneratorView)] Generator {},
        #[route("/results", ResultsView)] Results {},
        #[route("/plans", PlansView)] Plans {},
        #[route("/transactions", TransactionsView)] Transactions {},
        #[route("/account", AccountView)] Account {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            ToastStack {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let greeting = ctx.user().map(|user| format!("Hi, {}", user.name));
    let is_admin = ctx.is_admin();

    rsx! {
        nav { class: "sidebar",
            h1 { "ExamAI" }
            if let Some(greeting) = greeting {
                p { class: "muted", "{greeting}" }
            }
            ul {
                li { Link { to: Route::Library {}, "My Papers" } }
                li { Link { to: Route::Generator {}, "Generate" } }
                li { Link { to: Route::Results {}, "Results" } }
                li { Link { to: Route::Plans {}, "Plans" } }
                li { Link { to: Route::Transactions {}, "Transactions" } }
                li { Link { to: Route::Account {}, "Account" } }
                if is_admin {
                    li { Link { to: Route::Admin {}, "Admin" } }
                }
            }
        }
    }
}
