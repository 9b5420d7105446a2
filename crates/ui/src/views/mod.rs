mod account;
mod admin;
mod generator;
mod library;
mod plans;
mod practice;
mod results;
mod state;
pub mod toast;
mod transactions;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use account::AccountView;
pub use admin::{AdminAction, AdminUserTable, AdminView};
pub use generator::GeneratorView;
pub use library::{LibraryView, PaperAction, PaperCard};
pub use plans::{PlanGrid, PlansView};
pub use practice::{PracticeView, ReviewPanel};
pub use results::{AttemptTable, ResultsView};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast::{ToastStack, Toasts, use_toasts_provider};
pub use transactions::{TransactionList, TransactionsView};
