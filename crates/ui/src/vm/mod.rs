mod admin_vm;
mod generator_vm;
mod library_vm;
mod plans_vm;
mod practice_vm;
mod results_vm;
mod transactions_vm;

pub use admin_vm::{
    ADMIN_REQUIRED_MESSAGE, AdminPlanCardVm, AdminStatsVm, AdminTab, AdminUserRowVm,
    PlanFormVm, TransactionFormVm, UserEditVm, map_admin_plan_cards, map_admin_stats,
    map_user_rows, status_changed_message,
};
pub use generator_vm::{
    GENERATED_MESSAGE, GenerateCheck, GeneratorStep, GeneratorVm, generate_error_message,
};
pub use library_vm::{PaperCardVm, map_paper_card, map_paper_cards, quota_label};
pub use plans_vm::{
    PlanCardVm, PlanSummaryVm, amount_label, map_plan_cards, map_plan_summary,
    papers_limit_label, period_label,
};
pub use practice_vm::{
    AnswerInputVm, ChoiceVm, PracticeScreenVm, QuizScreenVm, ReviewRowVm, ReviewVm,
    map_practice_screen, map_quiz_screen, map_review,
};
pub use results_vm::{AttemptRowVm, GradeBand, StatsVm, map_attempt_rows, map_stats};
pub use transactions_vm::{TransactionRowVm, map_transaction_row, map_transaction_rows};
