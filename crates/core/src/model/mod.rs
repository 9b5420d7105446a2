mod admin;
mod answers;
mod attempt;
mod ids;
mod paper;
mod plan;
mod question;
mod review;
mod transaction;
mod user;

pub use ids::{PaperId, ParseIdError, PlanId, QuestionId, TransactionId, UserId};

pub use admin::{AdminStats, UserDetailsUpdate};
pub use answers::{AnswerError, AnswerMap};
pub use attempt::{AnswerKeyEntry, AttemptResult, AttemptSummary, QuizStats};
pub use paper::{Paper, PaperError, PaperSummary};
pub use plan::{
    DEFAULT_CURRENCY, PlanDraft, PlanDraftError, SubscriptionPlan, UNLIMITED_PAPERS,
    features_from_text,
};
pub use question::{Question, QuestionKind, TRUE_FALSE_OPTIONS};
pub use review::{Review, ReviewItem};
pub use transaction::{Transaction, TransactionDraft, TransactionDraftError, TransactionStatus};
pub use user::{UserProfile, UserRole};
