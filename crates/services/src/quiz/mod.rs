//! Practice quiz state machine.

mod session;

pub use session::{PendingSubmission, QuizPhase, QuizSession};
