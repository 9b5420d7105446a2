use std::fmt;

use exam_core::model::{AnswerMap, AttemptResult, Paper, PaperId, Question, QuestionId, Review};

use crate::error::{ApiError, QuizError};
use crate::notify::NotificationSink;
use crate::paper_service::PaperService;

const LOAD_FAILED_MESSAGE: &str = "Failed to load paper";
const NO_ANSWERS_MESSAGE: &str = "Please answer at least one question";
const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit quiz";
const SUBMITTED_MESSAGE: &str = "Quiz submitted successfully!";

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a practice attempt.
///
/// `Loading -> InProgress -> Submitting -> Reviewing`, with `LoadFailed` as a
/// terminal state reachable only from `Loading`. A failed submission moves
/// `Submitting` back to `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    LoadFailed,
    InProgress,
    Submitting,
    Reviewing,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuizPhase::Loading => "loading",
            QuizPhase::LoadFailed => "load failed",
            QuizPhase::InProgress => "in progress",
            QuizPhase::Submitting => "submitting",
            QuizPhase::Reviewing => "reviewing",
        };
        f.write_str(label)
    }
}

//
// ─── PENDING SUBMISSION ────────────────────────────────────────────────────────
//

/// Snapshot of the answers being submitted, handed out by
/// [`QuizSession::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    paper_id: PaperId,
    answers: AnswerMap,
}

impl PendingSubmission {
    #[must_use]
    pub fn paper_id(&self) -> &PaperId {
        &self.paper_id
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Send the snapshot to the backend for scoring.
    ///
    /// # Errors
    ///
    /// Propagates the `ApiError` returned by `papers`.
    pub async fn send(&self, papers: &dyn PaperService) -> Result<AttemptResult, ApiError> {
        papers.submit_answers(&self.paper_id, &self.answers).await
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One practice attempt over a fetched paper.
///
/// All mutation goes through `load`, `record_answer`, `advance`, `retreat`
/// and the submit operations; everything else is a read-only view.
pub struct QuizSession {
    paper_id: PaperId,
    phase: QuizPhase,
    paper: Option<Paper>,
    current: usize,
    answers: AnswerMap,
    result: Option<AttemptResult>,
}

impl QuizSession {
    /// A session that has not fetched its paper yet.
    #[must_use]
    pub fn new(paper_id: PaperId) -> Self {
        Self {
            paper_id,
            phase: QuizPhase::Loading,
            paper: None,
            current: 0,
            answers: AnswerMap::new(),
            result: None,
        }
    }

    /// Create a session and immediately load its paper.
    ///
    /// The returned session is either `InProgress` or `LoadFailed`.
    pub async fn start(
        paper_id: PaperId,
        papers: &dyn PaperService,
        notifier: &dyn NotificationSink,
    ) -> Self {
        let mut session = Self::new(paper_id);
        // A fresh session is always in `Loading`, so the only error left is the
        // fetch failure, which `load` has already reported.
        let _ = session.load(papers, notifier).await;
        session
    }

    /// Fetch the paper and enter `InProgress`.
    ///
    /// No retry is attempted; on failure the session becomes `LoadFailed` and
    /// the user is notified once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` outside `Loading`, or `QuizError::Api`
    /// when the fetch fails.
    pub async fn load(
        &mut self,
        papers: &dyn PaperService,
        notifier: &dyn NotificationSink,
    ) -> Result<(), QuizError> {
        self.expect_phase(QuizPhase::Loading)?;

        match papers.fetch_paper(&self.paper_id).await {
            Ok(paper) => {
                tracing::info!(
                    paper_id = %self.paper_id,
                    questions = paper.question_count(),
                    "quiz loaded"
                );
                self.paper = Some(paper);
                self.current = 0;
                self.answers = AnswerMap::new();
                self.phase = QuizPhase::InProgress;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(paper_id = %self.paper_id, error = %err, "quiz load failed");
                self.phase = QuizPhase::LoadFailed;
                notifier.notify_error(LOAD_FAILED_MESSAGE);
                Err(err.into())
            }
        }
    }

    #[must_use]
    pub fn paper_id(&self) -> &PaperId {
        &self.paper_id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn paper(&self) -> Option<&Paper> {
        self.paper.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.paper.as_ref()?.question(self.current)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.paper.as_ref().map_or(0, Paper::question_count)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.question_count()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&str> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    /// Record (or overwrite) the answer to a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` outside `InProgress` and
    /// `QuizError::Answer` if the question is not part of the paper.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), QuizError> {
        self.expect_phase(QuizPhase::InProgress)?;
        let Some(paper) = self.paper.as_ref() else {
            return Err(QuizError::InvalidPhase(self.phase));
        };
        self.answers.record(paper, question_id, value)?;
        Ok(())
    }

    /// Move to the next question. At the last question this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` outside `InProgress`.
    pub fn advance(&mut self) -> Result<usize, QuizError> {
        self.expect_phase(QuizPhase::InProgress)?;
        let last = self.question_count().saturating_sub(1);
        self.current = (self.current + 1).min(last);
        Ok(self.current)
    }

    /// Move to the previous question. At the first question this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` outside `InProgress`.
    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        self.expect_phase(QuizPhase::InProgress)?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// First half of a submission: validate and enter `Submitting`.
    ///
    /// While a submission is outstanding every further call is rejected, so
    /// rapid repeated submits produce a single network request.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitting` while `Submitting`,
    /// `QuizError::NoAnswers` (after notifying the user) when nothing has been
    /// answered, and `QuizError::InvalidPhase` in any other phase.
    pub fn begin_submit(
        &mut self,
        notifier: &dyn NotificationSink,
    ) -> Result<PendingSubmission, QuizError> {
        if self.phase == QuizPhase::Submitting {
            tracing::debug!(paper_id = %self.paper_id, "duplicate submit ignored");
            return Err(QuizError::AlreadySubmitting);
        }
        self.expect_phase(QuizPhase::InProgress)?;
        if self.answers.is_empty() {
            notifier.notify_error(NO_ANSWERS_MESSAGE);
            return Err(QuizError::NoAnswers);
        }

        self.phase = QuizPhase::Submitting;
        tracing::info!(
            paper_id = %self.paper_id,
            answered = self.answers.len(),
            "quiz submitting"
        );
        Ok(PendingSubmission {
            paper_id: self.paper_id.clone(),
            answers: self.answers.clone(),
        })
    }

    /// Second half of a submission: apply the backend outcome.
    ///
    /// Success stores the result and enters `Reviewing`; failure returns to
    /// `InProgress` with the answers untouched. Either way the user is notified
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` when no submission is outstanding, or
    /// `QuizError::Api` carrying the submission failure.
    pub fn complete_submit(
        &mut self,
        outcome: Result<AttemptResult, ApiError>,
        notifier: &dyn NotificationSink,
    ) -> Result<(), QuizError> {
        self.expect_phase(QuizPhase::Submitting)?;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    paper_id = %self.paper_id,
                    score = result.score,
                    total = result.total_questions,
                    "quiz scored"
                );
                self.result = Some(result);
                self.phase = QuizPhase::Reviewing;
                self.warn_if_review_disagrees();
                notifier.notify_success(SUBMITTED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(paper_id = %self.paper_id, error = %err, "quiz submit failed");
                self.phase = QuizPhase::InProgress;
                notifier.notify_error(&err.user_message(SUBMIT_FAILED_MESSAGE));
                Err(err.into())
            }
        }
    }

    /// The backend grades with fuzzy matching, so its score can differ from
    /// the exact comparison behind the review rows.
    fn warn_if_review_disagrees(&self) {
        let (Some(review), Some(result)) = (self.review(), self.result.as_ref()) else {
            return;
        };
        if !review.agrees_with(result) {
            tracing::warn!(
                paper_id = %self.paper_id,
                server_score = result.score,
                matched = review.correct_count(),
                "review disagrees with server score"
            );
        }
    }

    /// Validate, send and apply a submission in one call.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::begin_submit`] and [`QuizSession::complete_submit`].
    pub async fn submit(
        &mut self,
        papers: &dyn PaperService,
        notifier: &dyn NotificationSink,
    ) -> Result<(), QuizError> {
        let pending = self.begin_submit(notifier)?;
        let outcome = pending.send(papers).await;
        self.complete_submit(outcome, notifier)
    }

    /// Per-question correctness, derived fresh from the current answers.
    ///
    /// `None` until the attempt has been scored.
    #[must_use]
    pub fn review(&self) -> Option<Review> {
        if self.phase != QuizPhase::Reviewing {
            return None;
        }
        let paper = self.paper.as_ref()?;
        let result = self.result.as_ref()?;
        Some(Review::derive(paper, &self.answers, result))
    }

    fn expect_phase(&self, expected: QuizPhase) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidPhase(self.phase))
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("paper_id", &self.paper_id)
            .field("phase", &self.phase)
            .field("questions", &self.question_count())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("has_result", &self.result.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use exam_core::model::{AnswerKeyEntry, QuestionKind};

    use super::*;

    struct FakePapers {
        paper: Result<Paper, ApiError>,
        outcome: Result<AttemptResult, ApiError>,
        submitted: Mutex<Vec<AnswerMap>>,
    }

    impl FakePapers {
        fn new(outcome: Result<AttemptResult, ApiError>) -> Self {
            Self {
                paper: Ok(sample_paper()),
                outcome,
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn failing_fetch(err: ApiError) -> Self {
            Self {
                paper: Err(err),
                outcome: Ok(sample_result()),
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submit_calls(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PaperService for FakePapers {
        async fn fetch_paper(&self, _paper_id: &PaperId) -> Result<Paper, ApiError> {
            self.paper.clone()
        }

        async fn submit_answers(
            &self,
            _paper_id: &PaperId,
            answers: &AnswerMap,
        ) -> Result<AttemptResult, ApiError> {
            self.submitted.lock().unwrap().push(answers.clone());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        successes: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify_success(&self, message: &str) {
            self.successes.borrow_mut().push(message.to_string());
        }

        fn notify_error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn sample_paper() -> Paper {
        Paper::new(
            PaperId::new("p1"),
            "Biology Mock",
            "NEET",
            "Biology",
            vec![
                Question::mcq(
                    QuestionId::new("q1"),
                    "Powerhouse of the cell?",
                    Some(4),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                ),
                Question::new(
                    QuestionId::new("q2"),
                    QuestionKind::TrueFalse,
                    "DNA is single stranded.",
                    Some(1),
                ),
            ],
            5,
            10,
        )
        .unwrap()
    }

    fn sample_result() -> AttemptResult {
        AttemptResult {
            score: 1,
            total_questions: 2,
            percentage: 50.0,
            answer_key: vec![
                AnswerKeyEntry {
                    question_id: QuestionId::new("q1"),
                    correct_answer: "B".into(),
                    explanation: None,
                },
                AnswerKeyEntry {
                    question_id: QuestionId::new("q2"),
                    correct_answer: "False".into(),
                    explanation: Some("It is double stranded.".into()),
                },
            ],
        }
    }

    async fn started(papers: &FakePapers, sink: &RecordingSink) -> QuizSession {
        let session = QuizSession::start(PaperId::new("p1"), papers, sink).await;
        assert_eq!(session.phase(), QuizPhase::InProgress);
        session
    }

    #[tokio::test(flavor = "current_thread")]
    async fn load_enters_first_question_with_no_answers() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let session = started(&papers, &sink).await;

        assert_eq!(session.current_index(), 0);
        assert!(session.is_first());
        assert!(session.answers().is_empty());
        assert_eq!(session.current_question().unwrap().id().as_str(), "q1");
        assert!(sink.errors.borrow().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn load_failure_notifies_once_and_stops() {
        let papers = FakePapers::failing_fetch(ApiError::Network("connection refused".into()));
        let sink = RecordingSink::default();
        let mut session = QuizSession::start(PaperId::new("p1"), &papers, &sink).await;

        assert_eq!(session.phase(), QuizPhase::LoadFailed);
        assert_eq!(*sink.errors.borrow(), vec!["Failed to load paper".to_string()]);
        assert!(session.paper().is_none());

        let err = session.load(&papers, &sink).await.unwrap_err();
        assert_eq!(err, QuizError::InvalidPhase(QuizPhase::LoadFailed));
        assert_eq!(sink.errors.borrow().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn answers_keep_last_write_per_question() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;

        for (id, value) in [("q1", "A"), ("q2", "True"), ("q1", "C"), ("q1", "B")] {
            session.record_answer(QuestionId::new(id), value).unwrap();
        }
        assert_eq!(session.answered_count(), 2);
        assert_eq!(session.answer_for(&QuestionId::new("q1")), Some("B"));
        assert_eq!(session.answer_for(&QuestionId::new("q2")), Some("True"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unknown_question_is_rejected() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;

        let err = session
            .record_answer(QuestionId::new("q9"), "A")
            .unwrap_err();
        assert!(matches!(err, QuizError::Answer(_)));
        assert!(session.answers().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn navigation_is_clamped_to_the_paper() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;

        assert_eq!(session.retreat().unwrap(), 0);
        assert_eq!(session.advance().unwrap(), 1);
        assert!(session.is_last());
        assert_eq!(session.advance().unwrap(), 1);
        assert_eq!(session.advance().unwrap(), 1);
        assert_eq!(session.retreat().unwrap(), 0);
        assert_eq!(session.retreat().unwrap(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn single_question_paper_stays_put() {
        let single = Paper::new(
            PaperId::new("p1"),
            "One Shot",
            "NEET",
            "Biology",
            vec![Question::new(
                QuestionId::new("q1"),
                QuestionKind::TrueFalse,
                "Mitochondria have their own DNA.",
                Some(1),
            )],
            1,
            5,
        )
        .unwrap();
        let papers = FakePapers {
            paper: Ok(single),
            ..FakePapers::new(Ok(sample_result()))
        };
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;

        assert!(session.is_first() && session.is_last());
        assert_eq!(session.advance().unwrap(), 0);
        assert_eq!(session.retreat().unwrap(), 0);
        assert!(session.is_first() && session.is_last());
        assert_eq!(session.current_question().unwrap().id(), &QuestionId::new("q1"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_submit_is_a_validation_error() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;

        for _ in 0..2 {
            let err = session.submit(&papers, &sink).await.unwrap_err();
            assert_eq!(err, QuizError::NoAnswers);
            assert!(err.is_validation());
            assert_eq!(session.phase(), QuizPhase::InProgress);
        }
        assert_eq!(sink.errors.borrow().len(), 2);
        assert_eq!(sink.errors.borrow()[0], "Please answer at least one question");
        assert_eq!(papers.submit_calls(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn second_submit_while_in_flight_makes_no_request() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;
        session.record_answer(QuestionId::new("q1"), "B").unwrap();

        let pending = session.begin_submit(&sink).unwrap();
        assert_eq!(session.phase(), QuizPhase::Submitting);
        assert_eq!(
            session.begin_submit(&sink).unwrap_err(),
            QuizError::AlreadySubmitting
        );
        assert_eq!(
            session.submit(&papers, &sink).await.unwrap_err(),
            QuizError::AlreadySubmitting
        );
        assert!(matches!(
            session.record_answer(QuestionId::new("q2"), "True"),
            Err(QuizError::InvalidPhase(QuizPhase::Submitting))
        ));

        let outcome = pending.send(&papers).await;
        session.complete_submit(outcome, &sink).unwrap();

        assert_eq!(papers.submit_calls(), 1);
        assert_eq!(session.phase(), QuizPhase::Reviewing);
        assert!(sink.errors.borrow().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn successful_submit_enters_review() {
        let papers = FakePapers::new(Ok(sample_result()));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;
        assert!(session.review().is_none());

        session.record_answer(QuestionId::new("q1"), "B").unwrap();
        session.record_answer(QuestionId::new("q2"), "True").unwrap();
        session.submit(&papers, &sink).await.unwrap();

        assert_eq!(session.phase(), QuizPhase::Reviewing);
        assert_eq!(
            *sink.successes.borrow(),
            vec!["Quiz submitted successfully!".to_string()]
        );
        let review = session.review().unwrap();
        let marks: Vec<bool> = review.items().iter().map(|item| item.is_correct).collect();
        assert_eq!(marks, vec![true, false]);
        assert_eq!(review.correct_count(), 1);
        assert!(review.agrees_with(session.result().unwrap()));
        assert!(session.advance().is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejected_submit_keeps_answers() {
        let papers = FakePapers::new(Err(ApiError::Validation("Paper not found".into())));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;
        session.record_answer(QuestionId::new("q1"), "B").unwrap();
        let before = session.answers().clone();

        let err = session.submit(&papers, &sink).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.answers(), &before);
        assert_eq!(*sink.errors.borrow(), vec!["Paper not found".to_string()]);
        assert!(session.result().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn network_failure_uses_generic_message() {
        let papers = FakePapers::new(Err(ApiError::Network("timed out".into())));
        let sink = RecordingSink::default();
        let mut session = started(&papers, &sink).await;
        session.record_answer(QuestionId::new("q2"), "False").unwrap();

        session.submit(&papers, &sink).await.unwrap_err();
        assert_eq!(*sink.errors.borrow(), vec!["Failed to submit quiz".to_string()]);

        // Answers survive, so a retry goes through.
        let retry = FakePapers::new(Ok(sample_result()));
        session.submit(&retry, &sink).await.unwrap();
        assert_eq!(retry.submit_calls(), 1);
        assert_eq!(session.phase(), QuizPhase::Reviewing);
    }
}
