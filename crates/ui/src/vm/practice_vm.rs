use exam_core::model::{AttemptResult, QuestionId, QuestionKind, Review};
use services::{QuizPhase, QuizSession};

/// How the current question accepts an answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInputVm {
    Choices(Vec<ChoiceVm>),
    Text { value: String, rows: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    /// Recorded verbatim when picked.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Everything the practice page renders while a quiz is in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub title: String,
    pub subtitle: String,
    pub progress_label: String,
    pub progress_percent: u32,
    pub answered_label: String,
    pub question_id: QuestionId,
    pub badge: String,
    pub prompt: String,
    pub marks_label: Option<String>,
    pub input: AnswerInputVm,
    pub can_retreat: bool,
    pub can_advance: bool,
    pub show_submit: bool,
    pub submitting: bool,
}

#[must_use]
pub fn map_quiz_screen(session: &QuizSession) -> Option<QuizScreenVm> {
    let submitting = match session.phase() {
        QuizPhase::InProgress => false,
        QuizPhase::Submitting => true,
        QuizPhase::Loading | QuizPhase::LoadFailed | QuizPhase::Reviewing => return None,
    };
    let paper = session.paper()?;
    let question = session.current_question()?;
    let total = paper.question_count();
    let position = session.current_index() + 1;
    let current = session.answer_for(question.id());

    let input = if question.kind().is_free_text() {
        AnswerInputVm::Text {
            value: current.unwrap_or_default().to_string(),
            rows: if question.kind() == QuestionKind::Essay { 6 } else { 4 },
        }
    } else {
        AnswerInputVm::Choices(
            question
                .choices()
                .unwrap_or_default()
                .into_iter()
                .map(|option| ChoiceVm {
                    value: option.to_string(),
                    label: option.to_string(),
                    selected: current == Some(option),
                })
                .collect(),
        )
    };

    let percent = position * 100 / total.max(1);

    Some(QuizScreenVm {
        title: paper.title().to_string(),
        subtitle: format!("{} • {}", paper.exam_type(), paper.subject()),
        progress_label: format!("Question {position} of {total}"),
        progress_percent: u32::try_from(percent).unwrap_or(100),
        answered_label: format!("{} answered", session.answered_count()),
        question_id: question.id().clone(),
        badge: question.kind().badge(),
        prompt: question.prompt().to_string(),
        marks_label: question.marks().map(|marks| format!("{marks} marks")),
        input,
        can_retreat: !session.is_first() && !submitting,
        can_advance: !session.is_last() && !submitting,
        show_submit: session.is_last(),
        submitting,
    })
}

/// Which panel the practice page shows for a session.
#[derive(Clone, Debug, PartialEq)]
pub enum PracticeScreenVm {
    Loading,
    LoadFailed,
    Quiz(QuizScreenVm),
    Review(ReviewVm),
}

#[must_use]
pub fn map_practice_screen(session: &QuizSession) -> PracticeScreenVm {
    match session.phase() {
        QuizPhase::Loading => PracticeScreenVm::Loading,
        QuizPhase::LoadFailed => PracticeScreenVm::LoadFailed,
        QuizPhase::InProgress | QuizPhase::Submitting => map_quiz_screen(session)
            .map_or(PracticeScreenVm::LoadFailed, PracticeScreenVm::Quiz),
        QuizPhase::Reviewing => match (session.review(), session.result()) {
            (Some(review), Some(result)) => PracticeScreenVm::Review(map_review(&review, result)),
            _ => PracticeScreenVm::LoadFailed,
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub heading: String,
    pub badge: String,
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

impl ReviewRowVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.is_correct {
            "card review-item correct"
        } else {
            "card review-item incorrect"
        }
    }
}

/// Score card and answer key shown once an attempt is scored.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewVm {
    pub percentage_label: String,
    pub score_label: String,
    pub correct_label: String,
    /// Set when the server's fuzzy grading credited answers the exact
    /// comparison in `rows` did not, or the other way round.
    pub score_note: Option<String>,
    pub rows: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_review(review: &Review, result: &AttemptResult) -> ReviewVm {
    let rows = review
        .items()
        .iter()
        .map(|item| ReviewRowVm {
            heading: format!("Question {}", item.number),
            badge: item.kind.badge(),
            prompt: item.prompt.clone(),
            user_answer: item
                .user_answer
                .clone()
                .unwrap_or_else(|| "Not answered".to_string()),
            correct_answer: item
                .correct_answer
                .clone()
                .unwrap_or_else(|| "Not available".to_string()),
            explanation: item.explanation.clone(),
            is_correct: item.is_correct,
        })
        .collect();

    ReviewVm {
        percentage_label: format!("{}%", format_percentage(result.percentage)),
        score_label: format!("{} / {}", result.score, result.total_questions),
        correct_label: format!("{} correct", review.correct_count()),
        score_note: (!review.agrees_with(result)).then(|| {
            format!(
                "Your score of {} uses the server's answer matching; {} of your answers match the key exactly.",
                result.score,
                review.correct_count()
            )
        }),
        rows,
    }
}

/// One decimal place, trailing `.0` dropped.
pub(crate) fn format_percentage(value: f64) -> String {
    let rounded = format!("{value:.1}");
    rounded
        .strip_suffix(".0")
        .map_or_else(|| rounded.clone(), str::to_string)
}
