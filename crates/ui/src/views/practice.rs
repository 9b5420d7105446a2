use dioxus::prelude::*;
use dioxus_router::Link;
use exam_core::model::{PaperId, QuestionId};
use services::QuizSession;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::vm::{
    AnswerInputVm, ChoiceVm, PracticeScreenVm, QuizScreenVm, ReviewVm, map_practice_screen,
};

/// Shown for any fetch failure, not only a missing paper.
const LOAD_FAILED_PANEL: &str = "Could not load this paper";

#[component]
pub fn PracticeView(paper_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let papers = ctx.papers();
    let session = use_signal(|| None::<QuizSession>);

    let papers_for_load = papers.clone();
    let _loader = use_resource(move || {
        let papers = papers_for_load.clone();
        let paper_id = PaperId::new(paper_id.clone());
        let mut session = session;
        async move {
            let started = QuizSession::start(paper_id, papers.as_ref(), &toasts).await;
            session.set(Some(started));
        }
    });

    let on_answer = use_callback(move |(question_id, value): (QuestionId, String)| {
        let mut session = session;
        if let Some(quiz) = session.write().as_mut() {
            if let Err(err) = quiz.record_answer(question_id, value) {
                tracing::warn!(error = %err, "answer not recorded");
            }
        }
    });

    let on_step = use_callback(move |forward: bool| {
        let mut session = session;
        if let Some(quiz) = session.write().as_mut() {
            let moved = if forward { quiz.advance() } else { quiz.retreat() };
            if let Err(err) = moved {
                tracing::debug!(error = %err, "navigation ignored");
            }
        }
    });

    let on_submit = use_callback(move |()| {
        let mut session = session;
        let begun = match session.write().as_mut() {
            Some(quiz) => quiz.begin_submit(&toasts),
            None => return,
        };
        let Ok(pending) = begun else {
            return;
        };
        let papers = papers.clone();
        spawn(async move {
            let outcome = pending.send(papers.as_ref()).await;
            if let Some(quiz) = session.write().as_mut() {
                if let Err(err) = quiz.complete_submit(outcome, &toasts) {
                    tracing::debug!(error = %err, "submission not applied");
                }
            }
        });
    });

    let screen = session
        .read()
        .as_ref()
        .map_or(PracticeScreenVm::Loading, map_practice_screen);

    rsx! {
        div { class: "page",
            match screen {
                PracticeScreenVm::Loading => rsx! {
                    p { "Loading paper..." }
                },
                PracticeScreenVm::LoadFailed => rsx! {
                    div { class: "card",
                        p { "{LOAD_FAILED_PANEL}" }
                        Link { to: Route::Library {}, "Back to papers" }
                    }
                },
                PracticeScreenVm::Quiz(screen) => rsx! {
                    QuizPanel { screen, on_answer, on_step, on_submit }
                },
                PracticeScreenVm::Review(review) => rsx! {
                    ReviewPanel { review }
                },
            }
        }
    }
}

#[component]
fn QuizPanel(
    screen: QuizScreenVm,
    on_answer: Callback<(QuestionId, String)>,
    on_step: Callback<bool>,
    on_submit: Callback<()>,
) -> Element {
    let question_id = screen.question_id.clone();

    rsx! {
        header {
            h2 { "{screen.title}" }
            p { class: "muted", "{screen.subtitle}" }
            div { class: "progress-meta",
                span { "{screen.progress_label}" }
                span { class: "muted", "{screen.answered_label}" }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {screen.progress_percent}%" }
            }
        }

        section { class: "card question",
            div {
                span { class: "badge", "{screen.badge}" }
                if let Some(marks) = screen.marks_label.clone() {
                    span { class: "badge", "{marks}" }
                }
            }
            h3 { "{screen.prompt}" }

            match screen.input.clone() {
                AnswerInputVm::Choices(choices) => rsx! {
                    for choice in choices {
                        ChoiceButton {
                            key: "{choice.value}",
                            choice,
                            question_id: question_id.clone(),
                            on_answer,
                        }
                    }
                },
                AnswerInputVm::Text { value, rows } => rsx! {
                    textarea {
                        class: "answer-text",
                        rows: "{rows}",
                        value: "{value}",
                        placeholder: "Type your answer here...",
                        oninput: move |evt| on_answer.call((question_id.clone(), evt.value())),
                    }
                },
            }
        }

        nav { class: "quiz-nav",
            button {
                disabled: !screen.can_retreat,
                onclick: move |_| on_step.call(false),
                "Previous"
            }
            if screen.show_submit {
                button {
                    class: "primary",
                    disabled: screen.submitting,
                    onclick: move |_| on_submit.call(()),
                    if screen.submitting { "Submitting..." } else { "Submit Quiz" }
                }
            } else {
                button {
                    class: "primary",
                    disabled: !screen.can_advance,
                    onclick: move |_| on_step.call(true),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(
    choice: ChoiceVm,
    question_id: QuestionId,
    on_answer: Callback<(QuestionId, String)>,
) -> Element {
    let class = if choice.selected { "choice selected" } else { "choice" };
    let value = choice.value.clone();

    rsx! {
        button {
            class,
            onclick: move |_| on_answer.call((question_id.clone(), value.clone())),
            "{choice.label}"
        }
    }
}

/// Score card followed by the per-question answer key.
#[component]
pub fn ReviewPanel(review: ReviewVm) -> Element {
    rsx! {
        section { class: "card score",
            h2 { "Quiz Results" }
            div { class: "score-value", "{review.percentage_label}" }
            p { "Score: {review.score_label}" }
            p { class: "muted", "{review.correct_label}" }
            if let Some(note) = review.score_note {
                p { class: "muted score-note", "{note}" }
            }
        }

        h3 { "Answer Key" }
        ol { class: "review",
            for row in review.rows {
                li {
                    key: "{row.heading}",
                    class: row.class(),
                    div {
                        strong { "{row.heading}" }
                        span { class: "badge", "{row.badge}" }
                        span { class: "verdict",
                            if row.is_correct { "Correct" } else { "Incorrect" }
                        }
                    }
                    p { "{row.prompt}" }
                    p { "Your answer: {row.user_answer}" }
                    p { "Correct answer: {row.correct_answer}" }
                    if let Some(explanation) = row.explanation {
                        p { class: "muted", "Explanation: {explanation}" }
                    }
                }
            }
        }

        Link { to: Route::Results {}, "View all results" }
    }
}
