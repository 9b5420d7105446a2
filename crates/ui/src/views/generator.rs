use dioxus::prelude::*;
use dioxus_router::use_navigator;
use exam_core::catalog::{EXAM_TYPES, LANGUAGES};
use exam_core::model::QuestionKind;
use services::{GeneratorError, NotificationSink};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::toast::Toasts;
use crate::vm::{
    GENERATED_MESSAGE, GenerateCheck, GeneratorStep, GeneratorVm, generate_error_message,
};

fn kind_label(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Mcq => "Multiple Choice (MCQ)",
        QuestionKind::ShortAnswer => "Short Answer",
        QuestionKind::TrueFalse => "True/False",
        QuestionKind::Essay => "Essay",
    }
}

fn parse_number(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
pub fn GeneratorView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let navigator = use_navigator();
    let generator = ctx.generator();
    let mut vm = use_signal(GeneratorVm::new);
    let generating = use_signal(|| false);
    let limit_reached = use_signal(|| None::<String>);

    let on_generate = use_callback(move |()| {
        let mut generating = generating;
        let mut limit_reached = limit_reached;
        if *generating.peek() {
            return;
        }
        let request = match vm.read().check() {
            GenerateCheck::Ready(request) => request,
            GenerateCheck::Rejected(message) => {
                toasts.notify_error(message);
                return;
            }
        };

        generating.set(true);
        let generator = generator.clone();
        spawn(async move {
            let outcome = generator.generate(&request).await;
            generating.set(false);
            match outcome {
                Ok(paper) => {
                    tracing::info!(paper_id = %paper.id(), "generated paper ready");
                    toasts.notify_success(GENERATED_MESSAGE);
                    let _ = navigator.push(Route::Library {});
                }
                Err(GeneratorError::LimitReached(detail)) => limit_reached.set(Some(detail)),
                Err(err) => {
                    if let Some(message) = generate_error_message(&err) {
                        toasts.notify_error(&message);
                    }
                }
            }
        });
    });

    let form = vm.read().clone();
    let step = form.step();
    let request = form.request().clone();
    let busy = generating();

    rsx! {
        div { class: "page",
            h2 { "Generate Question Paper" }

            div { class: "steps",
                for candidate in GeneratorStep::ALL {
                    span {
                        key: "{candidate.number()}",
                        class: if candidate == step { "step active" } else { "step" },
                        "{candidate.number()}"
                    }
                }
            }
            h3 { "{step.title()}" }

            if let Some(detail) = limit_reached() {
                div { class: "card limit",
                    h3 { "Paper limit reached" }
                    p { "{detail}" }
                }
            }

            match step {
                GeneratorStep::ExamDetails => rsx! {
                    label { "Exam Type *" }
                    select {
                        value: "{request.exam_type}",
                        onchange: move |evt| vm.write().select_exam_type(&evt.value()),
                        option { value: "", "Select exam type" }
                        for exam in EXAM_TYPES {
                            option { key: "{exam}", value: exam, "{exam}" }
                        }
                    }

                    if let Some(kind) = form.stream_kind() {
                        label { "{kind.label()} *" }
                        select {
                            value: request.stream.clone().unwrap_or_default(),
                            onchange: move |evt| vm.write().select_stream(&evt.value()),
                            option { value: "", "{kind.placeholder()}" }
                            for stream in form.stream_options() {
                                option { key: "{stream}", value: *stream, "{stream}" }
                            }
                        }
                    }

                    label { "Subject *" }
                    select {
                        value: "{request.subject}",
                        disabled: form.subject_options().is_empty(),
                        onchange: move |evt| vm.write().select_subject(&evt.value()),
                        option { value: "", "Select subject" }
                        for subject in form.subject_options() {
                            option { key: "{subject}", value: *subject, "{subject}" }
                        }
                    }

                    if !form.topic_options().is_empty() {
                        label { "Topics" }
                        div { class: "topics",
                            for topic in form.topic_options() {
                                button {
                                    key: "{topic}",
                                    class: if form.is_topic_selected(topic) { "selected" } else { "" },
                                    onclick: move |_| vm.write().toggle_topic(topic),
                                    "{topic}"
                                }
                            }
                        }
                    }

                    label { "Paper Title *" }
                    input {
                        value: "{request.paper_title}",
                        placeholder: "e.g., NEET Mock Test 1",
                        oninput: move |evt| vm.write().set_title(&evt.value()),
                    }

                    label { "Language" }
                    select {
                        value: "{request.language}",
                        onchange: move |evt| vm.write().set_language(&evt.value()),
                        for language in LANGUAGES {
                            option { key: "{language}", value: language, "{language}" }
                        }
                    }
                },
                GeneratorStep::QuestionTypes => rsx! {
                    for kind in QuestionKind::ALL {
                        div { key: "{kind}", class: "count-row",
                            label { "{kind_label(kind)}" }
                            input {
                                r#type: "number",
                                min: "0",
                                value: "{request.question_types.get(kind)}",
                                oninput: move |evt| vm.write().set_count(kind, parse_number(&evt.value())),
                            }
                        }
                    }
                    p { class: "muted", "Total questions: {form.total_questions()}" }

                    label { "Total Marks" }
                    input {
                        r#type: "number",
                        value: "{request.total_marks}",
                        oninput: move |evt| vm.write().set_total_marks(parse_number(&evt.value())),
                    }
                    label { "Duration (minutes)" }
                    input {
                        r#type: "number",
                        value: "{request.duration_minutes}",
                        oninput: move |evt| vm.write().set_duration(parse_number(&evt.value())),
                    }
                },
                GeneratorStep::PaperFormat => rsx! {
                    label { "School / Institute Name" }
                    input {
                        value: request.school_name.clone().unwrap_or_default(),
                        oninput: move |evt| vm.write().set_school_name(&evt.value()),
                    }
                    label { "Instructions" }
                    textarea {
                        rows: "5",
                        value: request.instructions.clone().unwrap_or_default(),
                        oninput: move |evt| vm.write().set_instructions(&evt.value()),
                    }
                },
            }

            nav { class: "step-nav",
                if step != GeneratorStep::ExamDetails {
                    button { onclick: move |_| vm.write().prev_step(), "Previous" }
                }
                if step == GeneratorStep::PaperFormat {
                    button {
                        class: "primary",
                        disabled: busy,
                        onclick: move |_| on_generate.call(()),
                        if busy { "Generating..." } else { "Generate Paper" }
                    }
                } else {
                    button { class: "primary", onclick: move |_| vm.write().next_step(), "Next" }
                }
            }
        }
    }
}
