use exam_core::catalog::{self, StreamKind};
use exam_core::model::QuestionKind;
use exam_core::request::{PaperRequest, PaperRequestError};
use services::GeneratorError;

pub const GENERATED_MESSAGE: &str = "Question paper generated successfully!";
const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields";
const NO_QUESTIONS_MESSAGE: &str = "Please add at least one question";
const GENERATE_FAILED_MESSAGE: &str = "Failed to generate paper";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorStep {
    ExamDetails,
    QuestionTypes,
    PaperFormat,
}

impl GeneratorStep {
    pub const ALL: [GeneratorStep; 3] = [
        GeneratorStep::ExamDetails,
        GeneratorStep::QuestionTypes,
        GeneratorStep::PaperFormat,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GeneratorStep::ExamDetails => "Step 1: Exam Details",
            GeneratorStep::QuestionTypes => "Step 2: Question Types",
            GeneratorStep::PaperFormat => "Step 3: Paper Format",
        }
    }

    #[must_use]
    pub fn number(self) -> usize {
        match self {
            GeneratorStep::ExamDetails => 1,
            GeneratorStep::QuestionTypes => 2,
            GeneratorStep::PaperFormat => 3,
        }
    }
}

/// What the generate button should do with the current form.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerateCheck {
    Ready(PaperRequest),
    Rejected(&'static str),
}

/// Form state of the multi-step paper generator.
///
/// Selections cascade: a new exam type clears stream, subject and topics; a
/// new stream clears subject and topics; a new subject clears topics.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorVm {
    step: GeneratorStep,
    request: PaperRequest,
}

impl Default for GeneratorVm {
    fn default() -> Self {
        Self {
            step: GeneratorStep::ExamDetails,
            request: PaperRequest::default(),
        }
    }
}

impl GeneratorVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> GeneratorStep {
        self.step
    }

    #[must_use]
    pub fn request(&self) -> &PaperRequest {
        &self.request
    }

    pub fn next_step(&mut self) {
        self.step = match self.step {
            GeneratorStep::ExamDetails => GeneratorStep::QuestionTypes,
            GeneratorStep::QuestionTypes | GeneratorStep::PaperFormat => GeneratorStep::PaperFormat,
        };
    }

    pub fn prev_step(&mut self) {
        self.step = match self.step {
            GeneratorStep::ExamDetails | GeneratorStep::QuestionTypes => GeneratorStep::ExamDetails,
            GeneratorStep::PaperFormat => GeneratorStep::QuestionTypes,
        };
    }

    pub fn select_exam_type(&mut self, exam_type: &str) {
        self.request.exam_type = exam_type.to_string();
        self.request.stream = None;
        self.request.subject.clear();
        self.request.topics.clear();
    }

    pub fn select_stream(&mut self, stream: &str) {
        self.request.stream = (!stream.is_empty()).then(|| stream.to_string());
        self.request.subject.clear();
        self.request.topics.clear();
    }

    pub fn select_subject(&mut self, subject: &str) {
        self.request.subject = subject.to_string();
        self.request.topics.clear();
    }

    pub fn toggle_topic(&mut self, topic: &str) {
        if let Some(index) = self.request.topics.iter().position(|t| t == topic) {
            self.request.topics.remove(index);
        } else {
            self.request.topics.push(topic.to_string());
        }
    }

    pub fn set_count(&mut self, kind: QuestionKind, count: u32) {
        self.request.question_types.set(kind, count);
    }

    pub fn set_title(&mut self, title: &str) {
        self.request.paper_title = title.to_string();
    }

    pub fn set_language(&mut self, language: &str) {
        self.request.language = language.to_string();
    }

    pub fn set_total_marks(&mut self, marks: u32) {
        self.request.total_marks = marks;
    }

    pub fn set_duration(&mut self, minutes: u32) {
        self.request.duration_minutes = minutes;
    }

    pub fn set_instructions(&mut self, instructions: &str) {
        self.request.instructions = (!instructions.trim().is_empty()).then(|| instructions.to_string());
    }

    pub fn set_school_name(&mut self, name: &str) {
        self.request.school_name = (!name.trim().is_empty()).then(|| name.to_string());
    }

    #[must_use]
    pub fn stream_kind(&self) -> Option<StreamKind> {
        catalog::stream_kind(&self.request.exam_type)
    }

    #[must_use]
    pub fn stream_options(&self) -> &'static [&'static str] {
        catalog::streams(&self.request.exam_type)
    }

    /// Subjects are only offered once a required stream is chosen.
    #[must_use]
    pub fn subject_options(&self) -> &'static [&'static str] {
        if self.request.exam_type.is_empty() {
            return &[];
        }
        if self.stream_kind().is_some() && self.request.stream.is_none() {
            return &[];
        }
        catalog::subjects(
            Some(self.request.exam_type.as_str()),
            self.request.stream.as_deref(),
        )
    }

    #[must_use]
    pub fn topic_options(&self) -> &'static [&'static str] {
        if self.request.subject.is_empty() {
            return &[];
        }
        catalog::topics(&self.request.subject)
    }

    #[must_use]
    pub fn is_topic_selected(&self, topic: &str) -> bool {
        self.request.topics.iter().any(|t| t == topic)
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.request.question_types.total()
    }

    #[must_use]
    pub fn check(&self) -> GenerateCheck {
        match self.request.validate() {
            Ok(()) => GenerateCheck::Ready(self.request.clone()),
            Err(PaperRequestError::NoQuestions) => GenerateCheck::Rejected(NO_QUESTIONS_MESSAGE),
            Err(_) => GenerateCheck::Rejected(MISSING_FIELDS_MESSAGE),
        }
    }
}

/// Toast text for a failed generation; `None` when the limit dialog should show instead.
#[must_use]
pub fn generate_error_message(err: &GeneratorError) -> Option<String> {
    match err {
        GeneratorError::LimitReached(_) => None,
        GeneratorError::Request(PaperRequestError::NoQuestions) => {
            Some(NO_QUESTIONS_MESSAGE.to_string())
        }
        GeneratorError::Request(_) => Some(MISSING_FIELDS_MESSAGE.to_string()),
        GeneratorError::Api(api) => Some(api.user_message(GENERATE_FAILED_MESSAGE)),
        _ => Some(GENERATE_FAILED_MESSAGE.to_string()),
    }
}
