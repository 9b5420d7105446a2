use crate::model::answers::AnswerMap;
use crate::model::attempt::AttemptResult;
use crate::model::ids::QuestionId;
use crate::model::paper::Paper;
use crate::model::question::QuestionKind;

/// One row of the answer-key view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// 1-based position in the paper.
    pub number: usize,
    pub question_id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub user_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

/// Per-question correctness for a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    items: Vec<ReviewItem>,
}

impl Review {
    /// Derives correctness for every question of `paper`.
    ///
    /// A question is correct only when the recorded answer is exactly equal to
    /// the key's `correct_answer`; unanswered questions and questions missing
    /// from the key are incorrect.
    #[must_use]
    pub fn derive(paper: &Paper, answers: &AnswerMap, result: &AttemptResult) -> Self {
        let items = paper
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let key = result.key_for(question.id());
                let user_answer = answers.get(question.id());
                let is_correct = match (user_answer, key) {
                    (Some(given), Some(key)) => given == key.correct_answer,
                    _ => false,
                };
                ReviewItem {
                    number: index + 1,
                    question_id: question.id().clone(),
                    kind: question.kind(),
                    prompt: question.prompt().to_string(),
                    user_answer: user_answer.map(str::to_string),
                    correct_answer: key.map(|key| key.correct_answer.clone()),
                    explanation: key.and_then(|key| key.explanation.clone()),
                    is_correct,
                }
            })
            .collect();

        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_correct).count()
    }

    /// True when the locally derived count matches the score reported by the backend.
    #[must_use]
    pub fn agrees_with(&self, result: &AttemptResult) -> bool {
        u32::try_from(self.correct_count()).is_ok_and(|count| count == result.score)
    }
}
