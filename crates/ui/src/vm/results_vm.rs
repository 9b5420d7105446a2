use exam_core::model::{AttemptSummary, QuizStats};
use exam_core::time::format_completed_at;

use super::practice_vm::format_percentage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl GradeBand {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            GradeBand::Excellent
        } else if percentage >= 50.0 {
            GradeBand::Good
        } else {
            GradeBand::NeedsImprovement
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GradeBand::Excellent => "Excellent",
            GradeBand::Good => "Good",
            GradeBand::NeedsImprovement => "Needs Improvement",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            GradeBand::Excellent => "grade-excellent",
            GradeBand::Good => "grade-good",
            GradeBand::NeedsImprovement => "grade-low",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub id: String,
    pub paper_id: String,
    pub completed_at_str: String,
    pub score_label: String,
    pub percentage_label: String,
    pub grade: GradeBand,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total_attempts: String,
    pub average_score: String,
    pub highest_score: String,
}

/// Rows for the attempts table, newest first.
#[must_use]
pub fn map_attempt_rows(attempts: &[AttemptSummary]) -> Vec<AttemptRowVm> {
    let mut sorted: Vec<&AttemptSummary> = attempts.iter().collect();
    sorted.sort_by(|left, right| right.completed_at.cmp(&left.completed_at));
    sorted
        .into_iter()
        .map(|attempt| AttemptRowVm {
            id: attempt.id.clone(),
            paper_id: attempt.paper_id.to_string(),
            completed_at_str: format_completed_at(attempt.completed_at),
            score_label: format!("{}/{}", attempt.correct_answers, attempt.total_questions),
            percentage_label: format!("{:.1}%", attempt.percentage),
            grade: GradeBand::from_percentage(attempt.percentage),
        })
        .collect()
}

#[must_use]
pub fn map_stats(stats: &QuizStats) -> StatsVm {
    StatsVm {
        total_attempts: stats.total_attempts.to_string(),
        average_score: format!("{:.1}%", stats.average_score),
        highest_score: format!("{}%", format_percentage(stats.highest_score)),
    }
}
