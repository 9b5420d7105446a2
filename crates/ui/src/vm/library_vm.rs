use exam_core::model::{PaperId, PaperSummary, UserProfile};
use exam_core::time::format_completed_at;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperCardVm {
    pub id: PaperId,
    pub title: String,
    pub meta: String,
    pub topics_label: Option<String>,
    pub marks_label: String,
    pub duration_label: String,
    pub created_label: Option<String>,
}

#[must_use]
pub fn map_paper_card(paper: &PaperSummary) -> PaperCardVm {
    let mut meta = format!("{} • {}", paper.exam_type, paper.subject);
    if let Some(language) = paper.language.as_deref().filter(|lang| !lang.is_empty()) {
        meta.push_str(" • ");
        meta.push_str(language);
    }

    PaperCardVm {
        id: paper.id.clone(),
        title: paper.title.clone(),
        meta,
        topics_label: (!paper.topics.is_empty()).then(|| paper.topics.join(", ")),
        marks_label: format!("{} marks", paper.total_marks),
        duration_label: format!("{} min", paper.duration_minutes),
        created_label: paper.created_at.map(format_completed_at),
    }
}

/// Newest papers first; papers without a timestamp go last.
#[must_use]
pub fn map_paper_cards(papers: &[PaperSummary]) -> Vec<PaperCardVm> {
    let mut sorted: Vec<&PaperSummary> = papers.iter().collect();
    sorted.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    sorted.into_iter().map(map_paper_card).collect()
}

/// Header line describing how many papers the user may still generate.
#[must_use]
pub fn quota_label(user: &UserProfile) -> String {
    match user.remaining_papers() {
        None => "Unlimited papers".to_string(),
        Some(1) => "1 paper remaining".to_string(),
        Some(count) => format!("{count} papers remaining"),
    }
}
