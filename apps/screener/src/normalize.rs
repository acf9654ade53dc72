//! Result Normalizer — maps one untrusted candidate record into the stable
//! display view.
//!
//! Total by contract: a missing or malformed sub-field degrades to its
//! sentinel, never to an error, so one incomplete candidate cannot sink the
//! rest of the ranking.

use crate::models::candidate::{CandidateView, CoreSkills, RawCandidate, WorkExperience, Years};

/// Placeholder for an absent score, experience total, or skill list.
pub const UNAVAILABLE: &str = "N/A";
/// Placeholder for a candidate with no scoring rationale.
pub const NO_REASONING: &str = "无评分理由";

/// Normalizes a whole response, preserving the backend's ranking order.
pub fn normalize_ranking(records: &[RawCandidate]) -> Vec<CandidateView> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| normalize_record(record, position))
        .collect()
}

/// Maps one record at `position` within the response sequence. Pure: the same
/// record always yields the same view.
pub fn normalize_record(record: &RawCandidate, position: usize) -> CandidateView {
    CandidateView {
        id: record.resume_index.unwrap_or(position as i64),
        score: record
            .summary_score
            .map(|score| format!("{score:.2}"))
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        years_experience: total_years(record)
            .map(|total| format!("{total:.1}年"))
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        core_skills: escape_markup(&resolve_core_skills(record)),
        reasoning: escape_markup(&resolve_reasoning(record)),
    }
}

/// Sum of parsable experience years. `None` when the record carries no
/// experience entries at all — zero years and no data are different answers.
fn total_years(record: &RawCandidate) -> Option<f64> {
    let experiences = &record
        .plan
        .as_ref()?
        .normalized_resume
        .as_ref()?
        .work_experiences;
    if experiences.is_empty() {
        return None;
    }
    Some(experiences.iter().map(parsed_years).sum())
}

/// An unparsable or absent `years` value contributes zero to the total.
fn parsed_years(experience: &WorkExperience) -> f64 {
    match &experience.years {
        Some(Years::Number(n)) if n.is_finite() => *n,
        Some(Years::Text(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn resolve_core_skills(record: &RawCandidate) -> String {
    match record.parsed_resume.as_ref().and_then(|r| r.core_skills.as_ref()) {
        Some(CoreSkills::List(skills)) => skills.join(", "),
        Some(CoreSkills::Single(text)) => text.clone(),
        None => UNAVAILABLE.to_string(),
    }
}

fn resolve_reasoning(record: &RawCandidate) -> String {
    record
        .report
        .as_ref()
        .and_then(|report| report.ordered_scores.first())
        .and_then(|entry| entry.reasoning.as_deref())
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_REASONING)
        .to_string()
}

/// Escapes the two markup-significant characters the table cares about.
/// `<` first, then `>`; an already-escaped `&lt;` contains neither and is
/// left alone.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}
