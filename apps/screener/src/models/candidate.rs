//! Candidate records as the backend returns them, and the display view the
//! table consumes.
//!
//! Everything in `RawCandidate` is optional: the backend assembles these
//! records from several LLM passes and individual sections regularly come
//! back missing or in a different primitive type. Each nested level gets its
//! own struct with explicit defaults so field resolution happens in one place
//! (the normalizer) instead of ad hoc probing at render time.

use serde::{Deserialize, Serialize};

/// One scored candidate, untrusted and partially populated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCandidate {
    /// Identity within this result set; absent records fall back to their
    /// position in the response.
    pub resume_index: Option<i64>,
    /// The backend's scalar overall match score.
    pub summary_score: Option<f64>,
    pub report: Option<Report>,
    pub plan: Option<Plan>,
    pub parsed_resume: Option<ParsedResume>,
}

/// Ranked scoring rationale; only the first entry is surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Report {
    pub ordered_scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreEntry {
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub normalized_resume: Option<NormalizedResume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizedResume {
    pub work_experiences: Vec<WorkExperience>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub years: Option<Years>,
}

/// The extractor emits `years` as a number or as free text, depending on
/// which model produced the section.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Years {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    pub core_skills: Option<CoreSkills>,
}

/// Skill attribution arrives as a list or as a single pre-joined string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CoreSkills {
    List(Vec<String>),
    Single(String),
}

/// The one shape the presentation layer consumes. Built fresh per submission
/// and replaced, never merged, across submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub id: i64,
    pub score: String,
    pub years_experience: String,
    pub core_skills: String,
    pub reasoning: String,
}
