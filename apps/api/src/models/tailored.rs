use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An achievement after scoring, immutable once produced.
///
/// `final_score` is always the weighted sum of the four component scores
/// under the engine's configured weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAccomplishment {
    pub id: Uuid,
    pub text: String,
    pub role_title: String,
    pub employer_name: String,
    pub role_is_current: bool,
    pub final_score: f64,
    pub skill_match_score: f64,
    pub semantic_score: f64,
    pub recency_score: f64,
    pub metrics_score: f64,
    /// Requirement skills found in the text, lowercased, insertion order.
    pub matched_skills: Vec<String>,
    /// Display-only explanations; never fed back into scoring.
    pub reasons: Vec<String>,
}

/// Output of one tailoring run. Read-only value data, serializable as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResumeResult {
    /// Selection order: current-role picks first, then the best of the rest.
    pub selected: Vec<ScoredAccomplishment>,
    pub skill_coverage: HashMap<String, bool>,
    pub coverage_percentage: f64,
    /// Uncovered skills, required before preferred.
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
    /// Coarse whole-resume aggregate, distinct from per-item scores.
    pub match_score: f64,
}
