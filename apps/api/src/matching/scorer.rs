//! Accomplishment Scorer — combines the four component scores under the
//! configured weights and emits display-only reasons.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::achievement::AchievementRecord;
use crate::models::tailored::ScoredAccomplishment;

/// Weights must sum to 1.0 within this tolerance.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-5;

/// Relative weights of the four component scores.
///
/// Owned by the engine instance; validated at construction so an invalid
/// configuration never reaches scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill: f64,
    pub semantic: f64,
    pub recency: f64,
    pub metrics: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            semantic: 0.3,
            recency: 0.2,
            metrics: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Rejects negative components and sums off 1.0 beyond the tolerance.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.skill < 0.0 || self.semantic < 0.0 || self.recency < 0.0 || self.metrics < 0.0 {
            return Err(AppError::Validation(
                "score weights must be non-negative".to_string(),
            ));
        }
        let sum = self.skill + self.semantic + self.recency + self.metrics;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::Validation(format!(
                "score weights must sum to 1.0, got {sum:.6}"
            )));
        }
        Ok(())
    }
}

/// The four component scores produced upstream of weighting, each in [0,1].
#[derive(Debug, Clone, Copy)]
pub struct ComponentScores {
    pub skill: f64,
    pub semantic: f64,
    pub recency: f64,
    pub metrics: f64,
}

/// Folds the component scores into a `ScoredAccomplishment`.
pub fn score_accomplishment(
    record: &AchievementRecord,
    components: ComponentScores,
    matched_skills: Vec<String>,
    weights: &ScoreWeights,
) -> ScoredAccomplishment {
    let final_score = (weights.skill * components.skill
        + weights.semantic * components.semantic
        + weights.recency * components.recency
        + weights.metrics * components.metrics)
        .clamp(0.0, 1.0);

    let reasons = build_reasons(record, components, &matched_skills);

    ScoredAccomplishment {
        id: record.id,
        text: record.text.clone(),
        role_title: record.role_title.clone(),
        employer_name: record.employer_name.clone(),
        role_is_current: record.role_is_current,
        final_score,
        skill_match_score: components.skill,
        semantic_score: components.semantic,
        recency_score: components.recency,
        metrics_score: components.metrics,
        matched_skills,
        reasons,
    }
}

const STRONG_SKILL_THRESHOLD: f64 = 0.7;
const MODERATE_SKILL_THRESHOLD: f64 = 0.4;
const STRONG_SEMANTIC_THRESHOLD: f64 = 0.7;
const RECENT_ROLE_THRESHOLD: f64 = 0.8;
const QUANTIFIED_THRESHOLD: f64 = 0.75;

/// Templated, threshold-driven explanations for UI display. Fixed emission
/// order keeps output deterministic.
fn build_reasons(
    record: &AchievementRecord,
    components: ComponentScores,
    matched_skills: &[String],
) -> Vec<String> {
    let mut reasons = Vec::new();

    if components.skill > STRONG_SKILL_THRESHOLD && !matched_skills.is_empty() {
        reasons.push(format!("Strong match for: {}", matched_skills.join(", ")));
    } else if components.skill > MODERATE_SKILL_THRESHOLD && !matched_skills.is_empty() {
        reasons.push(format!("Matches: {}", matched_skills.join(", ")));
    }

    if components.semantic > STRONG_SEMANTIC_THRESHOLD {
        reasons.push("Closely aligned with the job description".to_string());
    }

    if record.role_is_current {
        reasons.push("Current role (most recent)".to_string());
    } else if components.recency > RECENT_ROLE_THRESHOLD {
        reasons.push("Recent role".to_string());
    }

    if components.metrics >= QUANTIFIED_THRESHOLD {
        reasons.push("Includes quantified impact".to_string());
    }

    reasons
}
