//! Axum route handlers for the Tailoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::TailorRequest;
use crate::matching::selector::SelectionPolicy;
use crate::models::achievement::AchievementRecord;
use crate::models::requirements::JobRequirements;
use crate::models::tailored::TailoredResumeResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorHttpRequest {
    pub profile_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    pub requirements: JobRequirements,
    pub achievements: Vec<AchievementRecord>,
    #[serde(default)]
    pub selection: Option<SelectionOverrides>,
}

/// Per-request selection bounds; absent fields fall back to the engine's
/// configured policy.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionOverrides {
    pub max_count: Option<usize>,
    pub min_score: Option<f64>,
    pub current_role_fraction: Option<f64>,
    pub max_per_employer: Option<usize>,
}

impl SelectionOverrides {
    pub fn apply(&self, base: SelectionPolicy) -> SelectionPolicy {
        SelectionPolicy {
            max_count: self.max_count.unwrap_or(base.max_count),
            min_score: self.min_score.unwrap_or(base.min_score),
            current_role_fraction: self
                .current_role_fraction
                .unwrap_or(base.current_role_fraction),
            max_per_employer: self.max_per_employer.unwrap_or(base.max_per_employer),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub profile_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    #[serde(flatten)]
    pub result: TailoredResumeResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Scores the supplied achievements against the job's requirements and
/// returns the selected subset with coverage, gaps, and recommendations.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorHttpRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let policy_override = request
        .selection
        .as_ref()
        .map(|overrides| overrides.apply(state.engine.policy()));

    let tailor_request = TailorRequest {
        profile_id: request.profile_id,
        achievements: request.achievements,
        requirements: request.requirements,
        job_description: request.job_description,
        job_title: request.job_title.clone(),
        company_name: request.company_name.clone(),
        policy_override,
    };

    let result = state.engine.tailor(&tailor_request)?;

    Ok(Json(TailorResponse {
        profile_id: tailor_request.profile_id,
        job_title: request.job_title,
        company_name: request.company_name,
        result,
    }))
}
