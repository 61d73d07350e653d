//! Gap & Recommendation Generator — prioritized, human-readable suggestions
//! derived from coverage and the shape of the selection.
//!
//! Emission order is fixed so repeated runs over the same inputs produce
//! identical output.

use crate::matching::coverage::CoverageReport;
use crate::models::requirements::JobRequirements;
use crate::models::tailored::ScoredAccomplishment;

const LOW_COVERAGE: f64 = 0.5;
const STRONG_COVERAGE: f64 = 0.8;
/// Minimum share of selections that should carry quantified outcomes.
const METRIC_DENSITY_TARGET: f64 = 0.3;
/// Minimum share of selections that should come from the current role.
const CURRENT_ROLE_TARGET: f64 = 0.3;
const GAP_CALLOUT_LIMIT: usize = 3;
const QUANTIFIED_METRICS_FLOOR: f64 = 0.5;

pub fn build_recommendations(
    requirements: &JobRequirements,
    coverage: &CoverageReport,
    selected: &[ScoredAccomplishment],
    has_current_role_input: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let pct = coverage.coverage_percentage * 100.0;
    if coverage.coverage_percentage < LOW_COVERAGE {
        recommendations.push(format!(
            "Low requirement coverage ({pct:.0}%) — consider adding achievements that demonstrate the required skills"
        ));
    } else if coverage.coverage_percentage < STRONG_COVERAGE {
        recommendations.push(format!(
            "Moderate requirement coverage ({pct:.0}%) — a few required skills are not yet demonstrated"
        ));
    } else {
        recommendations
            .push("Strong match — the selected achievements cover the key requirements well".to_string());
    }

    if !coverage.required_gaps.is_empty() {
        recommendations.push(format!(
            "Required skills not demonstrated: {}",
            format_gap_list(&coverage.required_gaps)
        ));
    }

    if !coverage.preferred_gaps.is_empty() && coverage.preferred_gaps.len() <= GAP_CALLOUT_LIMIT {
        recommendations.push(format!(
            "Preferred skills worth adding: {}",
            coverage.preferred_gaps.join(", ")
        ));
    }

    if !selected.is_empty() {
        let quantified = selected
            .iter()
            .filter(|item| item.metrics_score > QUANTIFIED_METRICS_FLOOR)
            .count();
        if (quantified as f64) < METRIC_DENSITY_TARGET * selected.len() as f64 {
            recommendations.push(
                "Few selected achievements carry quantified outcomes — add numbers (%, $, counts) to strengthen impact"
                    .to_string(),
            );
        }

        let from_current = selected.iter().filter(|item| item.role_is_current).count();
        if has_current_role_input
            && (from_current as f64) < CURRENT_ROLE_TARGET * selected.len() as f64
        {
            recommendations.push(
                "Selections lean on older roles — add stronger achievements from your current position"
                    .to_string(),
            );
        }
    }

    if let Some(years) = requirements.years_experience {
        recommendations.push(format!(
            "The posting asks for {years}+ years of experience — make total tenure visible"
        ));
    }
    if let Some(level) = &requirements.education_level {
        recommendations.push(format!(
            "The posting mentions education: {level} — list matching credentials"
        ));
    }

    recommendations
}

fn format_gap_list(gaps: &[String]) -> String {
    if gaps.len() <= GAP_CALLOUT_LIMIT {
        gaps.join(", ")
    } else {
        format!(
            "{} (+{} more)",
            gaps[..GAP_CALLOUT_LIMIT].join(", "),
            gaps.len() - GAP_CALLOUT_LIMIT
        )
    }
}
