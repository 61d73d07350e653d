//! Coverage Analyzer — which requirement skills the selected achievements
//! actually demonstrate.

use std::collections::{HashMap, HashSet};

use crate::models::requirements::JobRequirements;
use crate::models::tailored::ScoredAccomplishment;

/// Per-skill coverage plus the required-skill coverage ratio.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Keyed by the requirement's original casing (first occurrence wins
    /// for case-insensitive duplicates).
    pub skill_coverage: HashMap<String, bool>,
    /// covered required / total required; 1.0 when nothing is required.
    pub coverage_percentage: f64,
    /// Uncovered required skills, in requirement order.
    pub required_gaps: Vec<String>,
    /// Uncovered preferred skills, in requirement order.
    pub preferred_gaps: Vec<String>,
}

impl CoverageReport {
    /// All gaps, required before preferred.
    pub fn gaps(&self) -> Vec<String> {
        let mut gaps = self.required_gaps.clone();
        gaps.extend(self.preferred_gaps.iter().cloned());
        gaps
    }
}

/// Marks each tracked skill covered iff it appears (case-insensitively) in
/// the union of `matched_skills` across the selected accomplishments.
pub fn analyze_coverage(
    requirements: &JobRequirements,
    selected: &[ScoredAccomplishment],
) -> CoverageReport {
    let demonstrated: HashSet<String> = selected
        .iter()
        .flat_map(|item| item.matched_skills.iter())
        .map(|skill| skill.to_lowercase())
        .collect();

    // required ∪ preferred, deduplicated case-insensitively; a skill listed
    // as both required and preferred counts as required.
    let mut seen: HashSet<String> = HashSet::new();
    let mut tracked: Vec<(String, bool)> = Vec::new();
    for skill in &requirements.required_skills {
        if seen.insert(skill.to_lowercase()) {
            tracked.push((skill.clone(), true));
        }
    }
    for skill in &requirements.preferred_skills {
        if seen.insert(skill.to_lowercase()) {
            tracked.push((skill.clone(), false));
        }
    }

    let mut skill_coverage = HashMap::new();
    let mut covered_required = 0usize;
    let mut total_required = 0usize;
    let mut required_gaps = Vec::new();
    let mut preferred_gaps = Vec::new();

    for (skill, is_required) in &tracked {
        let covered = demonstrated.contains(&skill.to_lowercase());
        skill_coverage.insert(skill.clone(), covered);
        if *is_required {
            total_required += 1;
            if covered {
                covered_required += 1;
            } else {
                required_gaps.push(skill.clone());
            }
        } else if !covered {
            preferred_gaps.push(skill.clone());
        }
    }

    let coverage_percentage = if total_required == 0 {
        1.0
    } else {
        covered_required as f64 / total_required as f64
    };

    CoverageReport {
        skill_coverage,
        coverage_percentage,
        required_gaps,
        preferred_gaps,
    }
}
