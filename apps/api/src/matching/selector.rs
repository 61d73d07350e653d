//! Selector — constrained top-K over scored accomplishments.
//!
//! Two-pass design: a current-role quota is filled first so the tailored
//! resume leans recent, then the remaining slots go to the best of the full
//! field. A per-employer cap keeps one employer from dominating.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::tailored::ScoredAccomplishment;

/// Bounds on the tailored selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionPolicy {
    pub max_count: usize,
    /// Items scoring below this floor are never selected.
    pub min_score: f64,
    /// Target share of selections drawn from the current role.
    pub current_role_fraction: f64,
    pub max_per_employer: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_count: 10,
            min_score: 0.3,
            current_role_fraction: 0.4,
            max_per_employer: 3,
        }
    }
}

/// Picks a bounded, score-ordered subset. Output order is selection order:
/// current-role quota picks first, then fill picks.
pub fn select(scored: &[ScoredAccomplishment], policy: &SelectionPolicy) -> Vec<ScoredAccomplishment> {
    let mut ranked: Vec<(usize, &ScoredAccomplishment)> = scored
        .iter()
        .enumerate()
        .filter(|(_, item)| item.final_score >= policy.min_score)
        .collect();
    ranked.sort_by(|(_, a), (_, b)| rank_order(a, b));

    let current_quota = ((policy.max_count as f64) * policy.current_role_fraction).floor() as usize;
    let current_quota = current_quota.min(policy.max_count);

    let mut per_employer: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<usize> = HashSet::new();
    let mut selected: Vec<ScoredAccomplishment> = Vec::new();

    // Pass 1: current-role quota, best first.
    for (idx, item) in ranked.iter().filter(|(_, item)| item.role_is_current) {
        if selected.len() >= current_quota {
            break;
        }
        let key = employer_key(item);
        if per_employer.get(&key).copied().unwrap_or(0) >= policy.max_per_employer {
            continue;
        }
        *per_employer.entry(key).or_insert(0) += 1;
        taken.insert(*idx);
        selected.push((*item).clone());
    }

    // Pass 2: fill remaining slots from the full field.
    for (idx, item) in &ranked {
        if selected.len() >= policy.max_count {
            break;
        }
        if taken.contains(idx) {
            continue;
        }
        let key = employer_key(item);
        if per_employer.get(&key).copied().unwrap_or(0) >= policy.max_per_employer {
            continue;
        }
        *per_employer.entry(key).or_insert(0) += 1;
        taken.insert(*idx);
        selected.push((*item).clone());
    }

    selected
}

/// Descending final score; ties break on skill match, then recency, then
/// original input position (the surrounding sort is stable).
fn rank_order(a: &ScoredAccomplishment, b: &ScoredAccomplishment) -> Ordering {
    b.final_score
        .partial_cmp(&a.final_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.skill_match_score
                .partial_cmp(&a.skill_match_score)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            b.recency_score
                .partial_cmp(&a.recency_score)
                .unwrap_or(Ordering::Equal)
        })
}

fn employer_key(item: &ScoredAccomplishment) -> String {
    item.employer_name.trim().to_lowercase()
}
