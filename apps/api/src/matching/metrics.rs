//! Metrics Scorer — rewards quantified outcomes, action verbs, and impact
//! language in achievement text.

use once_cell::sync::Lazy;
use regex::Regex;

const QUANTIFIED_CREDIT: f64 = 0.5;
const ACTION_VERB_CREDIT: f64 = 0.25;
const IMPACT_WORD_CREDIT: f64 = 0.25;

/// Quantifiable-outcome patterns: percentages, currency amounts, K/M/B
/// suffixed numbers, "Nx" multipliers, "N+" counts, thousands-grouped
/// integers. Compiled once.
static QUANTIFIED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d+(?:\.\d+)?\s*%",
        r"(?i)[$€£]\s*\d[\d,]*(?:\.\d+)?\s*[kmb]?",
        r"(?i)\b\d+(?:\.\d+)?[kmb]\b",
        r"(?i)\b\d+(?:\.\d+)?x\b",
        r"\b\d+\+",
        r"\b\d{1,3}(?:,\d{3})+\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("quantified pattern must compile"))
    .collect()
});

/// Verbs compared against whitespace tokens (punctuation-trimmed,
/// lowercased).
const ACTION_VERBS: &[&str] = &[
    "developed",
    "built",
    "led",
    "launched",
    "designed",
    "implemented",
    "created",
    "architected",
    "optimized",
    "automated",
    "migrated",
    "delivered",
    "shipped",
    "spearheaded",
    "engineered",
    "refactored",
    "deployed",
    "scaled",
    "established",
    "drove",
    "founded",
    "managed",
    "mentored",
    "modernized",
    "negotiated",
];

/// Impact stems, substring-matched so inflections ("reduced", "reducing")
/// all hit.
const IMPACT_STEMS: &[&str] = &[
    "reduc",
    "increas",
    "improv",
    "decreas",
    "accelerat",
    "streamlin",
    "eliminat",
    "boost",
    "doubl",
    "tripl",
    "expand",
    "grew",
    "growth",
    "sav",
];

/// Sum of three independent contributions, capped at 1.0.
pub fn metrics_score(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    if QUANTIFIED_PATTERNS.iter().any(|re| re.is_match(text)) {
        score += QUANTIFIED_CREDIT;
    }

    let lower = text.to_lowercase();

    let has_action_verb = lower
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|token| ACTION_VERBS.contains(&token));
    if has_action_verb {
        score += ACTION_VERB_CREDIT;
    }

    if IMPACT_STEMS.iter().any(|stem| lower.contains(stem)) {
        score += IMPACT_WORD_CREDIT;
    }

    score.min(1.0)
}
