//! Skill Matcher — scores how well an achievement statement covers a set of
//! target skill keywords.
//!
//! Three match tiers per skill: exact word-boundary match (quality 1.0),
//! technology-family match (0.7), semantic fallback via the embedding
//! provider (similarity × 0.8 when similarity > 0.6).

const EXACT_QUALITY: f64 = 1.0;
const FAMILY_QUALITY: f64 = 0.7;
const SEMANTIC_THRESHOLD: f64 = 0.6;
const SEMANTIC_QUALITY_FACTOR: f64 = 0.8;

/// Blend between average match quality and raw keyword coverage.
const QUALITY_WEIGHT: f64 = 0.7;
const COVERAGE_WEIGHT: f64 = 0.3;

/// Technology families: a skill keyword implies adjacent stack members.
/// A family hit scores below an exact hit. Static, loaded once, never
/// mutated at runtime.
const TECH_FAMILIES: &[(&str, &[&str])] = &[
    ("react", &["javascript", "typescript", "jsx", "frontend"]),
    ("angular", &["javascript", "typescript", "frontend"]),
    ("vue", &["javascript", "typescript", "frontend"]),
    ("node.js", &["javascript", "typescript", "node"]),
    ("node", &["javascript", "node.js"]),
    ("javascript", &["typescript", "react", "node", "frontend"]),
    ("typescript", &["javascript", "react", "node"]),
    ("django", &["python", "backend"]),
    ("flask", &["python", "backend"]),
    ("fastapi", &["python", "backend"]),
    ("python", &["django", "flask", "pandas", "numpy"]),
    ("rails", &["ruby", "backend"]),
    ("spring", &["java", "backend"]),
    ("kotlin", &["java", "android"]),
    ("postgresql", &["sql", "postgres", "database"]),
    ("mysql", &["sql", "database"]),
    ("sql", &["postgresql", "postgres", "mysql", "database"]),
    ("kubernetes", &["docker", "containers", "k8s", "devops"]),
    ("docker", &["kubernetes", "containers", "devops"]),
    ("terraform", &["infrastructure as code", "devops", "aws"]),
    ("aws", &["cloud", "ec2", "s3", "lambda"]),
    ("gcp", &["cloud", "google cloud"]),
    ("azure", &["cloud"]),
    ("pytorch", &["python", "machine learning", "deep learning"]),
    ("tensorflow", &["python", "machine learning", "deep learning"]),
    ("machine learning", &["pytorch", "tensorflow", "ml"]),
];

/// Result of matching one achievement against the target skill set.
#[derive(Debug, Clone)]
pub struct SkillMatch {
    /// 0–1 score per the quality/coverage blend.
    pub score: f64,
    /// Lowercased target skills that matched, insertion order.
    pub matched_skills: Vec<String>,
}

impl SkillMatch {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched_skills: Vec::new(),
        }
    }
}

/// Matches `target_skills` against the achievement text.
///
/// `semantic_sim` returns the similarity of a single skill term against the
/// achievement text, or `None` when no provider is available (or the
/// request's semantic budget is spent). It is only consulted for skills the
/// exact and family tiers missed.
pub fn match_skills<F>(text: &str, target_skills: &[String], mut semantic_sim: F) -> SkillMatch
where
    F: FnMut(&str) -> Option<f64>,
{
    if target_skills.is_empty() {
        return SkillMatch::empty();
    }

    let text_lower = text.to_lowercase();
    let mut qualities: Vec<f64> = Vec::new();
    let mut matched: Vec<String> = Vec::new();

    for skill in target_skills {
        let skill_lower = skill.trim().to_lowercase();
        if skill_lower.is_empty() {
            continue;
        }

        let quality = if contains_term(&text_lower, &skill_lower) {
            Some(EXACT_QUALITY)
        } else if family_members(&skill_lower)
            .iter()
            .any(|member| contains_term(&text_lower, member))
        {
            Some(FAMILY_QUALITY)
        } else {
            match semantic_sim(&skill_lower) {
                Some(sim) if sim > SEMANTIC_THRESHOLD => Some(sim * SEMANTIC_QUALITY_FACTOR),
                _ => None,
            }
        };

        if let Some(q) = quality {
            qualities.push(q);
            if !matched.contains(&skill_lower) {
                matched.push(skill_lower);
            }
        }
    }

    if qualities.is_empty() {
        return SkillMatch::empty();
    }

    let avg_quality: f64 = qualities.iter().sum::<f64>() / qualities.len() as f64;
    let coverage = qualities.len() as f64 / target_skills.len() as f64;
    let score = (QUALITY_WEIGHT * avg_quality + COVERAGE_WEIGHT * coverage).clamp(0.0, 1.0);

    SkillMatch {
        score,
        matched_skills: matched,
    }
}

fn family_members(skill: &str) -> &'static [&'static str] {
    TECH_FAMILIES
        .iter()
        .find(|(key, _)| *key == skill)
        .map(|(_, members)| *members)
        .unwrap_or(&[])
}

/// Case-sensitive word-boundary search; callers pass pre-lowercased inputs.
/// A hit requires the characters adjacent to the matched span to be
/// non-alphanumeric, so "go" never matches inside "django" while "c++" and
/// "node.js" match as written.
fn contains_term(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(needle) {
        let begin = search_from + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = end;
    }
    false
}
