//! Resume Tailoring Orchestrator — the public entry point.
//!
//! Sequences Scorer → Selector → Coverage Analyzer → Gap/Recommendation
//! Generator → aggregate match score, synchronously, and returns one
//! immutable result. The only shared mutable state is the bounded vector
//! cache; everything else is fresh per call.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::cache::VectorCache;
use crate::embedding::EmbeddingProvider;
use crate::errors::AppError;
use crate::matching::coverage::{analyze_coverage, CoverageReport};
use crate::matching::metrics::metrics_score;
use crate::matching::recency::recency_score_at;
use crate::matching::recommendations::build_recommendations;
use crate::matching::scorer::{score_accomplishment, ComponentScores, ScoreWeights};
use crate::matching::selector::{select, SelectionPolicy};
use crate::matching::semantic::semantic_score;
use crate::matching::skill_matcher::match_skills;
use crate::models::achievement::AchievementRecord;
use crate::models::requirements::JobRequirements;
use crate::models::tailored::{ScoredAccomplishment, TailoredResumeResult};

/// Default wall-clock budget for embedding work within one tailoring call.
/// Once spent, remaining semantic scores degrade to 0.0 exactly as if no
/// provider were configured.
const DEFAULT_SEMANTIC_DEADLINE: Duration = Duration::from_secs(10);

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// One tailoring request. All fields are caller-owned inputs; the engine
/// reads them and returns a fresh result.
#[derive(Debug, Clone)]
pub struct TailorRequest {
    pub profile_id: Uuid,
    pub achievements: Vec<AchievementRecord>,
    pub requirements: JobRequirements,
    pub job_description: String,
    pub job_title: String,
    pub company_name: String,
    /// Per-request selection bounds; `None` uses the engine's policy.
    pub policy_override: Option<SelectionPolicy>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

pub struct TailoringEngine {
    weights: ScoreWeights,
    policy: SelectionPolicy,
    provider: Arc<dyn EmbeddingProvider>,
    cache: Mutex<VectorCache>,
    semantic_deadline: Duration,
}

impl TailoringEngine {
    /// Fails fast on an invalid weight configuration, before any scoring
    /// can occur.
    pub fn new(
        weights: ScoreWeights,
        policy: SelectionPolicy,
        provider: Arc<dyn EmbeddingProvider>,
        cache_capacity: usize,
    ) -> Result<Self, AppError> {
        weights.validate()?;
        Ok(Self {
            weights,
            policy,
            provider,
            cache: Mutex::new(VectorCache::new(cache_capacity)),
            semantic_deadline: DEFAULT_SEMANTIC_DEADLINE,
        })
    }

    pub fn with_semantic_deadline(mut self, deadline: Duration) -> Self {
        self.semantic_deadline = deadline;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Scores every achievement against the requirements, selects a bounded
    /// subset, and derives coverage, gaps, recommendations, and the overall
    /// match score.
    pub fn tailor(&self, request: &TailorRequest) -> Result<TailoredResumeResult, AppError> {
        if request.achievements.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "no achievements to tailor — ingest achievements before requesting a tailored resume"
                    .to_string(),
            ));
        }

        let policy = request.policy_override.unwrap_or(self.policy);
        let started = Instant::now();
        let today = Utc::now().date_naive();

        // Target keywords: required then preferred, lowercased, deduplicated.
        let mut target_skills: Vec<String> = Vec::new();
        for skill in request
            .requirements
            .required_skills
            .iter()
            .chain(request.requirements.preferred_skills.iter())
        {
            let lower = skill.trim().to_lowercase();
            if !lower.is_empty() && !target_skills.contains(&lower) {
                target_skills.push(lower);
            }
        }

        // The job-description vector is computed once and reused for every
        // achievement.
        let job_vector = self.embed_cached(&request.job_description, started);

        let scored: Vec<ScoredAccomplishment> = request
            .achievements
            .iter()
            .map(|record| {
                let achievement_vector = self.embed_cached(&record.text, started);

                let skill = match_skills(&record.text, &target_skills, |skill_term| {
                    let achievement = achievement_vector.as_deref()?;
                    let skill_vector = self.embed_cached(skill_term, started)?;
                    Some(f64::from(self.provider.similarity(&skill_vector, achievement)).clamp(0.0, 1.0))
                });

                let components = ComponentScores {
                    skill: skill.score,
                    semantic: semantic_score(
                        self.provider.as_ref(),
                        achievement_vector.as_deref(),
                        job_vector.as_deref(),
                    ),
                    recency: recency_score_at(record.role_start_date, record.role_is_current, today),
                    metrics: metrics_score(&record.text),
                };

                score_accomplishment(record, components, skill.matched_skills, &self.weights)
            })
            .collect();

        let selected = select(&scored, &policy);
        let coverage = analyze_coverage(&request.requirements, &selected);
        let has_current_role_input = request.achievements.iter().any(|a| a.role_is_current);
        let recommendations = build_recommendations(
            &request.requirements,
            &coverage,
            &selected,
            has_current_role_input,
        );
        let match_score = compute_match_score(&coverage, &selected);

        info!(
            profile_id = %request.profile_id,
            job_title = %request.job_title,
            company = %request.company_name,
            scored = scored.len(),
            selected = selected.len(),
            coverage = coverage.coverage_percentage,
            match_score,
            "tailoring complete"
        );

        let gaps = coverage.gaps();
        Ok(TailoredResumeResult {
            selected,
            skill_coverage: coverage.skill_coverage,
            coverage_percentage: coverage.coverage_percentage,
            gaps,
            recommendations,
            match_score,
        })
    }

    /// Embeds through the bounded cache. `None` when the text is empty, the
    /// provider has no vector, or the request's semantic budget is spent.
    fn embed_cached(&self, text: &str, started: Instant) -> Option<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if started.elapsed() >= self.semantic_deadline {
            debug!("semantic budget spent; degrading similarity to 0.0");
            return None;
        }

        {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = cache.get(trimmed) {
                return Some(hit);
            }
        }

        // The provider call happens outside the lock.
        let vector = self.provider.embed(trimmed)?;
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.insert(trimmed, vector.clone());
        Some(vector)
    }
}

/// Coarse whole-resume aggregate: coverage, mean item score, selection
/// volume, and gap pressure. 0.0 for an empty selection.
fn compute_match_score(coverage: &CoverageReport, selected: &[ScoredAccomplishment]) -> f64 {
    if selected.is_empty() {
        return 0.0;
    }
    let mean_final =
        selected.iter().map(|item| item.final_score).sum::<f64>() / selected.len() as f64;
    let volume = (selected.len() as f64 / 20.0).min(1.0);
    let tracked = coverage.skill_coverage.len().max(1) as f64;
    let gap_count = (coverage.required_gaps.len() + coverage.preferred_gaps.len()) as f64;
    let gap_factor = (1.0 - gap_count / tracked).max(0.0);

    (0.5 * coverage.coverage_percentage + 0.3 * mean_final + 0.1 * volume + 0.1 * gap_factor)
        .clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::NullEmbedder;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic two-axis embedder: counts "data" and "web" mentions.
    /// Texts touching neither topic embed to the zero vector (cosine 0.0).
    struct TopicEmbedder {
        calls: AtomicUsize,
    }

    impl TopicEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EmbeddingProvider for TopicEmbedder {
        fn embed(&self, text: &str) -> Option<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let lower = text.to_lowercase();
            let data = lower.matches("data").count() as f32;
            let web = lower.matches("web").count() as f32;
            Some(vec![data, web])
        }
    }

    fn make_achievement(text: &str, employer: &str, is_current: bool) -> AchievementRecord {
        AchievementRecord {
            id: Uuid::new_v4(),
            text: text.to_string(),
            employer_name: employer.to_string(),
            role_title: "Engineer".to_string(),
            role_start_date: None,
            role_is_current: is_current,
        }
    }

    fn make_request(achievements: Vec<AchievementRecord>) -> TailorRequest {
        TailorRequest {
            profile_id: Uuid::new_v4(),
            achievements,
            requirements: JobRequirements {
                required_skills: vec!["Python".to_string(), "SQL".to_string()],
                ..JobRequirements::default()
            },
            job_description: "We need someone to own our data platform".to_string(),
            job_title: "Data Engineer".to_string(),
            company_name: "Acme".to_string(),
            policy_override: None,
        }
    }

    fn null_engine() -> TailoringEngine {
        TailoringEngine::new(
            ScoreWeights::default(),
            SelectionPolicy::default(),
            Arc::new(NullEmbedder),
            16,
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_weights_rejected_at_construction() {
        let weights = ScoreWeights {
            skill: 0.5,
            semantic: 0.5,
            recency: 0.5,
            metrics: 0.5,
        };
        let result = TailoringEngine::new(
            weights,
            SelectionPolicy::default(),
            Arc::new(NullEmbedder),
            16,
        );
        assert!(result.is_err(), "Weights summing to 2.0 must fail construction");
    }

    #[test]
    fn test_empty_achievements_is_an_error() {
        let engine = null_engine();
        let request = make_request(vec![]);
        assert!(engine.tailor(&request).is_err(), "Zero achievements must not tailor");
    }

    #[test]
    fn test_sql_optimization_scenario_end_to_end() {
        // required=[Python, SQL], no provider, current role, weights
        // {0.4, 0.3, 0.2, 0.1}: skill 0.85, semantic 0.0, recency 1.0,
        // metrics 1.0 → final 0.64.
        let engine = null_engine();
        let request = make_request(vec![make_achievement(
            "Optimized SQL queries reducing load time by 40%",
            "Acme",
            true,
        )]);
        let result = engine.tailor(&request).unwrap();

        assert_eq!(result.selected.len(), 1);
        let item = &result.selected[0];
        assert!((item.skill_match_score - 0.85).abs() < 1e-9, "skill was {}", item.skill_match_score);
        assert_eq!(item.semantic_score, 0.0);
        assert_eq!(item.recency_score, 1.0);
        assert_eq!(item.metrics_score, 1.0);
        let expected = 0.4 * 0.85 + 0.3 * 0.0 + 0.2 * 1.0 + 0.1 * 1.0;
        assert!(
            (item.final_score - expected).abs() < 1e-9,
            "final was {}, expected {expected}",
            item.final_score
        );
    }

    #[test]
    fn test_coverage_and_gaps_in_result() {
        let engine = null_engine();
        let request = make_request(vec![make_achievement(
            "Optimized SQL queries reducing load time by 40%",
            "Acme",
            true,
        )]);
        let result = engine.tailor(&request).unwrap();

        assert_eq!(result.skill_coverage.get("SQL"), Some(&true));
        assert_eq!(result.skill_coverage.get("Python"), Some(&false));
        assert!((result.coverage_percentage - 0.5).abs() < 1e-9);
        assert_eq!(result.gaps, vec!["Python"]);
    }

    #[test]
    fn test_employer_cap_applies_through_tailor() {
        let engine = null_engine();
        let mut request = make_request(vec![
            make_achievement("Optimized SQL pipelines cutting costs by 30%", "Acme", true),
            make_achievement("Led SQL migration saving $1M", "Acme", true),
        ]);
        request.policy_override = Some(SelectionPolicy {
            max_per_employer: 1,
            ..SelectionPolicy::default()
        });
        let result = engine.tailor(&request).unwrap();
        assert_eq!(result.selected.len(), 1, "Employer cap must hold through the pipeline");
    }

    #[test]
    fn test_match_score_zero_for_empty_selection() {
        let coverage = CoverageReport {
            skill_coverage: HashMap::new(),
            coverage_percentage: 1.0,
            required_gaps: vec![],
            preferred_gaps: vec![],
        };
        assert_eq!(compute_match_score(&coverage, &[]), 0.0);
    }

    #[test]
    fn test_match_score_formula() {
        let mut skill_coverage = HashMap::new();
        skill_coverage.insert("Python".to_string(), true);
        skill_coverage.insert("SQL".to_string(), false);
        let coverage = CoverageReport {
            skill_coverage,
            coverage_percentage: 0.5,
            required_gaps: vec!["SQL".to_string()],
            preferred_gaps: vec![],
        };
        let selected = vec![ScoredAccomplishment {
            id: Uuid::new_v4(),
            text: "x".to_string(),
            role_title: "Engineer".to_string(),
            employer_name: "Acme".to_string(),
            role_is_current: true,
            final_score: 0.8,
            skill_match_score: 0.8,
            semantic_score: 0.0,
            recency_score: 1.0,
            metrics_score: 0.5,
            matched_skills: vec!["python".to_string()],
            reasons: vec![],
        }];
        // 0.5*0.5 + 0.3*0.8 + 0.1*(1/20) + 0.1*(1 - 1/2) = 0.545
        let score = compute_match_score(&coverage, &selected);
        assert!((score - 0.545).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_determinism_of_scored_sequence() {
        let engine = null_engine();
        let request = make_request(vec![
            make_achievement("Optimized SQL queries reducing load time by 40%", "Acme", true),
            make_achievement("Built Python services handling 100+ integrations", "Globex", false),
        ]);
        let first = engine.tailor(&request).unwrap();
        let second = engine.tailor(&request).unwrap();
        assert_eq!(
            serde_json::to_string(&first.selected).unwrap(),
            serde_json::to_string(&second.selected).unwrap(),
            "Same inputs must yield bit-identical scored sequences"
        );
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.gaps, second.gaps);
    }

    #[test]
    fn test_job_vector_embedded_once_across_achievements() {
        let provider = Arc::new(TopicEmbedder::new());
        let engine = TailoringEngine::new(
            ScoreWeights::default(),
            SelectionPolicy::default(),
            provider.clone(),
            16,
        )
        .unwrap();

        let request = TailorRequest {
            profile_id: Uuid::new_v4(),
            achievements: vec![
                make_achievement("Scaled the data warehouse", "Acme", true),
                make_achievement("Rebuilt the web checkout", "Globex", false),
            ],
            requirements: JobRequirements::default(),
            job_description: "data platform role".to_string(),
            job_title: "Data Engineer".to_string(),
            company_name: "Acme".to_string(),
            policy_override: None,
        };

        engine.tailor(&request).unwrap();
        let first_run = provider.calls.load(Ordering::SeqCst);
        // Job description + two achievement texts; no skills (empty
        // requirements) so no fallback embeds.
        assert_eq!(first_run, 3, "Job vector must be computed once, not per achievement");

        engine.tailor(&request).unwrap();
        let second_run = provider.calls.load(Ordering::SeqCst);
        assert_eq!(second_run, first_run, "Second run must be served entirely from cache");
    }

    #[test]
    fn test_semantic_scores_with_provider() {
        let engine = TailoringEngine::new(
            ScoreWeights::default(),
            SelectionPolicy {
                min_score: 0.0,
                ..SelectionPolicy::default()
            },
            Arc::new(TopicEmbedder::new()),
            16,
        )
        .unwrap();

        let request = TailorRequest {
            profile_id: Uuid::new_v4(),
            achievements: vec![
                make_achievement("Scaled the data warehouse for data science teams", "Acme", true),
                make_achievement("Polished button styling", "Globex", false),
            ],
            requirements: JobRequirements::default(),
            job_description: "Own our data platform and data tooling".to_string(),
            job_title: "Data Engineer".to_string(),
            company_name: "Acme".to_string(),
            policy_override: None,
        };

        let result = engine.tailor(&request).unwrap();
        let aligned = result
            .selected
            .iter()
            .find(|s| s.text.contains("warehouse"))
            .unwrap();
        let unrelated = result
            .selected
            .iter()
            .find(|s| s.text.contains("button"))
            .unwrap();
        assert!(
            aligned.semantic_score > 0.9,
            "On-topic achievement scored {}",
            aligned.semantic_score
        );
        assert_eq!(unrelated.semantic_score, 0.0, "Zero-vector text must degrade to 0.0");
    }

    #[test]
    fn test_exhausted_deadline_degrades_semantic_to_zero() {
        let engine = TailoringEngine::new(
            ScoreWeights::default(),
            SelectionPolicy {
                min_score: 0.0,
                ..SelectionPolicy::default()
            },
            Arc::new(TopicEmbedder::new()),
            16,
        )
        .unwrap()
        .with_semantic_deadline(Duration::ZERO);

        let request = make_request(vec![make_achievement(
            "Scaled the data warehouse",
            "Acme",
            true,
        )]);
        let result = engine.tailor(&request).unwrap();
        assert_eq!(
            result.selected[0].semantic_score, 0.0,
            "A spent budget must behave exactly like a missing provider"
        );
    }

    #[test]
    fn test_all_scores_within_bounds() {
        let engine = null_engine();
        let request = make_request(vec![
            make_achievement("Optimized SQL queries reducing load time by 40%", "Acme", true),
            make_achievement("", "Globex", false),
            make_achievement("Led a team of 12+ engineers, tripled deployment frequency", "", false),
        ]);
        // Malformed items (empty text, empty employer) score best-effort.
        let result = engine.tailor(&request).unwrap();
        assert!((0.0..=1.0).contains(&result.match_score));
        assert!((0.0..=1.0).contains(&result.coverage_percentage));
        for item in &result.selected {
            for score in [
                item.final_score,
                item.skill_match_score,
                item.semantic_score,
                item.recency_score,
                item.metrics_score,
            ] {
                assert!((0.0..=1.0).contains(&score), "Out-of-bounds score {score}");
            }
        }
    }
}
