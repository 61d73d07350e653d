use anyhow::{Context, Result};

use crate::matching::scorer::ScoreWeights;
use crate::matching::selector::SelectionPolicy;

/// Application configuration loaded from environment variables.
/// Every value has a default; the weight configuration is validated at
/// engine construction, not here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub weights: ScoreWeights,
    pub selection: SelectionPolicy,
    pub embed_cache_capacity: usize,
    pub semantic_deadline_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let weights = ScoreWeights::default();
        let selection = SelectionPolicy::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            weights: ScoreWeights {
                skill: parse_env("SKILL_WEIGHT", weights.skill)?,
                semantic: parse_env("SEMANTIC_WEIGHT", weights.semantic)?,
                recency: parse_env("RECENCY_WEIGHT", weights.recency)?,
                metrics: parse_env("METRICS_WEIGHT", weights.metrics)?,
            },
            selection: SelectionPolicy {
                max_count: parse_env("SELECTION_MAX_COUNT", selection.max_count)?,
                min_score: parse_env("SELECTION_MIN_SCORE", selection.min_score)?,
                current_role_fraction: parse_env(
                    "SELECTION_CURRENT_ROLE_FRACTION",
                    selection.current_role_fraction,
                )?,
                max_per_employer: parse_env(
                    "SELECTION_MAX_PER_EMPLOYER",
                    selection.max_per_employer,
                )?,
            },
            embed_cache_capacity: parse_env("EMBED_CACHE_CAPACITY", 1024)?,
            semantic_deadline_secs: parse_env("SEMANTIC_DEADLINE_SECS", 10)?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
