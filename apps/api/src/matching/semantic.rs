//! Semantic Similarity Scorer — achievement text vs the full job
//! description, via whatever vectors the provider produced.

use crate::embedding::EmbeddingProvider;

/// Clamped cosine similarity between an achievement vector and the
/// per-request job-description vector. A missing vector on either side
/// degrades to 0.0, never an error.
pub fn semantic_score(
    provider: &dyn EmbeddingProvider,
    achievement_vector: Option<&[f32]>,
    job_vector: Option<&[f32]>,
) -> f64 {
    match (achievement_vector, job_vector) {
        (Some(a), Some(j)) => f64::from(provider.similarity(a, j)).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
