use serde::{Deserialize, Serialize};

/// Structured requirements produced by the upstream extraction stage.
///
/// Skill lists keep the extractor's original casing; all matching in the
/// engine is case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
}
