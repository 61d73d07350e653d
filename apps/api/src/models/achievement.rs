use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single candidate-authored achievement statement tied to a role.
///
/// Owned by the caller; the engine reads these and never mutates or
/// persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: Uuid,
    pub text: String,
    pub employer_name: String,
    pub role_title: String,
    pub role_start_date: Option<NaiveDate>,
    pub role_is_current: bool,
}
