use chrono::NaiveDate;

/// Score for roles with no start date on record.
const UNKNOWN_DATE_SCORE: f64 = 0.3;
/// Decay constant in years: e^-1 after five years.
const DECAY_YEARS: f64 = 5.0;

/// Computes recency with exponential decay over the role's age.
/// Current roles always score 1.0; a missing start date falls back to a
/// fixed low-confidence value rather than failing. "Today" is injected by
/// the caller so one tailoring run scores every achievement against the
/// same instant.
pub fn recency_score_at(start_date: Option<NaiveDate>, is_current: bool, today: NaiveDate) -> f64 {
    if is_current {
        return 1.0;
    }
    let start = match start_date {
        Some(d) => d,
        None => return UNKNOWN_DATE_SCORE,
    };
    let days = (today - start).num_days();
    if days <= 0 {
        return 1.0;
    }
    let years_ago = days as f64 / 365.25;
    (-years_ago / DECAY_YEARS).exp().clamp(0.0, 1.0)
}
