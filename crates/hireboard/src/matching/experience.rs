use chrono::NaiveDate;

use super::domain::Experience;

const DAYS_PER_YEAR: f64 = 365.25;

/// Sum of every stint's length in years. Overlapping stints are counted twice.
///
/// A stint without a start date, or whose end precedes its start, adds nothing.
/// Current stints and stints without an end date run until `as_of`.
pub fn total_years(experiences: &[Experience], as_of: NaiveDate) -> f64 {
    experiences
        .iter()
        .map(|experience| stint_days(experience, as_of))
        .sum::<i64>() as f64
        / DAYS_PER_YEAR
}

fn stint_days(experience: &Experience, as_of: NaiveDate) -> i64 {
    let Some(start) = experience.start_date else {
        return 0;
    };

    let end = if experience.current {
        as_of
    } else {
        experience.end_date.unwrap_or(as_of)
    };

    (end - start).num_days().max(0)
}

/// Returns `(score, level_met)`; a shortfall earns proportional credit capped at 99.
pub(crate) fn experience_score(years: f64, threshold: f64) -> (u8, bool) {
    if years >= threshold {
        return (100, true);
    }

    let ratio = (years / threshold).max(0.0);
    let partial = (100.0 * ratio).floor().min(99.0);
    (partial as u8, false)
}
