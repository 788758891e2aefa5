//! Challenge completion-rate recompute.
//!
//! A full recompute over all of the challenge's progress records, not an
//! incremental update. Participant counts are small; correctness over
//! efficiency.

use pacer_core::completion_rate::{completion_rate, possible_days};
use pacer_core::types::{Day, DbId};
use pacer_db::repositories::{ChallengeRepo, ProgressRepo};
use sqlx::PgPool;

use crate::error::AppResult;

/// Recompute and persist a challenge's completion rate.
///
/// Each participant contributes `clamp(days since start + 1, 1,
/// window_days)` possible days and their recorded completions; the rate
/// is the rounded percentage of actual over possible.
pub async fn recompute(
    pool: &PgPool,
    challenge_id: DbId,
    today: Day,
    window_days: i64,
) -> AppResult<i32> {
    let records = ProgressRepo::list_for_challenge(pool, challenge_id).await?;

    let total_possible: i64 = records
        .iter()
        .map(|record| possible_days(record.start_date, today, window_days))
        .sum();
    let total_actual: i64 = records
        .iter()
        .map(|record| i64::from(record.total_completions))
        .sum();

    let rate = completion_rate(total_actual, total_possible);
    ChallengeRepo::set_completion_rate(pool, challenge_id, rate).await?;

    Ok(rate)
}
