//! Completion recorder: applies one daily completion and cascades the
//! derived state (trust score, badges, grade, challenge completion rate).

use pacer_core::error::CoreError;
use pacer_core::trust;
use pacer_core::types::{Day, DbId};
use pacer_db::models::progress::CompletionOutcome;
use pacer_db::repositories::{BadgeRepo, ProgressRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::engine::{badges, rate};
use crate::error::AppResult;

/// Post-cascade snapshot returned for a successful completion.
#[derive(Debug, Serialize)]
pub struct CompletionSnapshot {
    pub score: i32,
    pub total_completions: i32,
    pub current_streak: i32,
    pub max_streak: i32,
    pub completed_date: Day,
    pub trust_score: f64,
    pub trust_score_increase: f64,
    pub grade: String,
    pub total_badges: i64,
}

/// Record a completion for `today` and run the derived-state cascade.
///
/// The completion itself is fail-fast: any error before the record is
/// persisted aborts with no mutation. The cascade stages (trust score,
/// badges + grade, completion rate) are best-effort: each stage's
/// failure is logged without blocking the others, since every stage is a
/// recompute of current stored state and self-corrects on the next
/// write. The returned snapshot is observed after the cascade.
pub async fn record_completion(
    pool: &PgPool,
    user_id: DbId,
    challenge_id: DbId,
    today: Day,
    photo_url: &str,
    rate_window_days: i64,
) -> AppResult<CompletionSnapshot> {
    let record =
        match ProgressRepo::record_completion(pool, user_id, challenge_id, today, photo_url).await {
            Ok(CompletionOutcome::Recorded(record)) => record,
            Ok(CompletionOutcome::AlreadyCompleted) => {
                return Err(CoreError::AlreadyCompletedToday(today).into());
            }
            Ok(CompletionOutcome::NotJoined) => {
                return Err(CoreError::NotFound {
                    entity: "progress record",
                    id: challenge_id,
                }
                .into());
            }
            // A concurrent attempt can slip past the row lock's dup check
            // only by losing the unique-index race on the same day.
            Err(err) if is_duplicate_day(&err) => {
                return Err(CoreError::AlreadyCompletedToday(today).into());
            }
            Err(err) => return Err(err.into()),
        };

    let trust_score_increase = match apply_trust(pool, user_id, record.current_streak).await {
        Ok(applied) => applied,
        Err(err) => {
            tracing::warn!(user_id, error = %err, "Trust-score update failed after completion");
            0.0
        }
    };

    if let Err(err) = badges::evaluate_user(pool, user_id).await {
        tracing::warn!(user_id, error = %err, "Badge evaluation failed after completion");
    }

    if let Err(err) = rate::recompute(pool, challenge_id, today, rate_window_days).await {
        tracing::warn!(challenge_id, error = %err, "Completion-rate recompute failed after completion");
    }

    // Post-cascade observation: trust score, grade, and badge count are
    // re-read so the response reflects the fully cascaded state.
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })?;
    let total_badges = BadgeRepo::count_earned(pool, user_id).await?;

    Ok(CompletionSnapshot {
        score: record.score,
        total_completions: record.total_completions,
        current_streak: record.current_streak,
        max_streak: record.max_streak,
        completed_date: today,
        trust_score: user.trust_score,
        trust_score_increase,
        grade: user.grade,
        total_badges,
    })
}

/// Apply the streak-dependent trust-score increase, returning the delta
/// actually applied after the cap.
async fn apply_trust(pool: &PgPool, user_id: DbId, current_streak: i32) -> AppResult<f64> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })?;

    let increase = trust::increase_for_streak(current_streak);
    let (new_score, applied) = trust::apply_increase(user.trust_score, increase);

    UserRepo::set_trust_score(pool, user_id, new_score)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })?;

    Ok(applied)
}

/// Whether a sqlx error is the same-day unique violation raised when two
/// completion attempts race on one record.
fn is_duplicate_day(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_completion_progress_day")
    )
}
