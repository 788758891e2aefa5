//! Repository for the `progress_records` and `progress_completions`
//! tables: the progress store plus the atomic daily-completion apply.

use pacer_core::streak;
use pacer_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::models::progress::{Completion, CompletionOutcome, ProgressRecord};

/// Column list for `progress_records` queries.
const COLUMNS: &str = "id, user_id, challenge_id, start_date, total_completions, score, \
                       current_streak, max_streak, last_completion_date, created_at, updated_at";

/// Column list for `progress_completions` queries.
const COMPLETION_COLUMNS: &str = "id, progress_id, completed_on, photo_url, created_at";

/// Provides CRUD operations and the serialized completion apply for
/// progress records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Create the progress record for a user joining a challenge.
    ///
    /// `start_date` is set once here and never mutated. A duplicate join
    /// surfaces as a unique violation on `uq_progress_user_challenge`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        challenge_id: DbId,
        start_date: Day,
    ) -> Result<ProgressRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_records (user_id, challenge_id, start_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(challenge_id)
            .bind(start_date)
            .fetch_one(pool)
            .await
    }

    /// Fetch the record for a (user, challenge) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        challenge_id: DbId,
    ) -> Result<Option<ProgressRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM progress_records WHERE user_id = $1 AND challenge_id = $2");
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(challenge_id)
            .fetch_optional(pool)
            .await
    }

    /// All records for one challenge (its participant set).
    pub async fn list_for_challenge(
        pool: &PgPool,
        challenge_id: DbId,
    ) -> Result<Vec<ProgressRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM progress_records WHERE challenge_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(challenge_id)
            .fetch_all(pool)
            .await
    }

    /// All records for one user across challenges.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ProgressRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM progress_records WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of participants in a challenge.
    pub async fn participant_count(pool: &PgPool, challenge_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM progress_records WHERE challenge_id = $1")
            .bind(challenge_id)
            .fetch_one(pool)
            .await
    }

    /// Delete the record for a user leaving a challenge (completions
    /// cascade). Returns whether a record existed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        challenge_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM progress_records WHERE user_id = $1 AND challenge_id = $2")
                .bind(user_id)
                .bind(challenge_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Completion history for a record, oldest first.
    pub async fn list_completions(
        pool: &PgPool,
        progress_id: DbId,
    ) -> Result<Vec<Completion>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETION_COLUMNS} FROM progress_completions
             WHERE progress_id = $1
             ORDER BY completed_on"
        );
        sqlx::query_as::<_, Completion>(&query)
            .bind(progress_id)
            .fetch_all(pool)
            .await
    }

    /// Record a completion for `today`, updating all cached counters.
    ///
    /// Runs in one transaction with the progress row locked
    /// (`SELECT ... FOR UPDATE`), so concurrent attempts on the same
    /// (user, challenge) key serialize: the loser observes the winner's
    /// row and gets [`CompletionOutcome::AlreadyCompleted`]. The
    /// `uq_completion_progress_day` unique index backs this up at the
    /// storage level.
    ///
    /// The counter math (streak advancement, score increment) is
    /// `pacer_core::streak::apply_completion`; a day gap resets the
    /// running streak rather than erroring.
    pub async fn record_completion(
        pool: &PgPool,
        user_id: DbId,
        challenge_id: DbId,
        today: Day,
        photo_url: &str,
    ) -> Result<CompletionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM progress_records
             WHERE user_id = $1 AND challenge_id = $2
             FOR UPDATE"
        );
        let record = sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(challenge_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(record) = record else {
            return Ok(CompletionOutcome::NotJoined);
        };

        let already_completed: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM progress_completions
                 WHERE progress_id = $1 AND completed_on = $2
             )",
        )
        .bind(record.id)
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        if already_completed {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        sqlx::query(
            "INSERT INTO progress_completions (progress_id, completed_on, photo_url)
             VALUES ($1, $2, $3)",
        )
        .bind(record.id)
        .bind(today)
        .bind(photo_url)
        .execute(&mut *tx)
        .await?;

        let completed_yesterday = match today.pred_opt() {
            Some(yesterday) => {
                sqlx::query_scalar(
                    "SELECT EXISTS (
                         SELECT 1 FROM progress_completions
                         WHERE progress_id = $1 AND completed_on = $2
                     )",
                )
                .bind(record.id)
                .bind(yesterday)
                .fetch_one(&mut *tx)
                .await?
            }
            None => false,
        };

        let update = streak::apply_completion(
            record.total_completions,
            record.score,
            record.current_streak,
            record.max_streak,
            today,
            completed_yesterday,
        );

        let query = format!(
            "UPDATE progress_records SET
                total_completions = $2,
                score = $3,
                current_streak = $4,
                max_streak = $5,
                last_completion_date = $6,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(record.id)
            .bind(update.total_completions)
            .bind(update.score)
            .bind(update.current_streak)
            .bind(update.max_streak)
            .bind(update.last_completion_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id,
            challenge_id,
            completed_on = %today,
            current_streak = updated.current_streak,
            "Completion recorded",
        );

        Ok(CompletionOutcome::Recorded(updated))
    }
}
