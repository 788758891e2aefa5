//! Leaderboard queries with deterministic multi-key orderings.
//!
//! Every ordering ends in an `id ASC` key so that repeated queries over
//! unchanged data return byte-identical pages.

use pacer_core::ranking::RankMetric;
use pacer_core::types::DbId;
use sqlx::PgPool;

use crate::models::ranking::{ChallengeRankRow, GlobalRankRow, RankPosition};

/// ORDER BY clause for the global (per-user aggregate) ranking.
fn global_order(metric: RankMetric) -> &'static str {
    match metric {
        RankMetric::Score => "total_score DESC, total_completions DESC, user_id ASC",
        RankMetric::Completions => "total_completions DESC, total_score DESC, user_id ASC",
        RankMetric::Streak => "max_streak DESC, total_score DESC, user_id ASC",
    }
}

/// ORDER BY clause for a per-challenge ranking.
fn challenge_order(metric: RankMetric) -> &'static str {
    match metric {
        RankMetric::Score => "p.score DESC, p.total_completions DESC, p.id ASC",
        RankMetric::Completions => "p.total_completions DESC, p.score DESC, p.id ASC",
        RankMetric::Streak => {
            "p.max_streak DESC, p.current_streak DESC, p.score DESC, p.id ASC"
        }
    }
}

/// Read-only leaderboard queries over progress records.
pub struct RankingRepo;

impl RankingRepo {
    /// One page of the global ranking: per-user totals across all
    /// records, ordered by the requested metric.
    pub async fn global(
        pool: &PgPool,
        metric: RankMetric,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GlobalRankRow>, sqlx::Error> {
        let query = format!(
            "SELECT u.id AS user_id, u.nickname, u.avatar_url, u.grade,
                    COALESCE(SUM(p.score), 0)::BIGINT AS total_score,
                    COALESCE(SUM(p.total_completions), 0)::BIGINT AS total_completions,
                    COALESCE(MAX(p.max_streak), 0) AS max_streak
             FROM progress_records p
             JOIN users u ON u.id = p.user_id
             GROUP BY u.id, u.nickname, u.avatar_url, u.grade
             ORDER BY {}
             LIMIT $1 OFFSET $2",
            global_order(metric)
        );
        sqlx::query_as::<_, GlobalRankRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of a challenge's ranking.
    pub async fn for_challenge(
        pool: &PgPool,
        challenge_id: DbId,
        metric: RankMetric,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChallengeRankRow>, sqlx::Error> {
        let query = format!(
            "SELECT p.user_id, u.nickname, u.avatar_url, u.grade,
                    p.score, p.total_completions, p.current_streak, p.max_streak
             FROM progress_records p
             JOIN users u ON u.id = p.user_id
             WHERE p.challenge_id = $1
             ORDER BY {}
             LIMIT $2 OFFSET $3",
            challenge_order(metric)
        );
        sqlx::query_as::<_, ChallengeRankRow>(&query)
            .bind(challenge_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A user's rank within one challenge under the given metric.
    ///
    /// Rank is one plus the number of records that strictly precede the
    /// user's record: strictly greater on the primary key, or equal on
    /// the primary and strictly greater on the first tie-break, or (for
    /// the streak metric) equal on both and strictly greater on the
    /// second. Returns `None` if the user has no record in the challenge.
    pub async fn challenge_rank(
        pool: &PgPool,
        challenge_id: DbId,
        user_id: DbId,
        metric: RankMetric,
    ) -> Result<Option<RankPosition>, sqlx::Error> {
        let mine: Option<(i32, i32, i32, i32)> = sqlx::query_as(
            "SELECT score, total_completions, current_streak, max_streak
             FROM progress_records
             WHERE challenge_id = $1 AND user_id = $2",
        )
        .bind(challenge_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        let Some((score, completions, current_streak, max_streak)) = mine else {
            return Ok(None);
        };

        let preceding: i64 = match metric {
            RankMetric::Score => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM progress_records
                     WHERE challenge_id = $1
                       AND (score > $2
                            OR (score = $2 AND total_completions > $3))",
                )
                .bind(challenge_id)
                .bind(score)
                .bind(completions)
                .fetch_one(pool)
                .await?
            }
            RankMetric::Completions => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM progress_records
                     WHERE challenge_id = $1
                       AND (total_completions > $2
                            OR (total_completions = $2 AND score > $3))",
                )
                .bind(challenge_id)
                .bind(completions)
                .bind(score)
                .fetch_one(pool)
                .await?
            }
            RankMetric::Streak => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM progress_records
                     WHERE challenge_id = $1
                       AND (max_streak > $2
                            OR (max_streak = $2 AND current_streak > $3)
                            OR (max_streak = $2 AND current_streak = $3 AND score > $4))",
                )
                .bind(challenge_id)
                .bind(max_streak)
                .bind(current_streak)
                .bind(score)
                .fetch_one(pool)
                .await?
            }
        };

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM progress_records WHERE challenge_id = $1")
                .bind(challenge_id)
                .fetch_one(pool)
                .await?;

        Ok(Some(RankPosition {
            rank: preceding + 1,
            total,
        }))
    }
}
