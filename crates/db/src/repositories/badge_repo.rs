//! Repository for the badge catalog and per-user badge state.

use std::collections::HashMap;

use pacer_core::badge::LifetimeStats;
use pacer_core::types::DbId;
use sqlx::PgPool;

use crate::models::badge::{Badge, EarnedBadge, RepresentativeBadge};

/// Column list for `badges` queries.
const COLUMNS: &str =
    "id, code, name, description, condition_kind, threshold, category, sort_order, created_at";

/// Provides catalog access, grants, representative slots, and the
/// lifetime-aggregate queries badge evaluation runs on.
pub struct BadgeRepo;

impl BadgeRepo {
    /// Load the full badge catalog in its stable scan order.
    pub async fn catalog(pool: &PgPool) -> Result<Vec<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges ORDER BY sort_order, id");
        sqlx::query_as::<_, Badge>(&query).fetch_all(pool).await
    }

    /// Ids of the badges a user has earned.
    pub async fn earned_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT badge_id FROM user_badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of badges a user has earned.
    pub async fn count_earned(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Grant a badge. Idempotent: re-granting an earned badge is a no-op.
    pub async fn grant(pool: &PgPool, user_id: DbId, badge_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_badges (user_id, badge_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(badge_id)
        .execute(pool)
        .await
        .map(|_| ())
    }

    /// Number of representative display slots currently occupied.
    pub async fn representative_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_representative_badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Fill a representative slot with a badge.
    ///
    /// User-chosen slots are never overwritten: a taken order or an
    /// already-displayed badge makes this a no-op.
    pub async fn set_representative(
        pool: &PgPool,
        user_id: DbId,
        badge_id: DbId,
        display_order: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_representative_badges (user_id, badge_id, display_order)
             VALUES ($1, $2, $3)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(badge_id)
        .bind(display_order)
        .execute(pool)
        .await
        .map(|_| ())
    }

    /// A user's earned badges joined with catalog info, oldest first.
    pub async fn list_earned(pool: &PgPool, user_id: DbId) -> Result<Vec<EarnedBadge>, sqlx::Error> {
        sqlx::query_as::<_, EarnedBadge>(
            "SELECT ub.badge_id, b.code, b.name, b.description, ub.earned_at
             FROM user_badges ub
             JOIN badges b ON b.id = ub.badge_id
             WHERE ub.user_id = $1
             ORDER BY ub.earned_at, ub.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// A user's representative badges in display order.
    pub async fn list_representative(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RepresentativeBadge>, sqlx::Error> {
        sqlx::query_as::<_, RepresentativeBadge>(
            "SELECT rb.badge_id, b.code, b.name, rb.display_order
             FROM user_representative_badges rb
             JOIN badges b ON b.id = rb.badge_id
             WHERE rb.user_id = $1
             ORDER BY rb.display_order",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Lifetime aggregates for badge evaluation: sums, maxima and counts
    /// over all of a user's progress records, plus completions grouped by
    /// challenge category.
    pub async fn lifetime_stats(pool: &PgPool, user_id: DbId) -> Result<LifetimeStats, sqlx::Error> {
        let (total_completions, max_streak, total_score, total_challenges): (i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT COALESCE(SUM(total_completions), 0)::BIGINT,
                        COALESCE(MAX(max_streak), 0)::BIGINT,
                        COALESCE(SUM(score), 0)::BIGINT,
                        COUNT(*)::BIGINT
                 FROM progress_records
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        let total_active_days: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM progress_completions pc
             JOIN progress_records pr ON pr.id = pc.progress_id
             WHERE pr.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT c.category, COUNT(pc.id)
             FROM progress_completions pc
             JOIN progress_records pr ON pr.id = pc.progress_id
             JOIN challenges c ON c.id = pr.challenge_id
             WHERE pr.user_id = $1
             GROUP BY c.category",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(LifetimeStats {
            total_completions,
            max_streak,
            total_score,
            total_challenges,
            total_active_days,
            completions_by_category: by_category.into_iter().collect::<HashMap<_, _>>(),
        })
    }
}
