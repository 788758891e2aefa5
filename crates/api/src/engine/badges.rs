//! Badge evaluation and grade reclassification.

use std::collections::HashSet;

use pacer_core::badge::{self, MAX_REPRESENTATIVE_BADGES};
use pacer_core::grade::Grade;
use pacer_core::types::DbId;
use pacer_db::repositories::{BadgeRepo, UserRepo};
use sqlx::PgPool;

use crate::error::AppResult;

/// Evaluate the badge catalog against a user's lifetime aggregates.
///
/// Grants every badge whose condition is newly met, auto-fills free
/// representative slots (never touching user-chosen ones), then
/// reclassifies the user's grade from the new badge count. Grants are
/// append-only; re-evaluation can never revoke or duplicate a badge.
///
/// Returns the ids of newly granted badges in catalog order.
pub async fn evaluate_user(pool: &PgPool, user_id: DbId) -> AppResult<Vec<DbId>> {
    let catalog = BadgeRepo::catalog(pool).await?;
    let rules = catalog
        .iter()
        .map(|badge| badge.to_rule())
        .collect::<Result<Vec<_>, _>>()?;

    let stats = BadgeRepo::lifetime_stats(pool, user_id).await?;
    let earned: HashSet<DbId> = BadgeRepo::earned_ids(pool, user_id)
        .await?
        .into_iter()
        .collect();

    let newly_earned = badge::evaluate(&rules, &stats, &earned);

    let occupied = BadgeRepo::representative_count(pool, user_id).await?;
    let mut next_order = occupied + 1;

    for &badge_id in &newly_earned {
        BadgeRepo::grant(pool, user_id, badge_id).await?;

        // Auto-fill stops at the slot cap; later grants in the same pass
        // stay earned-but-not-displayed.
        if next_order <= MAX_REPRESENTATIVE_BADGES {
            BadgeRepo::set_representative(pool, user_id, badge_id, next_order as i32).await?;
            next_order += 1;
        }
    }

    if !newly_earned.is_empty() {
        tracing::info!(user_id, granted = newly_earned.len(), "Granted new badges");
    }

    let total = BadgeRepo::count_earned(pool, user_id).await?;
    let grade = Grade::from_badge_count(total);
    if UserRepo::set_grade(pool, user_id, grade.as_str()).await? {
        tracing::info!(user_id, grade = grade.as_str(), "User grade changed");
    }

    Ok(newly_earned)
}
