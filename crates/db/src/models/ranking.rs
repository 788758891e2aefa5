//! Leaderboard row models.

use pacer_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// One global leaderboard entry: a user's totals across all of their
/// progress records, joined with profile display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GlobalRankRow {
    pub user_id: DbId,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub grade: String,
    pub total_score: i64,
    pub total_completions: i64,
    pub max_streak: i32,
}

/// One per-challenge leaderboard entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChallengeRankRow {
    pub user_id: DbId,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub grade: String,
    pub score: i32,
    pub total_completions: i32,
    pub current_streak: i32,
    pub max_streak: i32,
}

/// A single user's position within one ordering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankPosition {
    /// 1-based rank: one plus the number of strictly preceding records.
    pub rank: i64,
    /// Total records in the ordering.
    pub total: i64,
}
