//! Progress record entities and completion outcomes.

use pacer_core::types::{Day, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `progress_records` table (one per user x challenge).
///
/// `total_completions`, `score`, the streak counters and
/// `last_completion_date` are caches over `progress_completions`, kept in
/// sync by [`ProgressRepo::record_completion`].
///
/// [`ProgressRepo::record_completion`]: crate::repositories::ProgressRepo::record_completion
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub challenge_id: DbId,
    pub start_date: Day,
    pub total_completions: i32,
    pub score: i32,
    pub current_streak: i32,
    pub max_streak: i32,
    pub last_completion_date: Option<Day>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `progress_completions` table: one recorded calendar day
/// and the photo reference submitted with it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Completion {
    pub id: DbId,
    pub progress_id: DbId,
    pub completed_on: Day,
    pub photo_url: String,
    pub created_at: Timestamp,
}

/// Outcome of an attempt to record a daily completion.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// The completion was recorded; the updated record is returned.
    Recorded(ProgressRecord),
    /// A completion for that calendar day already exists on the record.
    AlreadyCompleted,
    /// The user has not joined the challenge.
    NotJoined,
}
