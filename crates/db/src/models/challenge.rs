//! Challenge entity and DTOs.

use pacer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `challenges` table.
///
/// `completion_rate` is derived (0-100) and owned exclusively by the
/// completion-rate aggregator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Challenge {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub max_participants: i32,
    pub completion_rate: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a challenge.
#[derive(Debug, Deserialize)]
pub struct CreateChallenge {
    pub title: String,
    pub category: String,
    pub max_participants: i32,
}
