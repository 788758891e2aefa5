//! User profile entity and DTOs.

use pacer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// `trust_score` is in `[0, 100]` and only ever raised by the completion
/// recorder; `grade` holds the serialized tier enum and is only written
/// by the grade classifier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub trust_score: f64,
    pub grade: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user profile.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub nickname: String,
    pub avatar_url: Option<String>,
}
