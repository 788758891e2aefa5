//! Repository for the `challenges` table.

use pacer_core::types::DbId;
use sqlx::PgPool;

use crate::models::challenge::{Challenge, CreateChallenge};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, category, max_participants, completion_rate, created_at, updated_at";

/// Provides CRUD operations for challenges.
pub struct ChallengeRepo;

impl ChallengeRepo {
    /// Insert a new challenge, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateChallenge) -> Result<Challenge, sqlx::Error> {
        let query = format!(
            "INSERT INTO challenges (title, category, max_participants)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Challenge>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(input.max_participants)
            .fetch_one(pool)
            .await
    }

    /// Find a challenge by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges WHERE id = $1");
        sqlx::query_as::<_, Challenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all challenges, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Challenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM challenges ORDER BY created_at DESC");
        sqlx::query_as::<_, Challenge>(&query).fetch_all(pool).await
    }

    /// Overwrite the derived completion rate (aggregator only).
    pub async fn set_completion_rate(
        pool: &PgPool,
        id: DbId,
        completion_rate: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE challenges SET completion_rate = $2, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(completion_rate)
        .execute(pool)
        .await
        .map(|_| ())
    }
}
