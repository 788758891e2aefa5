//! Repository for the `users` table.

use pacer_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nickname, avatar_url, trust_score, grade, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (nickname, avatar_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.nickname)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a user's trust score with a pre-capped value.
    ///
    /// The cap arithmetic lives in `pacer_core::trust`; callers pass the
    /// already-capped result. Returns `None` if no such user exists.
    pub async fn set_trust_score(
        pool: &PgPool,
        id: DbId,
        trust_score: f64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET trust_score = $2, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(trust_score)
            .fetch_optional(pool)
            .await
    }

    /// Set the user's grade if it differs from the stored one.
    ///
    /// Returns whether a write occurred.
    pub async fn set_grade(pool: &PgPool, id: DbId, grade: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET grade = $2, updated_at = now()
             WHERE id = $1 AND grade <> $2",
        )
        .bind(id)
        .bind(grade)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
