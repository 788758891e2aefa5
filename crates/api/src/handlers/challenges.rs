//! Handlers for the challenge catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pacer_core::error::CoreError;
use pacer_core::types::DbId;
use pacer_db::models::challenge::CreateChallenge;
use pacer_db::repositories::ChallengeRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// DTO for creating a challenge.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 80))]
    pub title: String,
    #[validate(length(min = 1, max = 40))]
    pub category: String,
    #[validate(range(min = 1, max = 1000))]
    pub max_participants: i32,
}

/// POST /api/v1/challenges
pub async fn create_challenge(
    State(state): State<AppState>,
    Json(input): Json<CreateChallengeRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let challenge = ChallengeRepo::create(
        &state.pool,
        &CreateChallenge {
            title: input.title,
            category: input.category,
            max_participants: input.max_participants,
        },
    )
    .await?;

    tracing::info!(challenge_id = challenge.id, "Challenge created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: challenge })))
}

/// GET /api/v1/challenges
pub async fn list_challenges(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let challenges = ChallengeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: challenges }))
}

/// GET /api/v1/challenges/{id}
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let challenge = ChallengeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "challenge",
            id,
        })?;

    Ok(Json(DataResponse { data: challenge }))
}
