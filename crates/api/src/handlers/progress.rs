//! Handlers for challenge participation and daily completions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pacer_core::error::CoreError;
use pacer_core::types::DbId;
use pacer_db::models::progress::{Completion, ProgressRecord};
use pacer_db::repositories::{ChallengeRepo, ProgressRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// DTO for recording a completion. The photo reference is an opaque
/// string supplied by the upload service; it is stored, never fetched.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteChallengeRequest {
    #[validate(length(min = 1, max = 500))]
    pub photo_url: String,
}

/// A progress record together with its completion history.
#[derive(Debug, Serialize)]
pub struct ProgressDetail {
    #[serde(flatten)]
    pub record: ProgressRecord,
    pub completions: Vec<Completion>,
}

/// POST /api/v1/challenges/{id}/join
///
/// Creates the caller's progress record for the challenge, with today as
/// the start date. Fails with 409 when the challenge is at capacity or
/// the caller already joined.
pub async fn join_challenge(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let challenge = ChallengeRepo::find_by_id(&state.pool, challenge_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "challenge",
            id: challenge_id,
        })?;

    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })?;

    let participants = ProgressRepo::participant_count(&state.pool, challenge_id).await?;
    if participants >= i64::from(challenge.max_participants) {
        return Err(CoreError::Conflict("Challenge is full".to_string()).into());
    }

    let today = Utc::now().date_naive();
    let record = ProgressRepo::create(&state.pool, user_id, challenge_id, today).await?;

    tracing::info!(user_id, challenge_id, "User joined challenge");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// DELETE /api/v1/challenges/{id}/join
///
/// Removes the caller from the challenge; the progress record and its
/// completion history are deleted.
pub async fn leave_challenge(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProgressRepo::delete(&state.pool, user_id, challenge_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "progress record",
            id: challenge_id,
        }
        .into());
    }

    tracing::info!(user_id, challenge_id, "User left challenge");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/challenges/{id}/completions
///
/// Records the caller's completion for today (UTC) and returns the
/// post-cascade snapshot. A second call on the same calendar day gets a
/// 409 and the supplied photo reference is discarded by the caller.
pub async fn complete_challenge(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
    Json(input): Json<CompleteChallengeRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let today = Utc::now().date_naive();
    let snapshot = engine::completion::record_completion(
        &state.pool,
        user_id,
        challenge_id,
        today,
        &input.photo_url,
        state.config.rate_window_days,
    )
    .await?;

    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/challenges/{id}/progress
///
/// The caller's progress record and completion history for the challenge.
pub async fn get_my_progress(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = ProgressRepo::find(&state.pool, user_id, challenge_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "progress record",
            id: challenge_id,
        })?;

    let completions = ProgressRepo::list_completions(&state.pool, record.id).await?;

    Ok(Json(DataResponse {
        data: ProgressDetail {
            record,
            completions,
        },
    }))
}
