//! Handlers for user profiles and badge collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pacer_core::error::CoreError;
use pacer_core::types::DbId;
use pacer_db::models::badge::{EarnedBadge, RepresentativeBadge};
use pacer_db::models::user::CreateUser;
use pacer_db::repositories::{BadgeRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// DTO for creating a user profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 40))]
    pub nickname: String,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

/// A user's earned badges plus the displayed subset.
#[derive(Debug, Serialize)]
pub struct BadgeCollection {
    pub earned: Vec<EarnedBadge>,
    pub representative: Vec<RepresentativeBadge>,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            nickname: input.nickname,
            avatar_url: input.avatar_url,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id,
        })?;

    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/me/badges
///
/// The authenticated user's earned badges and representative slots.
pub async fn my_badges(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let earned = BadgeRepo::list_earned(&state.pool, user_id).await?;
    let representative = BadgeRepo::list_representative(&state.pool, user_id).await?;

    Ok(Json(DataResponse {
        data: BadgeCollection {
            earned,
            representative,
        },
    }))
}
