//! Handlers for global and per-challenge leaderboards.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use pacer_core::error::CoreError;
use pacer_core::ranking::{self, RankMetric};
use pacer_core::types::DbId;
use pacer_db::models::ranking::{ChallengeRankRow, GlobalRankRow};
use pacer_db::repositories::{ChallengeRepo, RankingRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest allowed page size.
const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters shared by the ranking endpoints.
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub metric: RankMetric,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl RankingQuery {
    /// Check pagination bounds, returning (limit, offset) for the query.
    fn pagination(&self) -> Result<(i64, i64), AppError> {
        if self.page < 1 {
            return Err(AppError::BadRequest("page must be >= 1".to_string()));
        }
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        let limit = i64::from(self.limit);
        let offset = i64::from(self.page - 1) * limit;
        Ok((limit, offset))
    }
}

/// A global leaderboard entry with its absolute rank.
#[derive(Debug, Serialize)]
pub struct RankedGlobalEntry {
    pub rank: i64,
    #[serde(flatten)]
    pub entry: GlobalRankRow,
}

/// A per-challenge leaderboard entry with its absolute rank.
#[derive(Debug, Serialize)]
pub struct RankedChallengeEntry {
    pub rank: i64,
    #[serde(flatten)]
    pub entry: ChallengeRankRow,
}

/// The caller's position within one challenge ranking.
#[derive(Debug, Serialize)]
pub struct MyRankResponse {
    pub metric: RankMetric,
    pub rank: i64,
    pub total: i64,
    pub percentile: i32,
}

/// GET /api/v1/rankings
///
/// Global leaderboard: per-user totals across all challenges, ordered by
/// the requested metric.
pub async fn global_ranking(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = query.pagination()?;

    let rows = RankingRepo::global(&state.pool, query.metric, limit, offset).await?;
    let entries: Vec<RankedGlobalEntry> = rows
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedGlobalEntry {
            rank: ranking::page_rank(query.page, query.limit, index),
            entry,
        })
        .collect();

    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/challenges/{id}/rankings
pub async fn challenge_ranking(
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
    Query(query): Query<RankingQuery>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = query.pagination()?;

    ChallengeRepo::find_by_id(&state.pool, challenge_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "challenge",
            id: challenge_id,
        })?;

    let rows =
        RankingRepo::for_challenge(&state.pool, challenge_id, query.metric, limit, offset).await?;
    let entries: Vec<RankedChallengeEntry> = rows
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedChallengeEntry {
            rank: ranking::page_rank(query.page, query.limit, index),
            entry,
        })
        .collect();

    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/challenges/{id}/rankings/me
///
/// The caller's rank and percentile within one challenge, under the same
/// ordering and tie-breaks as the leaderboard itself.
pub async fn my_challenge_rank(
    CallerIdentity(user_id): CallerIdentity,
    State(state): State<AppState>,
    Path(challenge_id): Path<DbId>,
    Query(query): Query<RankingQuery>,
) -> AppResult<impl IntoResponse> {
    let position = RankingRepo::challenge_rank(&state.pool, challenge_id, user_id, query.metric)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "progress record",
            id: challenge_id,
        })?;

    Ok(Json(DataResponse {
        data: MyRankResponse {
            metric: query.metric,
            rank: position.rank,
            total: position.total,
            percentile: ranking::percentile(position.rank, position.total),
        },
    }))
}
