//! Route definitions for the `/challenges` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{challenges, progress, rankings};
use crate::state::AppState;

/// Routes mounted at `/challenges`.
///
/// ```text
/// GET    /                      -> list_challenges
/// POST   /                      -> create_challenge
/// GET    /{id}                  -> get_challenge
/// POST   /{id}/join             -> join_challenge
/// DELETE /{id}/join             -> leave_challenge
/// POST   /{id}/completions      -> complete_challenge
/// GET    /{id}/progress         -> get_my_progress
/// GET    /{id}/rankings         -> challenge_ranking
/// GET    /{id}/rankings/me      -> my_challenge_rank
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(challenges::list_challenges).post(challenges::create_challenge),
        )
        .route("/{id}", get(challenges::get_challenge))
        .route(
            "/{id}/join",
            post(progress::join_challenge).delete(progress::leave_challenge),
        )
        .route("/{id}/completions", post(progress::complete_challenge))
        .route("/{id}/progress", get(progress::get_my_progress))
        .route("/{id}/rankings", get(rankings::challenge_ranking))
        .route("/{id}/rankings/me", get(rankings::my_challenge_rank))
}
