pub mod challenges;
pub mod health;
pub mod rankings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                    create profile
/// /users/{id}                               profile
/// /users/me/badges                          earned + representative badges
///
/// /challenges                               list, create
/// /challenges/{id}                          challenge
/// /challenges/{id}/join                     join (POST), leave (DELETE)
/// /challenges/{id}/completions              record today's completion
/// /challenges/{id}/progress                 caller's record + history
/// /challenges/{id}/rankings                 challenge leaderboard
/// /challenges/{id}/rankings/me              caller's rank + percentile
///
/// /rankings                                 global leaderboard
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/challenges", challenges::router())
        .nest("/rankings", rankings::router())
}
