//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                  -> create_user
/// GET    /{id}              -> get_user
/// GET    /me/badges         -> my_badges
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/me/badges", get(users::my_badges))
        .route("/{id}", get(users::get_user))
}
