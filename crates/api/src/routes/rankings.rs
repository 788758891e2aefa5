//! Route definitions for the `/rankings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rankings;
use crate::state::AppState;

/// Routes mounted at `/rankings`.
///
/// ```text
/// GET    /                  -> global_ranking
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(rankings::global_ranking))
}
