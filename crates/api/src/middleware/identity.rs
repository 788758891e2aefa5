//! Caller identity extraction.
//!
//! Authentication happens upstream: requests arrive with the resolved
//! user id in the `x-user-id` header and the id is trusted as given.
//! Handlers that act on behalf of a user take a [`CallerIdentity`]
//! extractor argument.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pacer_core::types::DbId;

use crate::error::AppError;

/// Header carrying the resolved caller id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The trusted caller id, extracted from [`USER_ID_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub DbId);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {USER_ID_HEADER} header")))?;

        let user_id = raw.parse::<DbId>().map_err(|_| {
            AppError::BadRequest(format!("{USER_ID_HEADER} must be a numeric user id"))
        })?;

        Ok(Self(user_id))
    }
}
