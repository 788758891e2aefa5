use crate::types::{Day, DbId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Idempotent rejection: a completion for the given calendar day is
    /// already recorded. Not a system fault.
    #[error("Challenge already completed on {0}")]
    AlreadyCompletedToday(Day),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
